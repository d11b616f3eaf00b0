use std::time::Instant;

use lanfind_common::config::Config;
use lanfind_common::network::range::IpCollection;
use lanfind_core::DiscoveryService;
use tracing::warn;

use crate::terminal::{print, spinner};

pub async fn list(targets: IpCollection, cfg: &Config) -> anyhow::Result<()> {
    if targets.is_empty() {
        warn!("nothing to scan");
        return Ok(());
    }

    print::header("device list");
    let pb = spinner::scan_spinner(targets.len());
    let start_time = Instant::now();

    let service = DiscoveryService::new(cfg.clone());
    let devices = service.list(targets).await?;

    pb.finish_and_clear();

    if devices.is_empty() {
        print::no_results();
        return Ok(());
    }

    for device in &devices {
        println!("{}", print::device_line(device));
    }
    print::summary(devices.len(), start_time.elapsed());

    Ok(())
}
