use std::time::{Duration, Instant};

use lanfind_common::config::Config;
use lanfind_common::network::range::IpCollection;
use lanfind_core::DiscoveryService;
use tracing::warn;

use crate::terminal::{print, spinner};

pub async fn discover(targets: IpCollection, cfg: &Config) -> anyhow::Result<()> {
    if targets.is_empty() {
        warn!("nothing to scan");
        return Ok(());
    }

    print::header("network discovery");
    let pb = spinner::scan_spinner(targets.len());
    let start_time: Instant = Instant::now();

    let service = DiscoveryService::new(cfg.clone());
    let mut session = service.stream(targets);

    let mut found: usize = 0;
    while let Some(device) = session.next().await {
        found += 1;
        pb.println(print::device_line(&device));
        pb.set_message(format!("{found} found so far"));
    }

    pb.finish_and_clear();
    discovery_ends(found, start_time.elapsed());
    Ok(())
}

fn discovery_ends(found: usize, total_time: Duration) {
    if found == 0 {
        print::no_results();
        return;
    }
    print::summary(found, total_time);
}
