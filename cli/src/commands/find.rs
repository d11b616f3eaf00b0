use anyhow::Context;
use lanfind_common::config::Config;
use lanfind_common::network::device::DeviceQuery;
use lanfind_common::network::range::IpCollection;
use lanfind_core::DiscoveryService;

use crate::terminal::print;

pub async fn find(query: &str, targets: IpCollection, cfg: &Config) -> anyhow::Result<()> {
    let query: DeviceQuery = query
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("invalid search query")?;

    let service = DiscoveryService::new(cfg.clone());
    let result = service.find(&query, targets).await?;

    match result {
        Some(device) => println!("{}", print::device_line(&device)),
        // Absence is an answer, not a failure.
        None => print::no_results(),
    }

    Ok(())
}
