//! # Network Discovery Service
//!
//! The three end-user operations, built on the scan session:
//! streaming discovery, single-device search, and the bulk device list.

use std::sync::Arc;

use lanfind_common::config::Config;
use lanfind_common::network::device::{Device, DeviceQuery};
use lanfind_common::network::range::IpCollection;

use crate::neighbors::{NeighborError, NeighborTable, SystemNeighborTable};
use crate::probe;
use crate::session::{self, ScanSession};
use crate::window::{Concurrency, TaskWindow};

/// Orchestrates discovery against one neighbor-table collaborator.
///
/// Holds no state between calls: every operation re-probes from
/// scratch. There is deliberately no cross-call device cache.
pub struct DiscoveryService {
    neighbors: Arc<dyn NeighborTable>,
    config: Config,
}

impl DiscoveryService {
    /// Service backed by this host's real neighbor cache.
    pub fn new(config: Config) -> Self {
        Self::with_table(Arc::new(SystemNeighborTable), config)
    }

    /// Service backed by a caller-supplied table (tests, replay).
    pub fn with_table(neighbors: Arc<dyn NeighborTable>, config: Config) -> Self {
        Self { neighbors, config }
    }

    /// Streaming discovery: devices are yielded as their probes finish.
    pub fn stream(&self, targets: IpCollection) -> ScanSession {
        ScanSession::new(targets, self.neighbors.clone(), &self.config)
    }

    /// Single-device search by MAC or IP.
    ///
    /// Checks the neighbor cache first — a hit costs no probes. On a
    /// miss, runs a full scan session over `targets` and returns the
    /// first matching device. Exhausting the session without a match is
    /// `Ok(None)`, not an error.
    pub async fn find(
        &self,
        query: &DeviceQuery,
        targets: IpCollection,
    ) -> Result<Option<Device>, NeighborError> {
        let cached = self.filtered_table(&targets).await?;
        if let Some(hit) = cached.into_iter().find(|device| query.matches(device)) {
            return Ok(Some(session::enrich(hit)));
        }

        let mut scan = self.stream(targets);
        while let Some(device) = scan.next().await {
            if query.matches(&device) {
                return Ok(Some(device));
            }
        }

        Ok(None)
    }

    /// Bulk list: probes every target to completion, then reads the
    /// table once and returns the matching devices sorted ascending by
    /// address.
    pub async fn list(&self, targets: IpCollection) -> Result<Vec<Device>, NeighborError> {
        let probe_timeout = self.config.probe_timeout;
        let concurrency = Concurrency::Bounded(self.config.max_probes);

        let mut sweep = TaskWindow::new(targets.clone(), concurrency, move |addr| {
            probe::probe_host(addr, probe_timeout)
        });
        while sweep.next().await.is_some() {}

        let mut devices = self.filtered_table(&targets).await?;
        devices.sort_by_key(|device| device.ip);
        Ok(devices.into_iter().map(session::enrich).collect())
    }

    async fn filtered_table(&self, targets: &IpCollection) -> Result<Vec<Device>, NeighborError> {
        Ok(self
            .neighbors
            .read_table()
            .await?
            .into_iter()
            .filter(|device| targets.contains(device.ip))
            .collect())
    }
}
