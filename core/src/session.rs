//! # Scan Session
//!
//! One discovery pass over one target set: a window of probes drives
//! the neighbor cache, each completion is looked up, and the surviving
//! entries come out as a finite, completion-ordered stream of devices.

use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::net::Ipv4Addr;
use std::pin::Pin;
use std::sync::Arc;

use tracing::debug;

use lanfind_common::config::Config;
use lanfind_common::network::device::Device;
use lanfind_common::network::mac;
use lanfind_common::network::range::IpCollection;

use crate::neighbors::NeighborTable;
use crate::probe;
use crate::window::{Concurrency, TaskWindow};

type ProbeFuture = Pin<Box<dyn Future<Output = Ipv4Addr> + Send>>;

/// Boxed probe worker, injectable so tests can observe or replace the
/// real connect attempt.
pub type Prober = Box<dyn FnMut(Ipv4Addr) -> ProbeFuture + Send>;

type ProbeWindow = TaskWindow<std::collections::hash_set::IntoIter<Ipv4Addr>, Prober, ProbeFuture>;

/// A lazy, finite, non-restartable stream of discovered devices.
///
/// Each pulled device's IP is a member of the target set, and no IP is
/// yielded twice. Dropping the session early is safe: started probes
/// run on to their own timeout, detached.
pub struct ScanSession {
    window: ProbeWindow,
    targets: IpCollection,
    neighbors: Arc<dyn NeighborTable>,
    ready: VecDeque<Device>,
    seen: HashSet<Ipv4Addr>,
}

impl ScanSession {
    /// Probes every address in `targets` with the configured timeout
    /// and concurrency cap.
    pub fn new(targets: IpCollection, neighbors: Arc<dyn NeighborTable>, config: &Config) -> Self {
        let probe_timeout = config.probe_timeout;
        let prober: Prober = Box::new(move |addr| Box::pin(probe::probe_host(addr, probe_timeout)));
        Self::with_prober(
            targets,
            neighbors,
            Concurrency::Bounded(config.max_probes),
            prober,
        )
    }

    /// Same session, caller-supplied probe worker and window size.
    pub fn with_prober(
        targets: IpCollection,
        neighbors: Arc<dyn NeighborTable>,
        concurrency: Concurrency,
        prober: Prober,
    ) -> Self {
        let window = TaskWindow::new(targets.clone(), concurrency, prober);
        Self {
            window,
            targets,
            neighbors,
            ready: VecDeque::new(),
            seen: HashSet::new(),
        }
    }

    /// The next discovered device, in probe-completion order.
    ///
    /// Returns `None` once every target address has completed its probe
    /// and every surviving entry has been yielded. A failed per-host
    /// lookup contributes nothing; the probe outcome itself is never an
    /// error.
    pub async fn next(&mut self) -> Option<Device> {
        loop {
            if let Some(device) = self.ready.pop_front() {
                return Some(device);
            }

            let addr = self.window.next().await?;

            match self.neighbors.lookup(addr).await {
                Ok(entries) => {
                    for entry in entries {
                        if self.targets.contains(entry.ip) && self.seen.insert(entry.ip) {
                            self.ready.push_back(enrich(entry));
                        }
                    }
                }
                Err(err) => debug!("neighbor lookup for {addr} failed: {err}"),
            }
        }
    }
}

/// Attaches the OUI vendor name when the entry does not carry one.
pub(crate) fn enrich(mut device: Device) -> Device {
    if device.vendor.is_none() {
        device.vendor = mac::get_vendor(device.mac);
    }
    device
}
