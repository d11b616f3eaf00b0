//! Scripted neighbor tables for exercising the engine without touching
//! the operating system's cache.

use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pnet::util::MacAddr;

use lanfind_common::network::device::Device;
use lanfind_core::{NeighborError, NeighborTable};

pub fn mac(last: u8) -> MacAddr {
    MacAddr::new(0xaa, 0xbb, 0xcc, 0x00, 0x00, last)
}

pub fn entry(ip: [u8; 4], last: u8) -> Device {
    Device::new(Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]), mac(last))
}

/// A neighbor table with scripted contents and call counters.
///
/// `bulk` feeds `read_table`; `per_host` feeds `lookup`. An unfiltered
/// table returns every per-host entry for every lookup, imitating
/// platforms whose per-host reads spill stale or unrelated rows.
#[derive(Default)]
pub struct FakeNeighborTable {
    bulk: Vec<Device>,
    per_host: Vec<Device>,
    filter_lookups: bool,
    reads: AtomicUsize,
    lookups: AtomicUsize,
}

impl FakeNeighborTable {
    pub fn new() -> Self {
        Self {
            filter_lookups: true,
            ..Default::default()
        }
    }

    pub fn with_bulk(mut self, entries: Vec<Device>) -> Self {
        self.bulk = entries;
        self
    }

    pub fn with_per_host(mut self, entries: Vec<Device>) -> Self {
        self.per_host = entries;
        self
    }

    pub fn unfiltered(mut self) -> Self {
        self.filter_lookups = false;
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NeighborTable for FakeNeighborTable {
    async fn lookup(&self, addr: Ipv4Addr) -> Result<Vec<Device>, NeighborError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);

        let entries = self
            .per_host
            .iter()
            .filter(|device| !self.filter_lookups || device.ip == addr)
            .cloned()
            .collect();
        Ok(entries)
    }

    async fn read_table(&self) -> Result<Vec<Device>, NeighborError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.bulk.clone())
    }
}

/// A neighbor table whose reads always fail.
pub struct FailingNeighborTable;

#[async_trait]
impl NeighborTable for FailingNeighborTable {
    async fn lookup(&self, _addr: Ipv4Addr) -> Result<Vec<Device>, NeighborError> {
        Err(NeighborError::TableRead(std::io::Error::other(
            "scripted failure",
        )))
    }

    async fn read_table(&self) -> Result<Vec<Device>, NeighborError> {
        Err(NeighborError::TableRead(std::io::Error::other(
            "scripted failure",
        )))
    }
}
