//! # Address-Resolution Table Collaborator
//!
//! The scanner never reads MAC addresses off the wire; it asks the
//! operating system's neighbor cache, which the probes have just
//! refreshed as a side effect. This module defines the narrow interface
//! the engine depends on and the system-backed implementation.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use thiserror::Error;

use lanfind_common::network::device::Device;
use lanfind_common::network::mac;

#[derive(Debug, Error)]
pub enum NeighborError {
    /// Bulk read of the neighbor cache failed. The platform cause is
    /// kept as `source`; callers see one uniform message.
    #[error("unable to read the address-resolution table")]
    TableRead(#[source] std::io::Error),
}

/// Read access to the operating system's IP-to-MAC neighbor cache.
///
/// Entries carry at least an IP and a MAC; flag and interface columns
/// are passed through opaquely when the platform provides them.
#[async_trait]
pub trait NeighborTable: Send + Sync {
    /// Entries the cache currently holds for one address.
    async fn lookup(&self, addr: Ipv4Addr) -> Result<Vec<Device>, NeighborError>;

    /// Every resolved entry the cache currently holds.
    async fn read_table(&self) -> Result<Vec<Device>, NeighborError>;
}

/// The real neighbor cache of this host.
pub struct SystemNeighborTable;

#[async_trait]
impl NeighborTable for SystemNeighborTable {
    async fn lookup(&self, addr: Ipv4Addr) -> Result<Vec<Device>, NeighborError> {
        platform::lookup(addr).await
    }

    async fn read_table(&self) -> Result<Vec<Device>, NeighborError> {
        platform::read_table().await
    }
}

#[cfg(target_os = "linux")]
use linux_impl as platform;
#[cfg(target_os = "macos")]
use macos_impl as platform;

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;

    const PROC_ARP: &str = "/proc/net/arp";

    pub async fn read_table() -> Result<Vec<Device>, NeighborError> {
        let raw = tokio::fs::read_to_string(PROC_ARP)
            .await
            .map_err(NeighborError::TableRead)?;
        Ok(parse_proc_arp(&raw))
    }

    pub async fn lookup(addr: Ipv4Addr) -> Result<Vec<Device>, NeighborError> {
        // The kernel exposes no per-host view; filtering the full table
        // is the per-host read on this platform.
        Ok(read_table()
            .await?
            .into_iter()
            .filter(|device| device.ip == addr)
            .collect())
    }

    /// Parses `/proc/net/arp`:
    ///
    /// ```text
    /// IP address       HW type     Flags       HW address            Mask     Device
    /// 192.168.1.1      0x1         0x2         a4:2b:b0:c9:1e:0f     *        eth0
    /// ```
    ///
    /// Entries with flags `0x0` or a zeroed MAC are unresolved and
    /// skipped.
    fn parse_proc_arp(raw: &str) -> Vec<Device> {
        raw.lines().skip(1).filter_map(parse_proc_line).collect()
    }

    fn parse_proc_line(line: &str) -> Option<Device> {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < 6 {
            return None;
        }

        let ip: Ipv4Addr = columns[0].parse().ok()?;
        let flags = columns[2];
        let hw_addr = mac::parse(columns[3])?;

        if flags == "0x0" || mac::is_unresolved(hw_addr) {
            return None;
        }

        Some(
            Device::new(ip, hw_addr)
                .with_flag(flags)
                .with_interface(columns[5]),
        )
    }

    // ╔════════════════════════════════════════════╗
    // ║ ████████╗███████╗███████╗████████╗███████╗ ║
    // ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
    // ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
    // ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
    // ║    ██║   ███████╗███████║   ██║   ███████║ ║
    // ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
    // ╚════════════════════════════════════════════╝

}

#[cfg(target_os = "macos")]
mod macos_impl {
    use super::*;
    use tokio::process::Command;

    pub async fn read_table() -> Result<Vec<Device>, NeighborError> {
        let output = Command::new("arp")
            .arg("-an")
            .output()
            .await
            .map_err(NeighborError::TableRead)?;

        if !output.status.success() {
            return Err(NeighborError::TableRead(std::io::Error::other(format!(
                "arp -an exited with {}",
                output.status
            ))));
        }

        Ok(parse_arp_output(&String::from_utf8_lossy(&output.stdout)))
    }

    pub async fn lookup(addr: Ipv4Addr) -> Result<Vec<Device>, NeighborError> {
        let output = Command::new("arp")
            .arg("-n")
            .arg(addr.to_string())
            .output()
            .await
            .map_err(NeighborError::TableRead)?;

        // arp -n exits non-zero when it has no entry for the address;
        // that is an empty result, not a failure.
        Ok(parse_arp_output(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Parses `arp` output lines of the form:
    ///
    /// ```text
    /// ? (192.168.1.1) at a4:2b:b0:c9:1e:f on en0 ifscope [ethernet]
    /// ? (192.168.1.77) at (incomplete) on en0 ifscope [ethernet]
    /// ```
    fn parse_arp_output(raw: &str) -> Vec<Device> {
        raw.lines().filter_map(parse_arp_line).collect()
    }

    fn parse_arp_line(line: &str) -> Option<Device> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let ip: Ipv4Addr = tokens
            .iter()
            .find_map(|t| t.strip_prefix('(')?.strip_suffix(')'))
            .and_then(|inner| inner.parse().ok())?;

        let at = tokens.iter().position(|&t| t == "at")?;
        let hw_addr = mac::parse(tokens.get(at + 1)?)?;
        if mac::is_unresolved(hw_addr) {
            return None;
        }

        let mut device = Device::new(ip, hw_addr);
        if let Some(on) = tokens.iter().position(|&t| t == "on") {
            if let Some(interface) = tokens.get(on + 1) {
                device = device.with_interface(*interface);
            }
        }
        if let Some(flag) = tokens
            .iter()
            .find_map(|t| t.strip_prefix('[')?.strip_suffix(']'))
        {
            device = device.with_flag(flag);
        }

        Some(device)
    }

    // ╔════════════════════════════════════════════╗
    // ║ ████████╗███████╗███████╗████████╗███████╗ ║
    // ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
    // ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
    // ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
    // ║    ██║   ███████╗███████║   ██║   ███████║ ║
    // ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
    // ╚════════════════════════════════════════════╝

}
