//! # Discovered Device Model
//!
//! A device is one row of the address-resolution table that survived the
//! target filter: an IPv4 address paired with the MAC it resolved to,
//! plus whatever extra columns the platform table carried.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::util::MacAddr;

use crate::network::mac;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    /// Platform flag column (e.g. `0x2` on Linux), passed through opaquely.
    pub flag: Option<String>,
    /// Interface the entry was learned on (e.g. `eth0`).
    pub interface: Option<String>,
    /// Vendor name resolved from the MAC's OUI prefix.
    pub vendor: Option<String>,
}

impl Device {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self {
            ip,
            mac,
            flag: None,
            interface: None,
            vendor: None,
        }
    }

    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.flag = Some(flag.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.ip, self.mac)
    }
}

/// What a single-device search is looking for: either a MAC address or
/// an IPv4 literal.
///
/// MAC queries are held in normalized form so comparisons are case- and
/// separator-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceQuery {
    Ip(Ipv4Addr),
    Mac(String),
}

impl DeviceQuery {
    pub fn matches(&self, device: &Device) -> bool {
        match self {
            Self::Ip(addr) => device.ip == *addr,
            Self::Mac(normalized) => mac::normalize(&device.mac.to_string()) == *normalized,
        }
    }
}

impl FromStr for DeviceQuery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(addr) = s.parse::<Ipv4Addr>() {
            return Ok(Self::Ip(addr));
        }

        let normalized = mac::normalize(s);
        if normalized.is_empty() {
            return Err(format!("not an IPv4 address or MAC address: {s}"));
        }
        Ok(Self::Mac(normalized))
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
