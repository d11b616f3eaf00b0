//! # Scan Target Model
//!
//! Defines the possible inputs for a network scan.
//!
//! This module handles parsing and representing targets, which can be:
//! * A single IPv4 address (host).
//! * An IPv4 Range (e.g., `192.168.1.1-100`).
//! * A CIDR block (e.g., `192.168.1.0/24`).
//! * The local LAN (detected automatically).

use std::net::Ipv4Addr;
use std::str::FromStr;

use tracing::debug;

use crate::network::interface;
use crate::network::range::{self, IpCollection, Ipv4Range};

/// Represents a distinct target to be scanned.
#[derive(Clone, Debug)]
pub enum Target {
    /// Scan every non-internal IPv4 network attached to this host.
    Lan,
    /// Scan a single specific host.
    Host { target_addr: Ipv4Addr },
    /// Scan a range of IPv4 addresses.
    Range { ipv4_range: Ipv4Range },
    /// Holds a list of different targets
    Multi { targets: Vec<Target> },
}

impl FromStr for Target {
    type Err = String;

    /// Parses a string into a `Target`.
    ///
    /// Supported formats:
    /// * **Keyword**: "lan" (case-insensitive).
    /// * **Host**: Single IPv4 address (e.g., "192.168.1.5").
    /// * **Range**: "Start-End" (e.g., "192.168.1.1-50", "192.168.1.1-192.168.1.50").
    /// * **CIDR**: "Network/Prefix" (e.g., "192.168.1.0/24").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("lan") {
            return Ok(Target::Lan);
        }

        if s.contains(',') {
            if let Ok(target) = parse_commas(s) {
                return Ok(target);
            }
        }

        if let Some(target) = parse_host(s) {
            return Ok(target);
        }

        if let Some(target) = parse_ip_range(s)? {
            return Ok(target);
        }

        if let Some(target) = parse_cidr_range(s)? {
            return Ok(target);
        }

        Err(format!("invalid target: {s}"))
    }
}

/// This prevents code duplication between single-target and multi-target parsing.
fn resolve_target(target: Target, collection: &mut IpCollection) {
    match target {
        Target::Lan => {
            for net in interface::local_ipv4_networks() {
                interface::add_usable_range(net, collection);
            }
        }
        Target::Host { target_addr } => {
            collection.add_single(target_addr);
        }
        Target::Range { ipv4_range } => {
            collection.add_range(ipv4_range);
        }
        Target::Multi { targets } => {
            for target in targets {
                resolve_target(target, collection);
            }
        }
    }
}

/// Converts a single target into an IP collection.
pub fn to_collection(target: Target) -> IpCollection {
    let mut collection = IpCollection::new();
    resolve_target(target, &mut collection);
    collection
}

/// Best-effort expansion of a target expression.
///
/// Malformed input contributes nothing rather than failing the scan; the
/// rejected expression is recorded at debug level. Comma-separated lists
/// degrade per part.
pub fn expand(s: &str) -> IpCollection {
    let mut collection = IpCollection::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        match Target::from_str(part) {
            Ok(target) => resolve_target(target, &mut collection),
            Err(reason) => debug!("skipping unparsable target {part:?}: {reason}"),
        }
    }

    collection
}

/// Parses a comma-separated list of targets (e.g., "192.168.1.5, 10.0.0.1-50, lan").
pub fn parse_commas(s: &str) -> anyhow::Result<Target> {
    let mut targets = Vec::new();

    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let target = Target::from_str(part)
            .map_err(|e| anyhow::anyhow!("Failed to parse target '{}': {}", part, e))?;

        targets.push(target);
    }

    Ok(Target::Multi { targets })
}

/// Parses a single IPv4 address.
fn parse_host(s: &str) -> Option<Target> {
    s.parse::<Ipv4Addr>()
        .ok()
        .map(|target_addr| Target::Host { target_addr })
}

/// Parses a range string like "1.1.1.1-2.2.2.2" or "1.1.1.1-50".
fn parse_ip_range(s: &str) -> Result<Option<Target>, String> {
    let Some((start_str, end_str)) = s.split_once('-') else {
        return Ok(None);
    };

    let start_addr = start_str
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid start IP in range '{start_str}': {e}"))?;

    let end_addr = parse_range_end_addr(end_str, &start_addr, s)?;

    let ipv4_range = Ipv4Range::new(start_addr, end_addr);
    Ok(Some(Target::Range { ipv4_range }))
}

/// Helper to parse the end address of a range.
///
/// Handles abbreviated forms like "192.168.1.1-50" (implies 192.168.1.50)
/// and full forms like "192.168.1.1-192.168.1.255".
fn parse_range_end_addr(
    end_str: &str,
    start_addr: &Ipv4Addr,
    original_s: &str,
) -> Result<Ipv4Addr, String> {
    if let Ok(full_addr) = end_str.parse::<Ipv4Addr>() {
        return Ok(full_addr);
    }

    let mut end_octets = start_addr.octets();
    let partial_octets: Vec<u8> = end_str
        .split('.')
        .map(|octet_str| octet_str.parse::<u8>())
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|e| format!("Invalid end range '{end_str}': {e}"))?;

    if partial_octets.is_empty() {
        return Err(format!("End range cannot be empty: {original_s}"));
    }
    if partial_octets.len() > 4 {
        return Err(format!("End range has too many octets: {end_str}"));
    }

    let partial_len = partial_octets.len();
    let start_index = 4 - partial_len;
    end_octets[start_index..].copy_from_slice(&partial_octets);

    Ok(Ipv4Addr::from(end_octets))
}

/// Parses CIDR notation like "192.168.1.0/24".
fn parse_cidr_range(s: &str) -> Result<Option<Target>, String> {
    let Some((ip_str, prefix_str)) = s.split_once('/') else {
        return Ok(None);
    };

    let ipv4_addr = ip_str
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid IP in CIDR '{ip_str}': {e}"))?;

    let prefix = prefix_str
        .parse::<u8>()
        .map_err(|e| format!("Invalid prefix in CIDR '{prefix_str}': {e}"))?;

    let ipv4_range = range::cidr_range(ipv4_addr, prefix).map_err(|e| e.to_string())?;

    Ok(Some(Target::Range { ipv4_range }))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
