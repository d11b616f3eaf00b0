use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use tracing::warn;

use crate::network::range::{IpCollection, Ipv4Range};

/// Enumerates the IPv4 networks of every viable interface on this host.
///
/// An interface contributes when it is up, not a loopback, and carries at
/// least one IPv4 address. The union of the returned networks is the
/// default scan target when the caller names none.
pub fn local_ipv4_networks() -> Vec<Ipv4Network> {
    let interfaces: Vec<NetworkInterface> = pnet::datalink::interfaces();

    let networks: Vec<Ipv4Network> = interfaces
        .into_iter()
        .filter(|interface| interface.is_up() && !interface.is_loopback())
        .flat_map(|interface| interface.ips)
        .filter_map(|net| match net {
            IpNetwork::V4(v4) if !v4.ip().is_loopback() => Some(v4),
            _ => None,
        })
        .collect();

    if networks.is_empty() {
        warn!("no non-internal IPv4 interfaces found on this host");
    }

    networks
}

/// Adds the usable host range of `net` to `collection`.
///
/// The network and broadcast addresses are stripped; networks too small
/// to strip (/31, /32) are added whole.
pub fn add_usable_range(net: Ipv4Network, collection: &mut IpCollection) {
    let net_u32: u32 = u32::from(net.network());
    let broadcast_u32: u32 = u32::from(net.broadcast());

    let start_u32 = net_u32.saturating_add(1);
    let end_u32 = broadcast_u32.saturating_sub(1);

    if start_u32 <= end_u32 {
        collection.add_range(Ipv4Range::new(start_u32.into(), end_u32.into()));
    } else {
        collection.add_range(Ipv4Range::new(net.network(), net.broadcast()));
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
