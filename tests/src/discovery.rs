use std::net::Ipv4Addr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lanfind_common::config::Config;
use lanfind_common::network::device::{Device, DeviceQuery};
use lanfind_common::network::range::IpCollection;
use lanfind_core::session::{Prober, ScanSession};
use lanfind_core::{Concurrency, DiscoveryService};

use crate::support::{entry, FailingNeighborTable, FakeNeighborTable};

fn targets(ips: &[[u8; 4]]) -> IpCollection {
    ips.iter()
        .map(|ip| Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]))
        .collect()
}

fn loopback_targets(last_octets: std::ops::RangeInclusive<u8>) -> IpCollection {
    last_octets.map(|last| Ipv4Addr::new(127, 0, 0, last)).collect()
}

/// A probe stand-in that completes immediately and counts invocations.
fn counting_prober(counter: Arc<AtomicUsize>) -> Prober {
    Box::new(move |addr| {
        counter.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { addr })
    })
}

fn fast_config() -> Config {
    Config {
        probe_timeout: Duration::from_millis(100),
        ..Config::default()
    }
}

async fn drain(session: &mut ScanSession) -> Vec<Device> {
    let mut devices = Vec::new();
    while let Some(device) = session.next().await {
        devices.push(device);
    }
    devices
}

#[tokio::test]
async fn stream_yields_only_target_members_and_never_twice() {
    // The per-host lookup spills an unrelated entry on every call;
    // the session must filter it out and must not repeat the hit.
    let table = Arc::new(
        FakeNeighborTable::new()
            .with_per_host(vec![entry([10, 0, 0, 2], 2), entry([192, 168, 9, 9], 9)])
            .unfiltered(),
    );

    let probes = Arc::new(AtomicUsize::new(0));
    let mut session = ScanSession::with_prober(
        targets(&[[10, 0, 0, 1], [10, 0, 0, 2], [10, 0, 0, 3]]),
        table,
        Concurrency::Bounded(2),
        counting_prober(probes.clone()),
    );

    let devices = drain(&mut session).await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, Ipv4Addr::new(10, 0, 0, 2));
}

#[tokio::test]
async fn every_target_address_is_probed_exactly_once() {
    let table = Arc::new(FakeNeighborTable::new());
    let probes = Arc::new(AtomicUsize::new(0));

    let target_set = targets(&[
        [10, 0, 1, 1],
        [10, 0, 1, 2],
        [10, 0, 1, 3],
        [10, 0, 1, 4],
        [10, 0, 1, 5],
        [10, 0, 1, 6],
        [10, 0, 1, 7],
        [10, 0, 1, 8],
    ]);
    let expected = target_set.len();

    let mut session = ScanSession::with_prober(
        target_set,
        table,
        Concurrency::Bounded(3),
        counting_prober(probes.clone()),
    );

    let devices = drain(&mut session).await;

    assert!(devices.is_empty());
    assert_eq!(probes.load(Ordering::SeqCst), expected);
}

#[tokio::test]
async fn stream_discovers_over_real_loopback_probes() {
    // Nothing listens on 127.0.0.1:80 here; a refused connect still
    // completes the probe and triggers the lookup.
    let table = Arc::new(
        FakeNeighborTable::new().with_per_host(vec![entry([127, 0, 0, 1], 1)]),
    );

    let service = DiscoveryService::with_table(table, fast_config());
    let mut session = service.stream(targets(&[[127, 0, 0, 1]]));

    let devices = drain(&mut session).await;

    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].ip, Ipv4Addr::new(127, 0, 0, 1));
}

#[tokio::test]
async fn find_cache_hit_skips_probing_entirely() {
    let table = Arc::new(FakeNeighborTable::new().with_bulk(vec![entry([10, 0, 0, 5], 5)]));

    // A deliberately slow probe: if the scan path ran at all, the
    // wrapper timeout below would trip.
    let config = Config {
        probe_timeout: Duration::from_secs(5),
        ..Config::default()
    };
    let service = DiscoveryService::with_table(table.clone(), config);

    let query: DeviceQuery = "AA:BB:CC:00:00:05".parse().unwrap();
    let result = tokio::time::timeout(
        Duration::from_secs(1),
        service.find(&query, targets(&[[10, 0, 0, 4], [10, 0, 0, 5], [10, 0, 0, 6]])),
    )
    .await
    .expect("cache hit must not wait on probes")
    .unwrap();

    let device = result.expect("device should be found in the cache");
    assert_eq!(device.ip, Ipv4Addr::new(10, 0, 0, 5));

    assert_eq!(table.reads(), 1);
    assert_eq!(table.lookups(), 0);
}

#[tokio::test]
async fn find_falls_through_to_an_active_scan() {
    // Empty cache, but the per-host lookup knows the device once its
    // probe has fired.
    let table = Arc::new(
        FakeNeighborTable::new().with_per_host(vec![entry([10, 0, 0, 7], 7)]),
    );

    let service = DiscoveryService::with_table(table.clone(), fast_config());

    let query: DeviceQuery = "10.0.0.7".parse().unwrap();
    let result = service
        .find(&query, targets(&[[10, 0, 0, 7]]))
        .await
        .unwrap();

    let device = result.expect("scan should surface the device");
    assert_eq!(device.ip, Ipv4Addr::new(10, 0, 0, 7));

    assert_eq!(table.reads(), 1, "cache is consulted before scanning");
    assert!(table.lookups() >= 1, "scan performs per-host lookups");
}

#[tokio::test]
async fn find_exhausting_the_scan_is_not_an_error() {
    let table = Arc::new(FakeNeighborTable::new());
    let service = DiscoveryService::with_table(table, fast_config());

    let query: DeviceQuery = "de:ad:be:ef:00:01".parse().unwrap();
    let result = service
        .find(&query, loopback_targets(2..=5))
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn list_sorts_by_numeric_octet_order() {
    // String ordering would put .10 before .9; numeric ordering must not.
    let table = Arc::new(FakeNeighborTable::new().with_bulk(vec![
        entry([127, 0, 0, 10], 10),
        entry([127, 0, 0, 2], 2),
        entry([127, 0, 0, 9], 9),
        entry([8, 8, 8, 8], 88),
    ]));

    let service = DiscoveryService::with_table(table, fast_config());
    let devices = service.list(loopback_targets(2..=10)).await.unwrap();

    let ips: Vec<Ipv4Addr> = devices.iter().map(|device| device.ip).collect();
    assert_eq!(
        ips,
        vec![
            Ipv4Addr::new(127, 0, 0, 2),
            Ipv4Addr::new(127, 0, 0, 9),
            Ipv4Addr::new(127, 0, 0, 10),
        ],
        "out-of-target entries are dropped and the rest sort numerically"
    );
}

#[tokio::test]
async fn table_read_failure_surfaces_one_uniform_error() {
    let service = DiscoveryService::with_table(Arc::new(FailingNeighborTable), fast_config());

    let err = service
        .list(loopback_targets(2..=3))
        .await
        .expect_err("bulk read failure must propagate");
    assert_eq!(err.to_string(), "unable to read the address-resolution table");

    let query: DeviceQuery = "10.0.0.1".parse().unwrap();
    let err = service
        .find(&query, loopback_targets(2..=3))
        .await
        .expect_err("find depends on the bulk read too");
    assert_eq!(err.to_string(), "unable to read the address-resolution table");
}

#[tokio::test]
async fn abandoning_the_stream_early_is_safe() {
    let table = Arc::new(
        FakeNeighborTable::new()
            .with_per_host(vec![entry([10, 0, 2, 1], 1), entry([10, 0, 2, 2], 2)])
            .unfiltered(),
    );

    let slow_prober: Prober = Box::new(|addr| {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            addr
        })
    });

    let mut session = ScanSession::with_prober(
        targets(&[[10, 0, 2, 1], [10, 0, 2, 2], [10, 0, 2, 3], [10, 0, 2, 4]]),
        table,
        Concurrency::Bounded(2),
        slow_prober,
    );

    let first = session.next().await;
    assert!(first.is_some());

    // Walk away mid-scan; in-flight probes keep running detached.
    drop(session);
    tokio::time::sleep(Duration::from_millis(120)).await;
}
