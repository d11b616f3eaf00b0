use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

/// Port the probe connects to. Nothing is read or written; any port
/// would do, the handshake attempt alone refreshes the neighbor cache.
pub const PROBE_PORT: u16 = 80;

/// Touches `addr` with a single TCP connect attempt.
///
/// Resolves to the input address whether the connect succeeds, is
/// refused, or times out. The socket is dropped on every path. The
/// caller learns nothing about reachability; the value of the call is
/// the operating system's neighbor-cache entry it leaves behind.
pub async fn probe_host(addr: Ipv4Addr, probe_timeout: Duration) -> Ipv4Addr {
    let socket_addr = SocketAddr::from((addr, PROBE_PORT));

    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(stream)) => drop(stream),
        Ok(Err(_)) | Err(_) => {}
    }

    addr
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
