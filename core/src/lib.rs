//! The discovery engine: probes, the completion-ordered task window,
//! the neighbor-table collaborator, and the scan session that ties them
//! into a stream of devices.

pub mod discovery;
pub mod neighbors;
pub mod probe;
pub mod session;
pub mod window;

pub use discovery::DiscoveryService;
pub use neighbors::{NeighborError, NeighborTable, SystemNeighborTable};
pub use session::ScanSession;
pub use window::{Concurrency, TaskWindow};
