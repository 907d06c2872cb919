//! Host data model.
//!
//! # Data Flow
//! ```text
//! HostListProvider::host_list()
//!     → Vec<Arc<Host>>
//!     → LoadBalancer::update_hosts() (authoritative set)
//!     → PollingDaemon flips Host::healthy after each probe
//!
//! Vdc (group of hosts):
//!     → is_healthy() = AND over live member flags
//! ```
//!
//! # Design Decisions
//! - Hosts are shared via `Arc`; nobody owns their destruction
//! - Health is a single atomic flag, readable without locks
//! - Vdc membership is fixed at construction; only member health changes

pub mod host;
pub mod vdc;

pub use host::Host;
pub use vdc::{Vdc, VdcError};
