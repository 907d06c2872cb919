//! Routing target subsystem.
//!
//! # Data Flow
//! ```text
//! PollingDaemon
//!     → update_hosts(refreshed list)   (install authoritative set)
//!     → all_hosts()                    (snapshot for probing)
//!
//! Routing layer (out of scope here)
//!     → healthy_hosts() / vdc_health() (consume liveness state)
//! ```
//!
//! # Design Decisions
//! - The load balancer owns the authoritative host set, not the daemon
//! - Readers get a snapshot; installs swap the whole set atomically
//! - Host selection policy is left to the routing layer

pub mod pool;

use std::sync::Arc;

use crate::error::InstallError;
use crate::model::Host;

pub use pool::HostPool;

/// Holds the current routable host set.
pub trait LoadBalancer: Send + Sync {
    /// Install a refreshed host list.
    fn update_hosts(&self, hosts: Vec<Arc<Host>>) -> Result<(), InstallError>;

    /// Snapshot of every known host, healthy or not.
    fn all_hosts(&self) -> Vec<Arc<Host>>;
}
