//! Health polling subsystem.
//!
//! # Data Flow
//! ```text
//! PollingDaemon (daemon.rs), once per cycle:
//!     → HostListProvider::host_list() → LoadBalancer::update_hosts()
//!     → LoadBalancer::all_hosts()
//!     → HostListProvider::health_check(host) → Host::set_healthy()
//!     → sleep(interval - elapsed)
//!
//! State machine (state.rs):
//!     Running → Stopped (terminal)
//! ```
//!
//! # Design Decisions
//! - Every collaborator call is isolated; errors and panics are logged and absorbed
//! - Probes run sequentially; a slow host delays the rest of the cycle
//! - Config is re-read every cycle so toggles apply without restart
//! - The polling interval is the only retry policy

pub mod daemon;
pub mod state;

pub use daemon::{next_delay, PollingDaemon, PollingHandle};
pub use state::DaemonState;
