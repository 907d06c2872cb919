//! Host directory providers.
//!
//! # Data Flow
//! ```text
//! PollingDaemon (host update phase)
//!     → HostListProvider::host_list()
//!     → LoadBalancer::update_hosts()
//!
//! PollingDaemon (health check phase)
//!     → LoadBalancer::all_hosts()
//!     → HostListProvider::health_check(host) for each host
//! ```
//!
//! # Design Decisions
//! - The provider is the source of truth for which hosts exist
//! - A probe has no payload; Ok/Err is the only signal
//! - Providers enforce their own deadlines; the daemon imposes none

pub mod static_list;

use std::sync::Arc;
use async_trait::async_trait;

use crate::error::{ProbeError, ProviderError};
use crate::model::Host;

pub use static_list::StaticHostListProvider;

/// External source of truth for the host set and single-host probes.
#[async_trait]
pub trait HostListProvider: Send + Sync {
    /// Fetch the current host list.
    async fn host_list(&self) -> Result<Vec<Arc<Host>>, ProviderError>;

    /// Probe a single host. `Ok(())` means the host can take traffic.
    async fn health_check(&self, host: &Host) -> Result<(), ProbeError>;
}
