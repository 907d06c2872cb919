//! Client-side host liveness polling.
//!
//! Keeps a pool of remote hosts (optionally grouped into VDCs) up to date:
//! a background daemon periodically refreshes the host list from a
//! directory provider and probes each host, flipping its health flag for
//! a routing layer to consume.

pub mod config;
pub mod directory;
pub mod error;
pub mod health;
pub mod lifecycle;
pub mod load_balancer;
pub mod model;
pub mod observability;

pub use config::AppConfig;
pub use directory::HostListProvider;
pub use health::{PollingDaemon, PollingHandle};
pub use load_balancer::{HostPool, LoadBalancer};
pub use model::{Host, Vdc};
