//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Root configuration for the poller binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Polling daemon settings (live-reloadable).
    pub polling: PollingConfig,

    /// Static host directory.
    pub directory: DirectoryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// What to do when a refresh returns no hosts at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyHostListPolicy {
    /// Install the empty list; every host drops out of rotation.
    #[default]
    Install,
    /// Treat the refresh as failed and keep the current hosts.
    KeepPrevious,
}

/// Polling daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Target length of one refresh + probe cycle, in seconds.
    pub poll_interval_secs: u64,

    /// Refresh the host list from the directory each cycle.
    pub host_update_enabled: bool,

    /// Probe every known host each cycle.
    pub health_check_enabled: bool,

    /// Behaviour when the directory returns an empty host list.
    pub empty_host_list: EmptyHostListPolicy,
}

impl PollingConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 120,
            host_update_enabled: true,
            health_check_enabled: true,
            empty_host_list: EmptyHostListPolicy::Install,
        }
    }
}

/// Static host directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Enable the static directory provider. Without it both polling phases are no-ops.
    pub enabled: bool,

    /// Known hosts.
    pub hosts: Vec<StaticHostConfig>,

    /// Named groups of hosts (by host name).
    pub vdcs: Vec<VdcConfig>,

    /// TCP connect timeout for probes in milliseconds.
    pub probe_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            hosts: Vec::new(),
            vdcs: Vec::new(),
            probe_timeout_ms: 2000,
        }
    }
}

/// A single host entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticHostConfig {
    /// Host identifier.
    pub name: String,

    /// Address probed by the health check (e.g., "10.0.0.5:9020").
    pub probe_address: String,
}

/// A named group of hosts.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VdcConfig {
    /// VDC name; defaults to the first member's name.
    pub name: Option<String>,

    /// Member host names; each must appear in `directory.hosts`.
    pub hosts: Vec<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
