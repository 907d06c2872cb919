//! A single remote endpoint.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// A named remote endpoint with a liveness flag.
///
/// The flag is written by the polling daemon and read by any routing
/// consumer. Reads and writes are individually atomic; there is no
/// snapshot consistency across a set of hosts.
#[derive(Debug)]
pub struct Host {
    name: String,
    healthy: AtomicBool,
}

impl Host {
    /// Create a new host. Hosts start out healthy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return true if the last health check (if any) succeeded.
    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Acquire)
    }

    /// Overwrite the liveness flag.
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::Release);
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
