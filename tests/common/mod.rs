//! Shared collaborators for polling daemon integration tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::time::Instant;

use vdc_poller::error::{InstallError, ProbeError, ProviderError};
use vdc_poller::{Host, HostListProvider, HostPool, LoadBalancer};

pub fn hosts(names: &[&str]) -> Vec<Arc<Host>> {
    names.iter().map(|n| Arc::new(Host::new(*n))).collect()
}

/// Provider whose behaviour is scripted per test.
#[derive(Default)]
pub struct ScriptedProvider {
    /// Host list to serve; `None` makes every fetch fail.
    pub list: Option<Vec<String>>,
    /// Make every fetch panic instead of returning.
    pub panicking_fetch: bool,
    /// Hosts whose probe returns an error.
    pub failing: HashSet<String>,
    /// Hosts whose probe panics.
    pub panicking: HashSet<String>,
    /// Simulated probe latency.
    pub probe_delay: Duration,
    /// When set, every probe waits for a permit first.
    pub gate: Option<Arc<Semaphore>>,
    pub fetches: AtomicUsize,
    pub probes: Mutex<Vec<(String, Instant)>>,
}

#[allow(dead_code)]
impl ScriptedProvider {
    pub fn probed_names(&self) -> Vec<String> {
        self.probes.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }

    pub fn probe_starts(&self, host: &str) -> Vec<Instant> {
        self.probes
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == host)
            .map(|(_, t)| *t)
            .collect()
    }
}

#[async_trait]
impl HostListProvider for ScriptedProvider {
    async fn host_list(&self) -> Result<Vec<Arc<Host>>, ProviderError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.panicking_fetch {
            panic!("directory lookup blew up");
        }
        match &self.list {
            Some(names) => Ok(names.iter().map(|n| Arc::new(Host::new(n.clone()))).collect()),
            None => Err(ProviderError::Unavailable("directory offline".into())),
        }
    }

    async fn health_check(&self, host: &Host) -> Result<(), ProbeError> {
        self.probes
            .lock()
            .unwrap()
            .push((host.name().to_string(), Instant::now()));

        if let Some(gate) = &self.gate {
            let _permit = gate.acquire().await.map_err(|e| ProbeError::Unhealthy(e.to_string()))?;
        }
        if !self.probe_delay.is_zero() {
            tokio::time::sleep(self.probe_delay).await;
        }
        if self.panicking.contains(host.name()) {
            panic!("probe blew up for {}", host.name());
        }
        if self.failing.contains(host.name()) {
            return Err(ProbeError::Unhealthy(format!("{} is down", host.name())));
        }
        Ok(())
    }
}

/// Host pool that counts install calls.
#[derive(Debug)]
pub struct RecordingBalancer {
    pub pool: HostPool,
    pub installs: AtomicUsize,
}

#[allow(dead_code)]
impl RecordingBalancer {
    pub fn new(initial: &[&str]) -> Self {
        Self {
            pool: HostPool::new(hosts(initial)),
            installs: AtomicUsize::new(0),
        }
    }

    pub fn install_count(&self) -> usize {
        self.installs.load(Ordering::SeqCst)
    }

    pub fn is_healthy(&self, name: &str) -> bool {
        self.pool.get(name).map(|h| h.is_healthy()).unwrap_or(false)
    }
}

impl LoadBalancer for RecordingBalancer {
    fn update_hosts(&self, hosts: Vec<Arc<Host>>) -> Result<(), InstallError> {
        self.installs.fetch_add(1, Ordering::SeqCst);
        self.pool.update_hosts(hosts)
    }

    fn all_hosts(&self) -> Vec<Arc<Host>> {
        self.pool.all_hosts()
    }
}

/// Poll `cond` until it holds, panicking after ~100s of (usually virtual) time.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..10_000 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}
