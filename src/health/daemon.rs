//! Background polling daemon.
//!
//! # Responsibilities
//! - Periodically refresh the host list from the directory provider
//! - Probe every known host and flip its health flag
//! - Keep running no matter what a collaborator does, panics included
//! - Pace cycles so each one takes roughly the configured interval
//!
//! Caught collaborator panics still pass through the process panic hook
//! first; the binary installs one that reports through tracing
//! (`observability::logging::install_panic_hook`).

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use arc_swap::ArcSwap;
use futures_util::FutureExt;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

use crate::config::validation::{validate_polling, ValidationError};
use crate::config::{EmptyHostListPolicy, PollingConfig};
use crate::directory::HostListProvider;
use crate::error::{CollaboratorFault, InstallError, ProviderError};
use crate::health::DaemonState;
use crate::lifecycle::Shutdown;
use crate::load_balancer::LoadBalancer;
use crate::model::Host;
use crate::observability::metrics;

/// Delay before the next cycle: the configured interval minus the time the
/// cycle already took, clamped at zero.
pub fn next_delay(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

#[derive(Debug, thiserror::Error)]
enum RefreshError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Install(#[from] InstallError),
}

/// Refresh-then-probe loop over a load balancer's host set.
pub struct PollingDaemon {
    config: Arc<ArcSwap<PollingConfig>>,
    load_balancer: Arc<dyn LoadBalancer>,
    provider: Option<Arc<dyn HostListProvider>>,
}

impl PollingDaemon {
    /// Create a daemon without a provider. Both phases stay no-ops until
    /// one is attached with [`PollingDaemon::with_provider`].
    pub fn new(config: PollingConfig, load_balancer: Arc<dyn LoadBalancer>) -> Self {
        Self {
            config: Arc::new(ArcSwap::from_pointee(config)),
            load_balancer,
            provider: None,
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn HostListProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Run one refresh + probe pass. Never fails.
    pub async fn run_cycle(&self) {
        let config = self.config.load_full();
        tracing::debug!("Polling daemon running");

        self.update_hosts(&config).await;
        self.check_hosts(&config).await;

        metrics::record_cycle();
    }

    /// Spawn the loop on the current tokio runtime.
    ///
    /// The task does not hold the runtime open: if the application shuts
    /// the runtime down, the loop dies with it.
    pub fn spawn(self) -> PollingHandle {
        let shutdown = Arc::new(Shutdown::new());
        let wake = Arc::new(Notify::new());
        let cycles = Arc::new(AtomicU64::new(0));
        let config = self.config.clone();

        let task = tokio::spawn(self.run(shutdown.clone(), wake.clone(), cycles.clone()));

        PollingHandle {
            shutdown,
            wake,
            cycles,
            config,
            task,
        }
    }

    async fn run(self, shutdown: Arc<Shutdown>, wake: Arc<Notify>, cycles: Arc<AtomicU64>) {
        // The task keeps its own Arc<Shutdown> so the channel never closes
        // under it, even if the handle is dropped.
        let mut stop = shutdown.subscribe();

        tracing::info!(
            interval_secs = self.config.load().poll_interval_secs,
            "Polling daemon starting"
        );

        while !*stop.borrow_and_update() {
            let start = Instant::now();

            self.run_cycle().await;
            cycles.fetch_add(1, Ordering::Relaxed);

            let interval = self.config.load().poll_interval();
            let sleep_for = next_delay(interval, start.elapsed());
            tracing::debug!(
                sleep_ms = sleep_for.as_millis() as u64,
                "Polling daemon finished; will poll again"
            );

            if sleep_for.is_zero() {
                tokio::task::yield_now().await;
                continue;
            }

            tokio::select! {
                _ = time::sleep(sleep_for) => {}
                _ = wake.notified() => {
                    tracing::warn!("Interrupted while sleeping; starting next cycle early");
                }
                _ = stop.changed() => {}
            }
        }

        tracing::info!(
            cycles = cycles.load(Ordering::Relaxed),
            "Polling daemon stopped"
        );
    }

    async fn update_hosts(&self, config: &PollingConfig) {
        if !config.host_update_enabled {
            tracing::info!("Host update is disabled; not updating hosts");
            return;
        }
        let Some(provider) = &self.provider else {
            tracing::info!("No host list provider; not updating hosts");
            return;
        };

        if let Err(e) = self.refresh(provider.as_ref(), config.empty_host_list).await {
            metrics::record_update_failure();
            tracing::warn!(error = %e, "Unable to enumerate hosts");
        }
    }

    async fn refresh(
        &self,
        provider: &dyn HostListProvider,
        empty_policy: EmptyHostListPolicy,
    ) -> Result<(), RefreshError> {
        let hosts = AssertUnwindSafe(provider.host_list())
            .catch_unwind()
            .await
            .unwrap_or_else(|p| Err(CollaboratorFault::from_panic("host_list", p).into()))?;

        if hosts.is_empty() && empty_policy == EmptyHostListPolicy::KeepPrevious {
            return Err(InstallError::EmptyHostList.into());
        }

        let count = hosts.len();
        let load_balancer = &self.load_balancer;
        panic::catch_unwind(AssertUnwindSafe(|| load_balancer.update_hosts(hosts)))
            .unwrap_or_else(|p| Err(CollaboratorFault::from_panic("update_hosts", p).into()))?;

        tracing::debug!(hosts = count, "Host list refreshed");
        Ok(())
    }

    async fn check_hosts(&self, config: &PollingConfig) {
        if !config.health_check_enabled {
            tracing::info!("Health check is disabled; not checking hosts");
            return;
        }
        let Some(provider) = &self.provider else {
            tracing::info!("No host list provider; not checking hosts");
            return;
        };

        let load_balancer = &self.load_balancer;
        let hosts = match panic::catch_unwind(AssertUnwindSafe(|| load_balancer.all_hosts())) {
            Ok(hosts) => hosts,
            Err(p) => {
                let fault = CollaboratorFault::from_panic("all_hosts", p);
                tracing::warn!(error = %fault, "Unable to list hosts for health check");
                return;
            }
        };

        for host in &hosts {
            check_host(provider.as_ref(), host).await;
        }
    }
}

async fn check_host(provider: &dyn HostListProvider, host: &Host) {
    let result = AssertUnwindSafe(provider.health_check(host))
        .catch_unwind()
        .await
        .unwrap_or_else(|p| Err(CollaboratorFault::from_panic("health_check", p).into()));

    match result {
        Ok(()) => {
            host.set_healthy(true);
            tracing::debug!(host = %host.name(), "Health check successful; host is marked healthy");
        }
        Err(e) => {
            host.set_healthy(false);
            metrics::record_probe_failure(host.name());
            tracing::warn!(
                host = %host.name(),
                error = %e,
                "Health check failed; host is marked unhealthy"
            );
        }
    }

    metrics::record_host_health(host.name(), host.is_healthy());
}

/// Control surface for a spawned [`PollingDaemon`].
pub struct PollingHandle {
    shutdown: Arc<Shutdown>,
    wake: Arc<Notify>,
    cycles: Arc<AtomicU64>,
    config: Arc<ArcSwap<PollingConfig>>,
    task: JoinHandle<()>,
}

impl PollingHandle {
    /// Ask the daemon to stop. The current cycle, if any, runs to completion
    /// and no new cycle starts. Cannot be undone.
    pub fn terminate(&self) {
        if !self.shutdown.is_triggered() {
            tracing::info!("Polling daemon terminating");
        }
        self.shutdown.trigger();
    }

    /// Wake the daemon from its between-cycle sleep. If it is mid-cycle,
    /// the next sleep ends immediately instead.
    pub fn interrupt(&self) {
        self.wake.notify_one();
    }

    /// Replace the polling config. Takes effect from the next cycle.
    pub fn update_config(&self, config: PollingConfig) -> Result<(), ValidationError> {
        validate_polling(&config)?;
        tracing::info!(
            interval_secs = config.poll_interval_secs,
            host_update_enabled = config.host_update_enabled,
            health_check_enabled = config.health_check_enabled,
            "Polling config updated"
        );
        self.config.store(Arc::new(config));
        Ok(())
    }

    pub fn config(&self) -> Arc<PollingConfig> {
        self.config.load_full()
    }

    pub fn state(&self) -> DaemonState {
        if self.shutdown.is_triggered() || self.task.is_finished() {
            DaemonState::Stopped
        } else {
            DaemonState::Running
        }
    }

    /// Number of cycles that have fully completed.
    pub fn cycles_completed(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// True once the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the background task to exit.
    pub async fn join(self) -> Result<(), tokio::task::JoinError> {
        self.task.await
    }
}
