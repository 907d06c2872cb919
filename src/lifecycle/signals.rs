//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGINT (all platforms) or SIGTERM (unix)
//! - Report which one arrived so the caller can stop the daemon
//! - Apply live config updates to the daemon until then

use std::future::Future;
use tokio::signal;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::health::PollingHandle;

/// Wait until the process is asked to stop.
pub async fn wait_for_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};
        let mut term = unix_signal(SignalKind::terminate())?;
        tokio::select! {
            res = signal::ctrl_c() => res.map(|_| "SIGINT"),
            _ = term.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.map(|_| "SIGINT")
    }
}

/// Forward config updates to the daemon until `stop` resolves.
///
/// `stop` is polled across every update, so a signal arriving while an
/// update is being applied is not lost.
pub async fn run_until<S>(
    handle: &PollingHandle,
    updates: &mut mpsc::UnboundedReceiver<AppConfig>,
    stop: S,
) -> std::io::Result<&'static str>
where
    S: Future<Output = std::io::Result<&'static str>>,
{
    tokio::pin!(stop);
    let mut updates_open = true;

    loop {
        tokio::select! {
            signal = &mut stop => return signal,
            update = updates.recv(), if updates_open => match update {
                Some(new_config) => {
                    if let Err(e) = handle.update_config(new_config.polling) {
                        tracing::error!(error = %e, "Rejected polling config update");
                    }
                }
                None => updates_open = false,
            },
        }
    }
}
