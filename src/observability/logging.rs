//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Honour `RUST_LOG` over the configured level
//! - Route panic reports through tracing instead of raw stderr

use std::panic;
use crate::error::panic_message;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber. `level` is used when `RUST_LOG` is unset.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("vdc_poller={level}").into());

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// Replace the default panic hook with one that logs through tracing.
///
/// The polling daemon catches collaborator panics and keeps going, so the
/// report belongs in the structured log next to the warning it produces.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        match info.location() {
            Some(location) => tracing::error!(
                panic.file = location.file(),
                panic.line = location.line(),
                "Panic: {message}"
            ),
            None => tracing::error!("Panic: {message}"),
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caught_panic_after_hook_install() {
        install_panic_hook();
        let payload = panic::catch_unwind(|| panic!("collaborator {}", "failed")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "collaborator failed");
        let _ = panic::take_hook();
    }
}
