//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build pool + provider → Spawn daemon
//!
//! Shutdown (shutdown.rs):
//!     terminate() → stop signal flips → daemon exits at next cycle boundary
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger terminate()
//! ```
//!
//! # Design Decisions
//! - Each daemon owns its stop signal; there is no process-wide flag
//! - Stopping is one-way; a stopped daemon cannot be restarted

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
