//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! PollingDaemon produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (cycle counters, per-host health gauges)
//!
//! Consumers:
//!     → stdout log stream
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured fields (host, error) on every failure event
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
