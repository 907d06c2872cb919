//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated)
//!     → PollingConfig shared via ArcSwap with the polling daemon
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new PollingConfig stored; daemon picks it up next cycle
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the polling section is live-reloadable; the host directory is fixed at startup

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::AppConfig;
pub use schema::DirectoryConfig;
pub use schema::EmptyHostListPolicy;
pub use schema::ObservabilityConfig;
pub use schema::PollingConfig;
pub use schema::StaticHostConfig;
pub use schema::VdcConfig;
