//! vdc-poller
//!
//! Runs the host polling daemon against a static host directory.
//!
//! # Architecture Overview
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────┐
//!   │                       VDC POLLER                         │
//!   │                                                          │
//!   │  ┌───────────┐   host_list()   ┌──────────────────────┐  │
//!   │  │ directory │◀────────────────│                      │  │
//!   │  │ provider  │◀────────────────│    PollingDaemon     │  │
//!   │  └───────────┘  health_check() │  (refresh → probe →  │  │
//!   │                                │   sleep → repeat)    │  │
//!   │  ┌───────────┐  update_hosts() │                      │  │
//!   │  │ HostPool  │◀────────────────│                      │  │
//!   │  │  + VDCs   │────────────────▶│                      │  │
//!   │  └───────────┘   all_hosts()   └──────────────────────┘  │
//!   │        │                                                 │
//!   │        ▼  Host::is_healthy() (routing layer)             │
//!   └──────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use clap::Parser;
use tokio::sync::mpsc;

use vdc_poller::config::loader::load_config;
use vdc_poller::config::watcher::ConfigWatcher;
use vdc_poller::config::AppConfig;
use vdc_poller::lifecycle::{signals, startup};
use vdc_poller::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "vdc-poller")]
#[command(about = "Keep host liveness state fresh for a pool of VDC hosts", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Watch the configuration file and apply polling changes live.
    #[arg(long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    logging::install_panic_hook();
    tracing::info!("vdc-poller v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    tracing::info!(
        poll_interval_secs = config.polling.poll_interval_secs,
        host_update_enabled = config.polling.host_update_enabled,
        health_check_enabled = config.polling.health_check_enabled,
        "Configuration loaded"
    );

    let (pool, handle) = startup::start(&config)?;

    // Without --watch the channel is closed from the start and never yields.
    let (_, mut updates) = mpsc::unbounded_channel::<AppConfig>();
    let _watcher = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, rx) = ConfigWatcher::new(path);
            updates = rx;
            Some(watcher.run()?)
        }
        _ => None,
    };

    let signal = signals::run_until(&handle, &mut updates, signals::wait_for_signal()).await?;
    tracing::info!(signal, "Shutdown signal received");

    handle.terminate();
    handle.join().await?;

    for (name, healthy) in pool.vdc_health() {
        tracing::info!(vdc = %name, healthy, "Final VDC health");
    }
    tracing::info!("Shutdown complete");
    Ok(())
}
