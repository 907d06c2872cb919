//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the host pool and VDC grouping from configuration
//! - Attach the static directory provider when enabled
//! - Spawn the polling daemon
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The daemon starts last, after the pool is fully seeded

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AppConfig, DirectoryConfig};
use crate::directory::StaticHostListProvider;
use crate::health::{PollingDaemon, PollingHandle};
use crate::load_balancer::HostPool;
use crate::model::{Host, Vdc, VdcError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("VDC {vdc}: {source}")]
    Vdc {
        vdc: String,
        #[source]
        source: VdcError,
    },
    #[error("VDC {vdc} references unknown host {host}")]
    UnknownHost { vdc: String, host: String },
}

/// Seed a host pool from the static directory configuration.
pub fn build_pool(config: &DirectoryConfig) -> Result<HostPool, StartupError> {
    let hosts: Vec<Arc<Host>> = config
        .hosts
        .iter()
        .map(|h| Arc::new(Host::new(h.name.clone())))
        .collect();
    let by_name: HashMap<&str, &Arc<Host>> = hosts.iter().map(|h| (h.name(), h)).collect();

    let mut vdcs = Vec::with_capacity(config.vdcs.len());
    for (i, vdc_config) in config.vdcs.iter().enumerate() {
        let label = vdc_config.name.clone().unwrap_or_else(|| format!("#{i}"));
        let mut members = Vec::with_capacity(vdc_config.hosts.len());
        for name in &vdc_config.hosts {
            let host = by_name.get(name.as_str()).ok_or_else(|| StartupError::UnknownHost {
                vdc: label.clone(),
                host: name.clone(),
            })?;
            members.push(Arc::clone(host));
        }

        let vdc = match &vdc_config.name {
            Some(name) => Vdc::named(name.clone(), members),
            None => Vdc::from_hosts(members),
        }
        .map_err(|source| StartupError::Vdc { vdc: label, source })?;
        vdcs.push(vdc);
    }

    Ok(HostPool::with_vdcs(hosts, vdcs))
}

/// Build the pool and spawn the polling daemon over it.
pub fn start(config: &AppConfig) -> Result<(Arc<HostPool>, PollingHandle), StartupError> {
    let pool = Arc::new(build_pool(&config.directory)?);

    tracing::info!(
        hosts = pool.len(),
        vdcs = pool.vdcs().len(),
        "Host pool seeded"
    );

    let mut daemon = PollingDaemon::new(config.polling.clone(), pool.clone());
    if config.directory.enabled {
        daemon = daemon.with_provider(Arc::new(StaticHostListProvider::new(&config.directory)));
    } else {
        tracing::info!("Static directory disabled; polling runs without a provider");
    }

    Ok((pool, daemon.spawn()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{StaticHostConfig, VdcConfig};

    fn directory() -> DirectoryConfig {
        DirectoryConfig {
            hosts: ["a", "b", "c"]
                .iter()
                .enumerate()
                .map(|(i, n)| StaticHostConfig {
                    name: n.to_string(),
                    probe_address: format!("127.0.0.1:{}", 9000 + i),
                })
                .collect(),
            vdcs: vec![
                VdcConfig {
                    name: Some("dc1".into()),
                    hosts: vec!["a".into(), "b".into()],
                },
                VdcConfig {
                    name: None,
                    hosts: vec!["c".into()],
                },
            ],
            ..DirectoryConfig::default()
        }
    }

    #[test]
    fn test_vdc_members_share_pool_hosts() {
        let pool = build_pool(&directory()).unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.vdcs()[0].name(), "dc1");
        assert_eq!(pool.vdcs()[1].name(), "c");

        pool.get("b").unwrap().set_healthy(false);
        assert!(!pool.vdcs()[0].is_healthy());
        assert!(pool.vdcs()[1].is_healthy());
    }

    #[test]
    fn test_unknown_vdc_host_rejected() {
        let mut config = directory();
        config.vdcs[0].hosts.push("ghost".into());
        let err = build_pool(&config).unwrap_err();
        assert!(matches!(err, StartupError::UnknownHost { host, .. } if host == "ghost"));
    }

    #[test]
    fn test_empty_vdc_rejected() {
        let mut config = directory();
        config.vdcs[1].hosts.clear();
        let err = build_pool(&config).unwrap_err();
        assert!(matches!(err, StartupError::Vdc { source: VdcError::Empty, .. }));
    }
}
