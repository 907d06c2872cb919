//! Configuration-backed host directory.
//!
//! # Responsibilities
//! - Serve a fixed host list taken from configuration
//! - Probe hosts with a plain TCP connect bounded by a timeout

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time;

use crate::config::DirectoryConfig;
use crate::directory::HostListProvider;
use crate::error::{ProbeError, ProviderError};
use crate::model::Host;

/// Provider whose host list never changes.
#[derive(Debug)]
pub struct StaticHostListProvider {
    /// Host name -> probe address.
    addresses: HashMap<String, String>,
    /// Host names in configuration order.
    order: Vec<String>,
    probe_timeout: Duration,
}

impl StaticHostListProvider {
    pub fn new(config: &DirectoryConfig) -> Self {
        let mut addresses = HashMap::new();
        let mut order = Vec::with_capacity(config.hosts.len());
        for host in &config.hosts {
            order.push(host.name.clone());
            addresses.insert(host.name.clone(), host.probe_address.clone());
        }
        Self {
            addresses,
            order,
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
        }
    }

    fn resolve(&self, host: &Host) -> Result<SocketAddr, ProbeError> {
        // Hosts added by someone else fall back to their own name.
        let raw = self
            .addresses
            .get(host.name())
            .map(String::as_str)
            .unwrap_or(host.name());
        raw.parse::<SocketAddr>().map_err(|e| ProbeError::InvalidAddress {
            address: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl HostListProvider for StaticHostListProvider {
    async fn host_list(&self) -> Result<Vec<Arc<Host>>, ProviderError> {
        Ok(self
            .order
            .iter()
            .map(|name| Arc::new(Host::new(name.clone())))
            .collect())
    }

    async fn health_check(&self, host: &Host) -> Result<(), ProbeError> {
        let addr = self.resolve(host)?;
        match time::timeout(self.probe_timeout, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => Ok(()),
            Ok(Err(e)) => Err(ProbeError::Connect(e)),
            Err(_) => Err(ProbeError::Timeout(self.probe_timeout.as_millis() as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StaticHostConfig;
    use tokio::net::TcpListener;

    fn config(hosts: &[(&str, &str)]) -> DirectoryConfig {
        DirectoryConfig {
            hosts: hosts
                .iter()
                .map(|(name, addr)| StaticHostConfig {
                    name: name.to_string(),
                    probe_address: addr.to_string(),
                })
                .collect(),
            probe_timeout_ms: 500,
            ..DirectoryConfig::default()
        }
    }

    #[tokio::test]
    async fn test_host_list_keeps_config_order() {
        let provider = StaticHostListProvider::new(&config(&[
            ("b", "127.0.0.1:1"),
            ("a", "127.0.0.1:2"),
        ]));
        let names: Vec<String> = provider
            .host_list()
            .await
            .unwrap()
            .iter()
            .map(|h| h.name().to_string())
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_probe_succeeds_against_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let provider = StaticHostListProvider::new(&config(&[("up", &addr)]));

        assert!(provider.health_check(&Host::new("up")).await.is_ok());
    }

    #[tokio::test]
    async fn test_probe_fails_when_nothing_listens() {
        // Bind then drop to get a port that is very likely closed.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let provider = StaticHostListProvider::new(&config(&[("down", &addr)]));

        assert!(provider.health_check(&Host::new("down")).await.is_err());
    }

    #[tokio::test]
    async fn test_probe_rejects_bad_address() {
        let provider = StaticHostListProvider::new(&config(&[("bad", "not-an-addr")]));
        let err = provider.health_check(&Host::new("bad")).await.unwrap_err();
        assert!(matches!(err, ProbeError::InvalidAddress { .. }));
    }
}
