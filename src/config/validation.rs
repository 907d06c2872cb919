//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (VDCs reference known hosts)
//! - Validate value ranges (interval > 0, addresses parse)

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{AppConfig, PollingConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("polling.poll_interval_secs must be greater than zero")]
    ZeroPollInterval,
    #[error("directory.probe_timeout_ms must be greater than zero")]
    ZeroProbeTimeout,
    #[error("host name must not be empty")]
    EmptyHostName,
    #[error("duplicate host name: {0}")]
    DuplicateHost(String),
    #[error("invalid probe address for {host}: {address}")]
    InvalidProbeAddress { host: String, address: String },
    #[error("VDC {0} has no hosts")]
    EmptyVdc(String),
    #[error("VDC {vdc} references unknown host {host}")]
    UnknownVdcHost { vdc: String, host: String },
    #[error("invalid metrics address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate the polling section on its own (used on live reload).
pub fn validate_polling(polling: &PollingConfig) -> Result<(), ValidationError> {
    if polling.poll_interval_secs == 0 {
        return Err(ValidationError::ZeroPollInterval);
    }
    Ok(())
}

/// Validate a full configuration, collecting every problem.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_polling(&config.polling) {
        errors.push(e);
    }

    let directory = &config.directory;
    if directory.probe_timeout_ms == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    }

    let mut names = HashSet::new();
    for host in &directory.hosts {
        if host.name.is_empty() {
            errors.push(ValidationError::EmptyHostName);
        } else if !names.insert(host.name.as_str()) {
            errors.push(ValidationError::DuplicateHost(host.name.clone()));
        }
        if host.probe_address.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidProbeAddress {
                host: host.name.clone(),
                address: host.probe_address.clone(),
            });
        }
    }

    for (i, vdc) in directory.vdcs.iter().enumerate() {
        let label = vdc
            .name
            .clone()
            .or_else(|| vdc.hosts.first().cloned())
            .unwrap_or_else(|| format!("#{i}"));
        if vdc.hosts.is_empty() {
            errors.push(ValidationError::EmptyVdc(label));
            continue;
        }
        for host in &vdc.hosts {
            if !names.contains(host.as_str()) {
                errors.push(ValidationError::UnknownVdcHost {
                    vdc: label.clone(),
                    host: host.clone(),
                });
            }
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
