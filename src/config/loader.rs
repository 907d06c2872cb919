//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from a TOML string.
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmptyHostListPolicy;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.polling.poll_interval_secs, 120);
        assert!(config.polling.host_update_enabled);
        assert!(config.polling.health_check_enabled);
        assert_eq!(config.polling.empty_host_list, EmptyHostListPolicy::Install);
    }

    #[test]
    fn test_full_config_parses() {
        let config = parse_config(
            r#"
            [polling]
            poll_interval_secs = 5
            host_update_enabled = false
            empty_host_list = "keep_previous"

            [directory]
            probe_timeout_ms = 250

            [[directory.hosts]]
            name = "node1"
            probe_address = "127.0.0.1:9020"

            [[directory.hosts]]
            name = "node2"
            probe_address = "127.0.0.1:9021"

            [[directory.vdcs]]
            name = "dc1"
            hosts = ["node1", "node2"]
            "#,
        )
        .unwrap();

        assert_eq!(config.polling.poll_interval_secs, 5);
        assert!(!config.polling.host_update_enabled);
        assert_eq!(config.polling.empty_host_list, EmptyHostListPolicy::KeepPrevious);
        assert_eq!(config.directory.hosts.len(), 2);
        assert_eq!(config.directory.vdcs[0].name.as_deref(), Some("dc1"));
    }

    #[test]
    fn test_invalid_config_reports_every_error() {
        let err = parse_config(
            r#"
            [polling]
            poll_interval_secs = 0

            [[directory.hosts]]
            name = ""
            probe_address = "nowhere"
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/vdc-poller.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
