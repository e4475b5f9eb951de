//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate storage placement (contact points, data-center, keyspace)
//! - Validate the collector endpoint when export is enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::{ServiceConfig, StorageBackend};

/// Longest keyspace name the row-store accepts.
const MAX_KEYSPACE_LEN: usize = 48;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("storage.contact_points must not be empty")]
    NoContactPoints,

    #[error("storage.local_datacenter must not be empty")]
    EmptyDatacenter,

    #[error("storage.keyspace '{0}' is not a valid identifier")]
    InvalidKeyspace(String),

    #[error("telemetry.endpoint '{0}' is not an http(s) URL")]
    InvalidEndpoint(String),

    #[error("telemetry.service_name must not be empty")]
    EmptyServiceName,

    #[error("telemetry.export_timeout_secs must be greater than 0")]
    ZeroExportTimeout,
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.storage.backend == StorageBackend::Cassandra {
        let storage = &config.storage;
        if storage.contact_points.iter().all(|p| p.trim().is_empty()) {
            errors.push(ValidationError::NoContactPoints);
        }
        if storage.local_datacenter.trim().is_empty() {
            errors.push(ValidationError::EmptyDatacenter);
        }
        if !is_valid_keyspace(&storage.keyspace) {
            errors.push(ValidationError::InvalidKeyspace(storage.keyspace.clone()));
        }
    }

    if config.telemetry.enabled {
        let endpoint = &config.telemetry.endpoint;
        let valid = Url::parse(endpoint)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidEndpoint(endpoint.clone()));
        }
        if config.telemetry.service_name.trim().is_empty() {
            errors.push(ValidationError::EmptyServiceName);
        }
        if config.telemetry.export_timeout_secs == 0 {
            errors.push(ValidationError::ZeroExportTimeout);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_keyspace(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_KEYSPACE_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = ServiceConfig::default();
        config.storage.contact_points.clear();
        config.storage.local_datacenter = " ".into();
        config.storage.keyspace = "bad-name".into();
        config.telemetry.endpoint = "localhost:4317".into();
        config.telemetry.export_timeout_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::NoContactPoints,
                ValidationError::EmptyDatacenter,
                ValidationError::InvalidKeyspace("bad-name".into()),
                ValidationError::InvalidEndpoint("localhost:4317".into()),
                ValidationError::ZeroExportTimeout,
            ]
        );
    }

    #[test]
    fn test_memory_backend_skips_storage_checks() {
        let mut config = ServiceConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.contact_points.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_disabled_telemetry_skips_endpoint_check() {
        let mut config = ServiceConfig::default();
        config.telemetry.enabled = false;
        config.telemetry.endpoint = String::new();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_keyspace_length_limit() {
        assert!(is_valid_keyspace(&"k".repeat(48)));
        assert!(!is_valid_keyspace(&"k".repeat(49)));
    }
}
