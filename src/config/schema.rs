//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files, and
//! every default matches the fixed deployment the service was built for.

use serde::{Deserialize, Serialize};

/// Root configuration for the user service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Backing row-store settings.
    pub storage: StorageConfig,

    /// Span export settings.
    pub telemetry: TelemetryConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl ServiceConfig {
    /// Apply command-line / environment overrides on top of file values.
    pub fn with_port_override(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.listener.port = port;
        }
        self
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,
}

impl ListenerConfig {
    /// Bind address in `host:port` form.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Which store implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Cassandra / ScyllaDB cluster.
    #[default]
    Cassandra,
    /// In-process map, for local development.
    Memory,
}

/// Row-store client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,

    /// Contact points used to discover the cluster (e.g., "127.0.0.1:9042").
    pub contact_points: Vec<String>,

    /// Logical data-center the load-balancing policy prefers.
    pub local_datacenter: String,

    /// Keyspace holding the `users` table.
    pub keyspace: String,

    /// Timeout for establishing each connection, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Cassandra,
            contact_points: vec!["127.0.0.1:9042".to_string()],
            local_datacenter: "datacenter1".to_string(),
            keyspace: "test".to_string(),
            connect_timeout_secs: 5,
        }
    }
}

/// Span processor attached to the tracer provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpanProcessorKind {
    /// Export each span as it ends, blocking the caller.
    #[default]
    Simple,
    /// Queue spans and export them from a background task.
    Batch,
}

/// Telemetry (OTLP span export) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Enable span export.
    pub enabled: bool,

    /// OTLP gRPC collector endpoint.
    pub endpoint: String,

    /// Value of the `service.name` resource attribute.
    pub service_name: String,

    pub processor: SpanProcessorKind,

    /// Upper bound on a single export call, in seconds.
    pub export_timeout_secs: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:4317".to_string(),
            service_name: "cassandra-service".to_string(),
            processor: SpanProcessorKind::Simple,
            export_timeout_secs: 10,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directives used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "user_service=info,tower_http=debug".to_string(),
            json_logs: false,
        }
    }
}
