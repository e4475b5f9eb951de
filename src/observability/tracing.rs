//! OTLP span export.
//!
//! # Responsibilities
//! - Start the OTLP gRPC exporter on its own thread (see `export`)
//! - Attach the configured span processor (simple by default)
//! - Hand a tracer to the logging layer and flush on shutdown
//!
//! # Design Decisions
//! - No global tracer provider is registered; `Telemetry` is owned by `main`
//! - Export failures stay inside the SDK and never reach request handlers
//! - The simple processor blocks the ending thread only until the export
//!   thread answers, bounded by `export_timeout_secs`

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::trace::{Tracer, TracerProvider};
use opentelemetry_sdk::{runtime, Resource};
use opentelemetry_semantic_conventions::resource::SERVICE_NAME;
use thiserror::Error;

use crate::config::{SpanProcessorKind, TelemetryConfig};
use crate::observability::export::ExportWorker;

/// Instrumentation scope reported on every exported span.
const INSTRUMENTATION_SCOPE: &str = "user-service";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to build OTLP exporter for {endpoint}: {reason}")]
    Exporter { endpoint: String, reason: String },

    #[error("Span export thread failed: {0}")]
    Worker(String),
}

/// Span export pipeline. Dropping it flushes and shuts down the provider.
pub struct Telemetry {
    provider: Option<TracerProvider>,
}

impl Telemetry {
    /// Build the export pipeline, or a no-op one when disabled.
    pub fn init(config: &TelemetryConfig) -> Result<Self, TelemetryError> {
        if !config.enabled {
            return Ok(Self::disabled());
        }

        let exporter = ExportWorker::spawn(config)?;

        let resource = Resource::new(vec![KeyValue::new(
            SERVICE_NAME,
            config.service_name.clone(),
        )]);

        let builder = TracerProvider::builder().with_resource(resource);
        let provider = match config.processor {
            SpanProcessorKind::Simple => builder.with_simple_exporter(exporter),
            SpanProcessorKind::Batch => builder.with_batch_exporter(exporter, runtime::Tokio),
        }
        .build();

        tracing::debug!(
            endpoint = %config.endpoint,
            service_name = %config.service_name,
            processor = ?config.processor,
            "Span exporter configured"
        );

        Ok(Self {
            provider: Some(provider),
        })
    }

    /// A pipeline that exports nothing.
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Tracer for the `tracing-opentelemetry` layer.
    pub fn tracer(&self) -> Option<Tracer> {
        self.provider
            .as_ref()
            .map(|provider| provider.tracer(INSTRUMENTATION_SCOPE))
    }

    /// Flush pending spans and stop the exporter.
    pub fn shutdown(mut self) {
        self.shutdown_provider();
    }

    fn shutdown_provider(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::warn!(error = %e, "Span exporter shutdown failed");
            }
        }
    }
}

impl Drop for Telemetry {
    fn drop(&mut self) {
        self.shutdown_provider();
    }
}
