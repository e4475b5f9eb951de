//! Database client span construction.
//!
//! Spans follow the OpenTelemetry database semantic conventions:
//! - https://opentelemetry.io/docs/specs/semconv/database/database-spans/
//!
//! **Span naming**: `{db.operation.name} {db.namespace}.{db.collection.name}`
//! - Example: `INSERT test.users`, `SELECT test.users`
//!
//! `tracing-opentelemetry` maps the `otel.*` fields onto the exported span's
//! name, kind and status.

use tracing::{field, span, Level, Span};

/// Statement kinds issued by the service (maps to `db.operation.name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOperation {
    Insert,
    Select,
}

impl DbOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "INSERT",
            Self::Select => "SELECT",
        }
    }
}

/// Static attributes shared by every span of one store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbSpanAttributes {
    /// Value of `db.system` (e.g., "cassandra").
    pub system: String,
    /// Keyspace.
    pub namespace: String,
    /// Table.
    pub collection: String,
    /// Contact point(s) the client was configured with.
    pub server_address: String,
}

/// Create a client span for one storage call.
///
/// `otel.status_code` and `error.message` start empty and are filled in by
/// [`record_db_error`].
pub fn db_span(attrs: &DbSpanAttributes, operation: DbOperation, query_text: &str) -> Span {
    let span_name = format!(
        "{} {}.{}",
        operation.as_str(),
        attrs.namespace,
        attrs.collection
    );

    span!(
        Level::INFO,
        "db",
        otel.name = %span_name,
        otel.kind = "client",
        otel.status_code = field::Empty,
        db.system = %attrs.system,
        db.namespace = %attrs.namespace,
        db.collection.name = %attrs.collection,
        db.operation.name = operation.as_str(),
        db.query.text = query_text,
        db.response.returned_rows = field::Empty,
        server.address = %attrs.server_address,
        error.message = field::Empty,
    )
}

/// Mark a storage span as failed.
pub fn record_db_error(span: &Span, error: &dyn std::fmt::Display) {
    span.record("otel.status_code", "ERROR");
    span.record("error.message", field::display(error));
}

/// Record how many rows a lookup returned.
pub fn record_returned_rows(span: &Span, rows: usize) {
    span.record("db.response.returned_rows", rows);
}
