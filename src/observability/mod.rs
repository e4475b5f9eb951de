//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer (TraceLayer)      → request span
//!   └─ TracedStore             → spans.rs (one client span per storage call)
//!
//! Consumers:
//!     → logging.rs (fmt / JSON lines on stdout)
//!     → tracing.rs (OTLP export to the collector, run by export.rs on its own thread)
//! ```
//!
//! # Design Decisions
//! - `tracing` is the only instrumentation API; OpenTelemetry sits behind a layer
//! - Span export is best-effort and never affects request outcomes

pub mod export;
pub mod logging;
pub mod spans;
pub mod tracing;

pub use logging::init_logging;
pub use spans::{db_span, DbOperation, DbSpanAttributes};
pub use self::tracing::{Telemetry, TelemetryError};
