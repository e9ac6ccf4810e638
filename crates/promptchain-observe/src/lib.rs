//! Observability for promptchain: log filtering, the tracing subscriber,
//! and the optional OpenTelemetry stdout exporter.

pub mod tracing_setup;
