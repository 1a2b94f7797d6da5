//! Outbound data sources

pub mod prometheus;

pub use prometheus::{BackendError, MetricsBackend, PrometheusClient};
