//! Prometheus HTTP API client

mod backend;
mod client;
mod error;
mod types;

pub use backend::MetricsBackend;
#[cfg(test)]
pub(crate) use backend::testing;
pub use client::PrometheusClient;
pub use error::BackendError;
pub use types::{Envelope, QueryData, VectorSample};
