use async_trait::async_trait;
use serde_json::Value;

use super::error::BackendError;
use super::types::{QueryData, VectorSample};
use crate::core::constants::{INVALID_UPSTREAM_MESSAGE, PROMETHEUS_QUERY_PATH};

/// Read-only access to a Prometheus-compatible HTTP API.
///
/// Implementors only provide [`fetch`](MetricsBackend::fetch); the typed
/// helpers are built on top of it so test doubles stay one method long.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Base URL requests are issued against
    fn base_url(&self) -> &str;

    /// `GET {base_url}{path}?{params}`, returning the `data` payload when the
    /// body is enveloped and the parsed body otherwise.
    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, BackendError>;

    /// All values of `label` (`/api/v1/label/{label}/values`)
    async fn label_values(&self, label: &str) -> Result<Vec<String>, BackendError> {
        let path = format!("/api/v1/label/{}/values", label);
        let payload = self.fetch(&path, &[]).await?;
        serde_json::from_value(payload).map_err(|e| {
            tracing::warn!(label, error = %e, "Label values payload is not a list of strings");
            BackendError::invalid(INVALID_UPSTREAM_MESSAGE)
        })
    }

    /// Evaluate `promql` at the current instant and return the vector result
    async fn query_instant(&self, promql: &str) -> Result<Vec<VectorSample>, BackendError> {
        let payload = self
            .fetch(PROMETHEUS_QUERY_PATH, &[("query", promql)])
            .await?;

        let data: QueryData = match payload {
            Value::Object(_) => serde_json::from_value(payload).map_err(|e| {
                tracing::warn!(error = %e, "Instant query result has unexpected shape");
                BackendError::invalid(INVALID_UPSTREAM_MESSAGE)
            })?,
            Value::Null => QueryData::default(),
            _ => return Err(BackendError::invalid(INVALID_UPSTREAM_MESSAGE)),
        };
        Ok(data.into_samples())
    }
}
