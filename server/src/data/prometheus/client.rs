use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::backend::MetricsBackend;
use super::error::BackendError;
use super::types::Envelope;

/// reqwest-backed Prometheus client.
///
/// Holds no per-request state; a single instance is shared across handlers.
#[derive(Debug, Clone)]
pub struct PrometheusClient {
    client: reqwest::Client,
    base_url: String,
}

impl PrometheusClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("kong-metrics/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        let base_url = base_url.trim().trim_end_matches('/').to_string();
        tracing::debug!(
            base_url = %base_url,
            timeout_ms = timeout.as_millis() as u64,
            "Prometheus client initialized"
        );

        Ok(Self { client, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl MetricsBackend for PrometheusClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, BackendError> {
        let url = self.url(path);
        tracing::debug!(path, "Prometheus request");

        let result: Result<Value, reqwest::Error> = async {
            self.client
                .get(&url)
                .query(params)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
        }
        .await;

        match result {
            Ok(body) => Ok(Envelope::from_body(body).into_payload()),
            Err(e) => {
                tracing::warn!(path, error = %e, "Prometheus request failed");
                Err(BackendError::Transport(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            PrometheusClient::new("http://prometheus:9090/ ", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://prometheus:9090");
        assert_eq!(
            client.url("/api/v1/query"),
            "http://prometheus:9090/api/v1/query"
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // nothing listens on port 1
        let client = PrometheusClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = client.fetch("/api/v1/query", &[("query", "up")]).await.unwrap_err();

        assert!(matches!(err, BackendError::Transport(_)));
        assert!(err.to_string().starts_with("Upstream error: "));
    }
}
