//! Latency quantiles from the Kong request latency histogram

mod query;

pub use query::{LabelFilter, LatencyQuery};

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::constants::{
    DEFAULT_LATENCY_QUANTILE, DEFAULT_LATENCY_WINDOW, INVALID_UPSTREAM_MESSAGE,
    NO_LATENCY_DATA_MESSAGE,
};
use crate::data::prometheus::VectorSample;
use crate::data::{BackendError, MetricsBackend};

fn default_quantile() -> f64 {
    DEFAULT_LATENCY_QUANTILE
}

fn default_window() -> String {
    DEFAULT_LATENCY_WINDOW.to_string()
}

/// Query-string parameters of `/kong/latency`
#[derive(Debug, Clone, PartialEq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatencyParams {
    /// Kong service name, e.g. `new-service`
    pub service: Option<String>,
    /// Kong route name, e.g. `mock-api-route`
    pub route: Option<String>,
    /// Quantile to compute (0.95 = p95); not range-checked
    #[serde(default = "default_quantile")]
    pub quantile: f64,
    /// PromQL range window, e.g. `10m`, `30m`, `1h`; passed through verbatim
    #[serde(default = "default_window")]
    pub window: String,
}

impl Default for LatencyParams {
    fn default() -> Self {
        Self {
            service: None,
            route: None,
            quantile: DEFAULT_LATENCY_QUANTILE,
            window: default_window(),
        }
    }
}

impl LatencyParams {
    pub fn to_query(&self) -> LatencyQuery {
        LatencyQuery {
            quantile: self.quantile,
            window: self.window.clone(),
            filter: LabelFilter::new()
                .with("service", self.service.as_deref())
                .with("route", self.route.as_deref()),
        }
    }
}

/// Quantile for one (service, route, workspace) series
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LatencyRecord {
    pub service: Option<String>,
    pub route: Option<String>,
    pub workspace: Option<String>,
    /// Requested quantile
    pub p: f64,
    pub window: String,
    /// Quantile in milliseconds, rounded to 2 decimals
    pub latency_ms: f64,
}

impl LatencyRecord {
    fn from_sample(sample: &VectorSample, params: &LatencyParams) -> Result<Self, BackendError> {
        let value = sample.parse_value().ok_or_else(|| {
            tracing::warn!(value = %sample.value.1, "Non-numeric sample value");
            BackendError::invalid(INVALID_UPSTREAM_MESSAGE)
        })?;

        Ok(Self {
            service: sample.label("service").map(str::to_string),
            route: sample.label("route").map(str::to_string),
            workspace: sample.label("workspace").map(str::to_string),
            p: params.quantile,
            window: params.window.clone(),
            latency_ms: round2(value),
        })
    }
}

/// Response of `/kong/latency`; its JSON shape depends on how many series matched
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum LatencyReport {
    /// Multiple series: `{query, results: [...]}`
    Multiple {
        query: String,
        results: Vec<LatencyRecord>,
    },
    /// Exactly one series: the record's fields plus `query`
    Single {
        #[serde(flatten)]
        record: LatencyRecord,
        query: String,
    },
    /// No series: `{message, query}`
    NoData { message: String, query: String },
}

impl LatencyReport {
    /// Shape `samples` by cardinality
    pub fn from_samples(
        samples: &[VectorSample],
        params: &LatencyParams,
        query: String,
    ) -> Result<Self, BackendError> {
        match samples {
            [] => Ok(Self::NoData {
                message: NO_LATENCY_DATA_MESSAGE.to_string(),
                query,
            }),
            [sample] => Ok(Self::Single {
                record: LatencyRecord::from_sample(sample, params)?,
                query,
            }),
            _ => {
                let results = samples
                    .iter()
                    .map(|s| LatencyRecord::from_sample(s, params))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Multiple { query, results })
            }
        }
    }

    pub fn query(&self) -> &str {
        match self {
            Self::Multiple { query, .. }
            | Self::Single { query, .. }
            | Self::NoData { query, .. } => query,
        }
    }
}

/// Build the PromQL for `params`, run it, and shape the result
pub async fn latency(
    backend: &dyn MetricsBackend,
    params: &LatencyParams,
) -> Result<LatencyReport, BackendError> {
    let promql = params.to_query().to_promql();
    tracing::debug!(promql = %promql, "Running latency query");

    let samples = backend.query_instant(&promql).await?;
    tracing::debug!(series = samples.len(), "Latency query returned");

    LatencyReport::from_samples(&samples, params, promql)
}

/// Round half away from zero to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prometheus::testing::FakeBackend;
    use serde_json::json;

    fn sample(metric: serde_json::Value, value: &str) -> VectorSample {
        serde_json::from_value(json!({"metric": metric, "value": [1717000000.0, value]})).unwrap()
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(100.0), 100.0);
        assert_eq!(round2(0.005), 0.01);
        assert_eq!(round2(-3.456), -3.46);
    }

    #[test]
    fn test_params_defaults_from_empty_query() {
        let params: LatencyParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params, LatencyParams::default());
        assert_eq!(params.quantile, 0.95);
        assert_eq!(params.window, "10m");
    }

    #[test]
    fn test_params_to_query_filter() {
        let params = LatencyParams {
            service: Some("svc-a".to_string()),
            ..Default::default()
        };
        assert_eq!(params.to_query().filter.to_string(), r#"{service="svc-a"}"#);
    }

    #[test]
    fn test_no_data_report() {
        let params = LatencyParams::default();
        let query = params.to_query().to_promql();
        let report = LatencyReport::from_samples(&[], &params, query.clone()).unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"message": "No latency data available", "query": query})
        );
    }

    #[test]
    fn test_single_report_is_flat() {
        let params = LatencyParams::default();
        let samples = [sample(json!({"workspace": "ws1"}), "12.345")];
        let report = LatencyReport::from_samples(&samples, &params, "q".to_string()).unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "service": null,
                "route": null,
                "workspace": "ws1",
                "p": 0.95,
                "window": "10m",
                "latency_ms": 12.35,
                "query": "q"
            })
        );
    }

    #[test]
    fn test_multiple_report_is_list() {
        let params = LatencyParams {
            quantile: 0.5,
            window: "30m".to_string(),
            ..Default::default()
        };
        let samples = [
            sample(
                json!({"service": "a", "route": "r1", "workspace": "default"}),
                "10",
            ),
            sample(json!({"service": "b"}), "20.129"),
        ];
        let report = LatencyReport::from_samples(&samples, &params, "q".to_string()).unwrap();

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({
                "query": "q",
                "results": [
                    {"service": "a", "route": "r1", "workspace": "default",
                     "p": 0.5, "window": "30m", "latency_ms": 10.0},
                    {"service": "b", "route": null, "workspace": null,
                     "p": 0.5, "window": "30m", "latency_ms": 20.13}
                ]
            })
        );
    }

    #[test]
    fn test_non_numeric_value_is_invalid_response() {
        let params = LatencyParams::default();
        let samples = [sample(json!({}), "fast")];
        let err = LatencyReport::from_samples(&samples, &params, "q".to_string()).unwrap_err();
        assert!(matches!(err, BackendError::InvalidResponse(_)));
    }

    #[test]
    fn test_nan_value_serializes_as_null() {
        let params = LatencyParams::default();
        let samples = [sample(json!({}), "NaN")];
        let report = LatencyReport::from_samples(&samples, &params, "q".to_string()).unwrap();
        assert_eq!(serde_json::to_value(&report).unwrap()["latency_ms"], json!(null));
    }

    #[tokio::test]
    async fn test_latency_sends_constructed_query() {
        let backend = FakeBackend::ok(json!({"resultType": "vector", "result": []}));
        let params = LatencyParams {
            service: Some("svc-a".to_string()),
            route: Some("r1".to_string()),
            ..Default::default()
        };
        let report = latency(&backend, &params).await.unwrap();

        let sent = backend.last_param("query").unwrap();
        assert_eq!(report.query(), sent);
        assert!(sent.contains(r#"kong_request_latency_ms_bucket{service="svc-a",route="r1"}[10m]"#));
        assert!(matches!(report, LatencyReport::NoData { .. }));
    }

    #[tokio::test]
    async fn test_latency_null_result_is_no_data() {
        let backend = FakeBackend::ok(json!({"resultType": "vector", "result": null}));
        let report = latency(&backend, &LatencyParams::default()).await.unwrap();
        assert!(matches!(report, LatencyReport::NoData { .. }));
    }

    #[tokio::test]
    async fn test_latency_propagates_backend_error() {
        let backend = FakeBackend::failing(BackendError::invalid("boom"));
        let err = latency(&backend, &LatencyParams::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }
}
