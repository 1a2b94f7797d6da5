//! Kong metric name listing

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::METRIC_NAME_LABEL;
use crate::data::{BackendError, MetricsBackend};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MetricList {
    pub total: usize,
    pub metrics: Vec<String>,
}

/// Every metric name known to the backend that starts with `prefix`, sorted
pub async fn list_metrics(
    backend: &dyn MetricsBackend,
    prefix: &str,
) -> Result<MetricList, BackendError> {
    let names = backend.label_values(METRIC_NAME_LABEL).await?;
    let scanned = names.len();
    let metrics = filter_by_prefix(names, prefix);

    tracing::debug!(scanned, matched = metrics.len(), prefix, "Listed metrics");

    Ok(MetricList {
        total: metrics.len(),
        metrics,
    })
}

/// Keep names starting with `prefix`, sorted by byte order
pub fn filter_by_prefix(names: Vec<String>, prefix: &str) -> Vec<String> {
    let mut matched: Vec<String> = names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect();
    matched.sort_unstable();
    matched
}
