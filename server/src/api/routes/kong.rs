//! Kong metrics endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::ApiQuery;
use crate::api::types::{ApiError, ErrorBody};
use crate::core::constants::KONG_METRIC_PREFIX;
use crate::data::MetricsBackend;
use crate::domain::{self, LatencyParams, LatencyReport, MetricList};

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct KongApiState {
    pub backend: Arc<dyn MetricsBackend>,
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes(backend: Arc<dyn MetricsBackend>) -> Router<()> {
    let state = KongApiState { backend };
    Router::new()
        .route("/metrics", get(list_metrics))
        .route("/latency", get(latency))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// List all metric names exported by Kong
#[utoipa::path(
    get,
    path = "/kong/metrics",
    tag = "kong",
    responses(
        (status = 200, description = "Sorted `kong_` metric names", body = MetricList),
        (status = 502, description = "Prometheus unreachable or returned an unexpected payload", body = ErrorBody)
    )
)]
pub async fn list_metrics(
    State(state): State<KongApiState>,
) -> Result<Json<MetricList>, ApiError> {
    let list = domain::list_metrics(state.backend.as_ref(), KONG_METRIC_PREFIX).await?;
    Ok(Json(list))
}

/// Request latency quantile from `kong_request_latency_ms_bucket`.
///
/// Zero matching series yields `{message, query}`, one yields a flat record
/// plus `query`, more than one yields `{query, results}`.
#[utoipa::path(
    get,
    path = "/kong/latency",
    tag = "kong",
    params(LatencyParams),
    responses(
        (status = 200, description = "Latency quantile per series", body = LatencyReport),
        (status = 400, description = "Malformed query parameters", body = ErrorBody),
        (status = 502, description = "Prometheus unreachable or returned an unexpected payload", body = ErrorBody)
    )
)]
pub async fn latency(
    State(state): State<KongApiState>,
    ApiQuery(params): ApiQuery<LatencyParams>,
) -> Result<Json<LatencyReport>, ApiError> {
    let report = domain::latency(state.backend.as_ref(), &params).await?;
    Ok(Json(report))
}
