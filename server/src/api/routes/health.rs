//! Root and health check endpoints

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use utoipa::ToSchema;

use crate::core::constants::ROOT_MESSAGE;
use crate::data::MetricsBackend;

#[derive(Serialize, ToSchema)]
pub struct RootResponse {
    pub message: &'static str,
    pub backend_url: String,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Service banner with the configured Prometheus URL
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Service is running", body = RootResponse)
    )
)]
pub async fn root(State(backend): State<Arc<dyn MetricsBackend>>) -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE,
        backend_url: backend.base_url().to_string(),
    })
}

/// Health check endpoint (does not contact Prometheus)
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
