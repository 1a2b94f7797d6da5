//! HTTP middleware (CORS, 404 handler)

use std::sync::LazyLock;

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method, StatusCode};
use regex::Regex;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::core::constants::CORS_ORIGIN_PATTERN;

static LOCAL_ORIGIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(CORS_ORIGIN_PATTERN).expect("valid CORS origin pattern"));

/// Whether a browser origin is a local development origin (any port)
pub fn is_local_origin(origin: &str) -> bool {
    LOCAL_ORIGIN.is_match(origin)
}

/// Create CORS layer: local origins only, read-only methods, no credentials
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            |origin: &HeaderValue, _parts: &Parts| origin.to_str().is_ok_and(is_local_origin),
        ))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(false)
}

/// Handle 404 Not Found with logging
pub async fn handle_404(req: Request) -> StatusCode {
    tracing::debug!(method = %req.method(), uri = %req.uri(), "[404] No route");
    StatusCode::NOT_FOUND
}
