//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::middleware;
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{health, kong};
use crate::core::CoreApp;
use crate::data::MetricsBackend;

pub struct ApiServer {
    app: CoreApp,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        Self { app }
    }

    /// Full application router over `backend`
    pub fn router(backend: Arc<dyn MetricsBackend>) -> Router {
        let root_routes = Router::new()
            .route("/", get(health::root))
            .with_state(backend.clone());

        Router::new()
            .merge(root_routes)
            .route("/health", get(health::health))
            .route("/api/openapi.json", get(openapi_json))
            .route("/api/docs", get(swagger_ui_html))
            .route("/api/docs/", get(swagger_ui_html))
            .nest("/kong", kong::routes(backend))
            .fallback(middleware::handle_404)
            .layer(middleware::cors())
            .layer(TraceLayer::new_for_http())
    }

    /// Serve until the shutdown signal fires
    pub async fn start(self) -> Result<()> {
        let Self { app } = self;

        let host = app.config.server.host.as_str();
        let port = app.config.server.port;

        let router = Self::router(app.backend.clone());

        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind {}:{}", host, port))?;
        let addr: SocketAddr = listener.local_addr()?;
        tracing::info!(%addr, "Listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(app.shutdown.wait())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
