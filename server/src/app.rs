//! Core application

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::{MetricsBackend, PrometheusClient};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub backend: Arc<dyn MetricsBackend>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let cli_config = cli::parse();
        let app = Self::init(&cli_config)?;
        Self::start_server(app).await
    }

    pub fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;

        let timeout = config
            .prometheus
            .timeout()
            .context("Configuration error: invalid prometheus.timeout_secs")?;
        let backend = PrometheusClient::new(&config.prometheus.url, timeout)
            .context("Failed to initialize Prometheus client")?;

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            backend: Arc::new(backend),
        })
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        app.shutdown.install_signal_handlers();

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.backend.base_url(),
        );

        ApiServer::new(app).start().await
    }
}
