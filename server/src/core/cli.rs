use clap::Parser;

use std::path::PathBuf;

use super::constants::{ENV_CONFIG, ENV_HOST, ENV_HTTP_TIMEOUT, ENV_PORT, ENV_PROMETHEUS_URL};

#[derive(Parser)]
#[command(name = "kong-metrics")]
#[command(
    version,
    about = "Simplified HTTP API over Prometheus for Kong gateway metrics",
    long_about = None
)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Prometheus base URL
    #[arg(long, env = ENV_PROMETHEUS_URL)]
    pub prometheus_url: Option<String>,

    /// Timeout for each Prometheus request, in seconds
    #[arg(long, env = ENV_HTTP_TIMEOUT)]
    pub http_timeout: Option<f64>,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub config: Option<PathBuf>,
    pub prometheus_url: Option<String>,
    pub http_timeout: Option<f64>,
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            config: cli.config,
            prometheus_url: cli.prometheus_url,
            http_timeout: cli.http_timeout,
        }
    }
}

/// Parse CLI arguments (with env var fallbacks)
pub fn parse() -> CliConfig {
    Cli::parse().into()
}
