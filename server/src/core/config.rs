use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, TryFromFloatSecsError};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::utils::path::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PORT,
    DEFAULT_PROMETHEUS_URL,
};

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Prometheus backend configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PrometheusFileConfig {
    pub url: Option<String>,
    /// Per-request timeout in seconds (fractions allowed)
    pub timeout_secs: Option<f64>,
}

/// Root of a JSON config file
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub prometheus: Option<PrometheusFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if let Some(prometheus) = other.prometheus {
            let current = self
                .prometheus
                .get_or_insert_with(PrometheusFileConfig::default);
            if prometheus.url.is_some() {
                tracing::trace!(url = ?prometheus.url, "Merging prometheus.url");
                current.url = prometheus.url;
            }
            if prometheus.timeout_secs.is_some() {
                tracing::trace!(
                    timeout_secs = ?prometheus.timeout_secs,
                    "Merging prometheus.timeout_secs"
                );
                current.timeout_secs = prometheus.timeout_secs;
            }
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Prometheus backend configuration
#[derive(Debug, Clone)]
pub struct PrometheusConfig {
    pub url: String,
    pub timeout_secs: f64,
}

impl PrometheusConfig {
    /// Timeout as a `Duration`; fails for negative, non-finite or overflowing values
    pub fn timeout(&self) -> Result<Duration, TryFromFloatSecsError> {
        Duration::try_from_secs_f64(self.timeout_secs)
    }
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub prometheus: PrometheusConfig,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.kong-metrics/kong-metrics.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let file_server = file_config.server.unwrap_or_default();
        let file_prometheus = file_config.prometheus.unwrap_or_default();

        // Layer: defaults -> file config -> CLI/env overrides
        let config = Self {
            server: ServerConfig {
                host: cli
                    .host
                    .clone()
                    .or(file_server.host)
                    .unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT),
            },
            prometheus: PrometheusConfig {
                url: cli
                    .prometheus_url
                    .clone()
                    .or(file_prometheus.url)
                    .unwrap_or_else(|| DEFAULT_PROMETHEUS_URL.to_string()),
                timeout_secs: cli
                    .http_timeout
                    .or(file_prometheus.timeout_secs)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
            },
        };

        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            prometheus_url = %config.prometheus.url,
            timeout_secs = config.prometheus.timeout_secs,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port 0 would bind to a random port
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        let url = self.prometheus.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!(
                "Configuration error: prometheus.url must start with http:// or https:// (got '{}')",
                self.prometheus.url
            );
        }

        let timeout = self.prometheus.timeout_secs;
        if timeout <= 0.0 || self.prometheus.timeout().is_err() {
            anyhow::bail!(
                "Configuration error: prometheus.timeout_secs must be a positive number (got {})",
                timeout
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.kong-metrics/kong-metrics.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
