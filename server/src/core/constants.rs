// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "Kong Metrics API";

/// Application name in lowercase (for paths, identifiers and log filters)
pub const APP_NAME_LOWER: &str = "kong_metrics_server";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".kong-metrics";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "kong-metrics.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "KONG_METRICS_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "KONG_METRICS_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "KONG_METRICS_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "KONG_METRICS_LOG";

// =============================================================================
// Environment Variables - Backend
// =============================================================================

/// Environment variable for the Prometheus base URL
pub const ENV_PROMETHEUS_URL: &str = "PROMETHEUS_URL";

/// Environment variable for the outbound request timeout (seconds, float)
pub const ENV_HTTP_TIMEOUT: &str = "HTTP_TIMEOUT";

// =============================================================================
// Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default Prometheus base URL (docker-compose service name)
pub const DEFAULT_PROMETHEUS_URL: &str = "http://prometheus:9090";

/// Default outbound request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: f64 = 10.0;

// =============================================================================
// Prometheus HTTP API
// =============================================================================

/// Instant query endpoint
pub const PROMETHEUS_QUERY_PATH: &str = "/api/v1/query";

/// Reserved label holding the metric name
pub const METRIC_NAME_LABEL: &str = "__name__";

// =============================================================================
// Kong Metrics
// =============================================================================

/// Prefix shared by every metric exported by the Kong Prometheus plugin
pub const KONG_METRIC_PREFIX: &str = "kong_";

/// Histogram bucket series for request latency
pub const KONG_LATENCY_BUCKET_METRIC: &str = "kong_request_latency_ms_bucket";

/// Labels the latency quantile is grouped by (`le` must stay first)
pub const KONG_LATENCY_GROUP_LABELS: [&str; 4] = ["le", "route", "service", "workspace"];

/// Default quantile for `/kong/latency`
pub const DEFAULT_LATENCY_QUANTILE: f64 = 0.95;

/// Default range window for `/kong/latency`
pub const DEFAULT_LATENCY_WINDOW: &str = "10m";

// =============================================================================
// Response Messages
// =============================================================================

/// Root endpoint greeting
pub const ROOT_MESSAGE: &str = "Kong Prometheus API is running";

/// Returned when a latency query matches no series
pub const NO_LATENCY_DATA_MESSAGE: &str = "No latency data available";

/// Returned when Prometheus answers with an unexpected payload shape
pub const INVALID_UPSTREAM_MESSAGE: &str = "Invalid response from Prometheus";

// =============================================================================
// CORS
// =============================================================================

/// Browser origins allowed to call the API (any port)
pub const CORS_ORIGIN_PATTERN: &str = r"^https?://(localhost|127\.0\.0\.1)(:\d+)?$";
