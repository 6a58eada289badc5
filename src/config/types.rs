// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Listen backlog passed to `listen(2)`
    pub backlog: i32,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Threshold level: `info` or `error`
    pub level: String,
    /// Service name attached to every record
    pub service: String,
    /// Mirror records to stdout/stderr
    pub console: bool,
    /// Error-only log file (disabled when unset or empty)
    #[serde(default)]
    pub error_log_file: Option<String>,
    /// All-events log file (disabled when unset or empty)
    #[serde(default)]
    pub combined_log_file: Option<String>,
}

impl LoggingConfig {
    /// Error-only log file, `None` when disabled
    pub fn error_log_path(&self) -> Option<&str> {
        self.error_log_file.as_deref().filter(|p| !p.is_empty())
    }

    /// All-events log file, `None` when disabled
    pub fn combined_log_path(&self) -> Option<&str> {
        self.combined_log_file.as_deref().filter(|p| !p.is_empty())
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// Serve several requests per connection
    pub keep_alive: bool,
    /// Seconds allowed to receive a request head, 0 for no limit
    pub header_read_timeout: u64,
    pub max_connections: Option<u64>,
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RoutesConfig {
    /// Health check configuration
    #[serde(default)]
    pub health: HealthConfig,
}

/// Health check configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    /// Enable health check endpoints
    #[serde(default = "default_health_enabled")]
    pub enabled: bool,
    /// Liveness probe path (default: /healthz)
    #[serde(default = "default_healthz_path")]
    pub liveness_path: String,
    /// Readiness probe path (default: /readyz)
    #[serde(default = "default_readyz_path")]
    pub readiness_path: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_health_enabled() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_healthz_path() -> String {
    "/healthz".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_readyz_path() -> String {
    "/readyz".to_string()
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: default_health_enabled(),
            liveness_path: default_healthz_path(),
            readiness_path: default_readyz_path(),
        }
    }
}

impl HealthConfig {
    /// Whether `path` is one of the enabled probe paths
    pub fn is_probe(&self, path: &str) -> bool {
        self.enabled && (path == self.liveness_path || path == self.readiness_path)
    }
}
