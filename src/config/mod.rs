// Configuration module entry point
// Layers defaults, an optional config file and the environment

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, HealthConfig, LoggingConfig};

/// Environment variable that overrides `server.port`
pub const PORT_ENV: &str = "PORT";

impl Config {
    /// Load configuration using the first CLI argument as the file path
    /// (without extension), falling back to `config`
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
        Self::load_from(&path)
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_port(config_path, std::env::var(PORT_ENV).ok())
    }

    /// Load configuration with an explicit `PORT` override
    pub fn load_with_port(
        config_path: &str,
        port: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("CALC")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.backlog", 128)?
            .set_default("logging.level", "info")?
            .set_default("logging.service", "calculator-microservice")?
            .set_default("logging.console", true)?
            .set_default("logging.error_log_file", "logs/error.log")?
            .set_default("logging.combined_log_file", "logs/combined.log")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.header_read_timeout", 30)?
            .set_override_option("server.port", port)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
