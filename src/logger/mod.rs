//! Logger module
//!
//! Provides logging utilities for the calculator service:
//! - Operation outcome logging (`info` on success, `error` on failure)
//! - Server lifecycle and connection logging
//! - Console plus file sinks (error-only and combined)

mod format;
pub mod writer;

#[cfg(test)]
pub use capture::capture;

pub use format::Level;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(&config.logging)
}

/// Write one record at `level`
fn write(level: Level, message: &str) {
    #[cfg(test)]
    if capture::record(level, message) {
        return;
    }

    if let Some(writer) = writer::get() {
        writer.write(level, message);
    } else {
        match level {
            Level::Info => println!("{level}: {message}"),
            Level::Error => eprintln!("{level}: {message}"),
        }
    }
}

pub fn info(message: &str) {
    write(Level::Info, message);
}

pub fn error(message: &str) {
    write(Level::Error, message);
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    info(&format!("Server is running on port {}", addr.port()));
    info(&format!("Listening on: http://{addr}"));
    info(&format!("Log level: {}", config.logging.level));
    if let Some(path) = config.logging.error_log_path() {
        info(&format!("Error log: {path}"));
    }
    if let Some(path) = config.logging.combined_log_path() {
        info(&format!("Combined log: {path}"));
    }
    if let Some(max) = config.performance.max_connections {
        info(&format!("Max connections: {max}"));
    }
}

pub fn log_server_stop(active_connections: usize) {
    info(&format!(
        "Server stopped accepting connections ({active_connections} still active)"
    ));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    error(&format!("Failed to serve connection: {err:?}"));
}

pub fn log_internal_error(method: &str, path: &str, detail: &str) {
    error(&format!("Internal error while handling {method} {path}: {detail}"));
}
