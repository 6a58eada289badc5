//! Log record format module
//!
//! Two line formats are produced from the same record:
//! - `simple` for the console (`info: message {"service":...}`)
//! - `json` for log files (one JSON object per line)

use chrono::{Local, SecondsFormat};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Severity level
///
/// Ordered by severity: `Error < Info`, so a record passes a threshold when
/// `record.level <= threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Info,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            other => Err(format!("unknown log level '{other}' (expected 'info' or 'error')")),
        }
    }
}

/// Line format of a sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    Simple,
    Json,
}

/// A single log record
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord<'a> {
    pub level: Level,
    pub message: &'a str,
    pub service: &'a str,
    pub timestamp: String,
}

/// Metadata printed after the message in the simple format
#[derive(Serialize)]
struct Meta<'a> {
    service: &'a str,
    timestamp: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Create a record stamped with the current local time
    pub fn new(level: Level, message: &'a str, service: &'a str) -> Self {
        Self {
            level,
            message,
            service,
            timestamp: Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
        }
    }

    pub fn format(&self, format: LineFormat) -> String {
        match format {
            LineFormat::Simple => self.format_simple(),
            LineFormat::Json => self.format_json(),
        }
    }

    fn format_simple(&self) -> String {
        let meta = Meta {
            service: self.service,
            timestamp: &self.timestamp,
        };
        let meta = serde_json::to_string(&meta).unwrap_or_default();
        format!("{}: {} {meta}", self.level, self.message)
    }

    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"level":"error","message":"failed to encode log record: {e}","service":"{}"}}"#,
                self.service
            )
        })
    }
}
