//! Log writer module
//!
//! Fans each record out to the configured sinks: console, an error-only
//! file and an all-events file. Files are opened once in append mode.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use super::format::{Level, LineFormat, LogRecord};
use crate::config::LoggingConfig;

/// Global log writer instance
static LOG_WRITER: OnceLock<LogWriter> = OnceLock::new();

/// Log output target
enum LogTarget {
    /// stdout for info, stderr for error
    Console,
    /// Append-only file
    File(Mutex<File>),
}

/// One output with its own threshold and line format
struct Sink {
    target: LogTarget,
    threshold: Level,
    format: LineFormat,
}

/// Thread-safe log writer
pub struct LogWriter {
    /// Records less severe than this are dropped
    level: Level,
    /// Service name stamped on every record
    service: String,
    sinks: Vec<Sink>,
}

impl LogWriter {
    /// Build a writer from logging configuration, opening log files
    pub fn new(config: &LoggingConfig) -> io::Result<Self> {
        let level = config
            .level
            .parse::<Level>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let mut sinks = Vec::with_capacity(3);
        if config.console {
            sinks.push(Sink {
                target: LogTarget::Console,
                threshold: Level::Info,
                format: LineFormat::Simple,
            });
        }
        if let Some(path) = config.error_log_path() {
            sinks.push(Sink {
                target: LogTarget::File(Mutex::new(open_log_file(path)?)),
                threshold: Level::Error,
                format: LineFormat::Json,
            });
        }
        if let Some(path) = config.combined_log_path() {
            sinks.push(Sink {
                target: LogTarget::File(Mutex::new(open_log_file(path)?)),
                threshold: Level::Info,
                format: LineFormat::Json,
            });
        }

        Ok(Self {
            level,
            service: config.service.clone(),
            sinks,
        })
    }

    /// Write one record to every sink that accepts its level
    pub fn write(&self, level: Level, message: &str) {
        if level > self.level {
            return;
        }
        let record = LogRecord::new(level, message, &self.service);
        for sink in self.sinks.iter().filter(|s| level <= s.threshold) {
            write_to_target(&sink.target, level, &record.format(sink.format));
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

/// Write a formatted line to a log target
fn write_to_target(target: &LogTarget, level: Level, line: &str) {
    match target {
        LogTarget::Console => match level {
            Level::Info => println!("{line}"),
            Level::Error => eprintln!("{line}"),
        },
        LogTarget::File(file) => {
            if let Ok(mut f) = file.lock() {
                let _ = writeln!(f, "{line}");
            }
        }
    }
}

/// Initialize the global log writer
///
/// This should be called once at application startup.
/// Returns error if log files cannot be opened.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    let writer = LogWriter::new(config)?;
    LOG_WRITER.set(writer).map_err(|_| {
        io::Error::new(
            io::ErrorKind::AlreadyExists,
            "Log writer already initialized",
        )
    })
}

/// Get the global log writer, if initialized
pub fn get() -> Option<&'static LogWriter> {
    LOG_WRITER.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let n = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "calc-server-log-test-{}-{n}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn file_config(dir: &Path, level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            service: "calculator-microservice".to_string(),
            console: false,
            error_log_file: Some(dir.join("logs/error.log").to_string_lossy().into_owned()),
            combined_log_file: Some(dir.join("logs/combined.log").to_string_lossy().into_owned()),
        }
    }

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_error_goes_to_both_files_info_only_combined() {
        let dir = scratch_dir();
        let writer = LogWriter::new(&file_config(&dir, "info")).unwrap();

        writer.write(Level::Info, "Addition operation completed");
        writer.write(Level::Error, "Division by zero is not allowed.");

        let errors = read_lines(&dir.join("logs/error.log"));
        let combined = read_lines(&dir.join("logs/combined.log"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["level"], "error");
        assert_eq!(errors[0]["message"], "Division by zero is not allowed.");

        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0]["message"], "Addition operation completed");
        assert_eq!(combined[1]["level"], "error");
        assert_eq!(combined[1]["service"], "calculator-microservice");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_error_threshold_drops_info() {
        let dir = scratch_dir();
        let writer = LogWriter::new(&file_config(&dir, "error")).unwrap();

        writer.write(Level::Info, "Square root operation completed");
        writer.write(Level::Error, "boom");

        let combined = read_lines(&dir.join("logs/combined.log"));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0]["message"], "boom");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_files_are_appended() {
        let dir = scratch_dir();
        let config = file_config(&dir, "info");

        LogWriter::new(&config).unwrap().write(Level::Info, "first");
        LogWriter::new(&config).unwrap().write(Level::Info, "second");

        let combined = read_lines(&dir.join("logs/combined.log"));
        assert_eq!(combined.len(), 2);
        assert_eq!(combined[1]["message"], "second");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_empty_path_disables_file_sink() {
        let dir = scratch_dir();
        let mut config = file_config(&dir, "info");
        config.error_log_file = Some(String::new());

        let writer = LogWriter::new(&config).unwrap();
        writer.write(Level::Error, "boom");

        assert!(!dir.join("logs/error.log").exists());
        assert_eq!(read_lines(&dir.join("logs/combined.log")).len(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unknown_level_rejected() {
        let dir = scratch_dir();
        let err = LogWriter::new(&file_config(&dir, "verbose")).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
