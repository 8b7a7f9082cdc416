/// Structured logging for the monitoring service.
///
/// Context-rich logging with source and sensor identifiers, timestamps,
/// and severity levels. Supports console output and an optional append-only
/// log file for unattended runs.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline stages
// ---------------------------------------------------------------------------

/// Which part of the pipeline a log entry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Generator,
    Ingest,
    Engine,
    Export,
    System,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Generator => write!(f, "GEN"),
            Source::Ingest => write!(f, "INGEST"),
            Source::Engine => write!(f, "ENGINE"),
            Source::Export => write!(f, "EXPORT"),
            Source::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to emit.
    min_level: LogLevel,
    /// Optional file path for logging.
    log_file: Option<String>,
}

impl Logger {
    /// Initialize the global logger.
    pub fn init(min_level: LogLevel, log_file: Option<String>) {
        let logger = Logger { min_level, log_file };
        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: Source, sensor_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let sensor_part = sensor_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let entry = format!("{} {} {}{}: {}", timestamp, level, source, sensor_part, message);

        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", entry),
            LogLevel::Info | LogLevel::Debug => println!("{}", entry),
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>) {
    Logger::init(min_level, log_file.map(String::from));
}

/// Log a general informational message.
pub fn info(source: Source, sensor_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, source, sensor_id, message);
    }
}

/// Log a warning message.
pub fn warn(source: Source, sensor_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, source, sensor_id, message);
    }
}

/// Log an error message.
pub fn error(source: Source, sensor_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, source, sensor_id, message);
    }
}

/// Log a debug message.
pub fn debug(source: Source, sensor_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, source, sensor_id, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_source_tags_are_distinct() {
        let tags = [
            Source::Generator.to_string(),
            Source::Ingest.to_string(),
            Source::Engine.to_string(),
            Source::Export.to_string(),
            Source::System.to_string(),
        ];
        let mut seen = std::collections::HashSet::new();
        for tag in &tags {
            assert!(seen.insert(tag), "duplicate source tag '{}'", tag);
        }
    }

    #[test]
    fn test_logging_without_init_is_a_no_op() {
        // Must not panic when the global logger was never initialized.
        info(Source::System, None, "no logger configured");
    }
}
