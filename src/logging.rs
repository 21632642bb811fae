/// Structured logging for the cyclone monitoring service
///
/// Provides context-rich logging with data-source and provider identifiers,
/// timestamps, and severity levels. Supports both console output
/// and file-based logging for daemon operations.

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
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Weather,
    Provider,
    Database,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Weather => write!(f, "WX"),
            DataSource::Provider => write!(f, "SMS"),
            DataSource::Database => write!(f, "DB"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the weather API drops out routinely and the cycle
    /// has a configured default to fall back on
    Expected,
    /// Unexpected failure - indicates service degradation or a configuration
    /// issue (bad credentials, API contract change)
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    /// Log a message with the global logger
    fn log(&self, level: LogLevel, source: &DataSource, context: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        // Format the log entry
        let context_part = context.map(|c| format!(" [{}]", c)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, context_part, message
        );

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, context_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, context_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Log a general informational message
pub fn info(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, &source, context, message);
    }
}

/// Log a warning message
pub fn warn(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, &source, context, message);
    }
}

/// Log an error message
pub fn error(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, &source, context, message);
    }
}

/// Log a debug message
pub fn debug(source: DataSource, context: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, &source, context, message);
    }
}

// ---------------------------------------------------------------------------
// Failure Classification Helpers
// ---------------------------------------------------------------------------

/// Classify a weather API failure based on the error message
pub fn classify_weather_failure(error_message: &str) -> FailureType {
    // Timeouts and connection drops are routine for the free OWM tier;
    // the evaluation cycle substitutes the configured default reading.
    if error_message.contains("timed out") || error_message.contains("connect") {
        FailureType::Expected
    }
    // Auth failures mean a bad or expired API key
    else if error_message.contains("401") || error_message.contains("403") {
        FailureType::Unexpected
    }
    // Parse errors suggest API changes or bugs
    else if error_message.contains("error decoding") || error_message.contains("missing field") {
        FailureType::Unexpected
    } else {
        FailureType::Unknown
    }
}

/// Classify a messaging provider failure
pub fn classify_provider_failure(error_message: &str) -> FailureType {
    // 401/403 means the credential itself is wrong - failover masks the
    // symptom but the configuration needs fixing
    if error_message.contains("HTTP 401") || error_message.contains("HTTP 403") {
        FailureType::Unexpected
    }
    // Provider-side 5xx and transport errors are what failover exists for
    else if error_message.contains("HTTP 5") || error_message.contains("transport error") {
        FailureType::Expected
    } else {
        FailureType::Unknown
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a weather source failure with automatic classification
pub fn log_weather_failure(city: &str, err: &dyn std::error::Error) {
    let error_msg = err.to_string();
    let failure_type = classify_weather_failure(&error_msg);

    let message = format!("fetch failed [{}]: {}", failure_type, error_msg);

    match failure_type {
        FailureType::Expected => debug(DataSource::Weather, Some(city), &message),
        FailureType::Unexpected => error(DataSource::Weather, Some(city), &message),
        FailureType::Unknown => warn(DataSource::Weather, Some(city), &message),
    }
}

/// Log a failed provider attempt with classification
pub fn log_provider_failure(provider_label: &str, error_message: &str) {
    let failure_type = classify_provider_failure(error_message);

    let message = format!("attempt failed [{}]: {}", failure_type, error_message);

    match failure_type {
        FailureType::Expected => warn(DataSource::Provider, Some(provider_label), &message),
        FailureType::Unexpected => error(DataSource::Provider, Some(provider_label), &message),
        FailureType::Unknown => warn(DataSource::Provider, Some(provider_label), &message),
    }
}

/// Log a record sink failure (never fatal to the evaluation cycle)
pub fn log_sink_failure(operation: &str, err: &dyn std::error::Error) {
    warn(
        DataSource::Database,
        None,
        &format!("{} failed: {}", operation, err),
    );
}

// ---------------------------------------------------------------------------
// Dispatch Summary Logging
// ---------------------------------------------------------------------------

/// Log the result of a full failover dispatch
pub fn log_dispatch_summary(total_providers: usize, winner: Option<&str>, failed_attempts: usize) {
    match winner {
        Some(label) => {
            let message = format!(
                "Dispatch complete: delivered via '{}' after {} failed attempt(s) ({} configured)",
                label, failed_attempts, total_providers
            );
            if failed_attempts == 0 {
                info(DataSource::Provider, None, &message);
            } else {
                warn(DataSource::Provider, None, &message);
            }
        }
        None => {
            error(
                DataSource::Provider,
                None,
                &format!(
                    "Dispatch failed: all {} provider(s) exhausted",
                    total_providers
                ),
            );
        }
    }
}
