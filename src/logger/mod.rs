//! Logger module
//!
//! Structured logging for the sheriff:
//! - Leveled events with `key=value` fields
//! - Console or JSON encoding
//! - Optional file mirror of stdout

mod format;
pub mod writer;

pub use format::LogRecord;

use crate::config::{Config, LogFormat, LogLevel};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(config.logging_format, config.log_level, config.log_file())
}

/// Format and write an event through the global writer
///
/// Before `init` runs (unit tests, early startup) events go to stdout in
/// console format at `info` and above.
pub fn log(level: LogLevel, message: &str, fields: &[(&str, &str)]) {
    let record = LogRecord::new(level, message, fields);
    match writer::get() {
        Some(w) if w.enabled(level) => w.write_line(&record.format(w.format())),
        Some(_) => {}
        None if level >= LogLevel::Info => println!("{}", record.format(LogFormat::Console)),
        None => {}
    }
}

pub fn debug(message: &str, fields: &[(&str, &str)]) {
    log(LogLevel::Debug, message, fields);
}

pub fn info(message: &str, fields: &[(&str, &str)]) {
    log(LogLevel::Info, message, fields);
}

pub fn warn(message: &str, fields: &[(&str, &str)]) {
    log(LogLevel::Warn, message, fields);
}

pub fn error(message: &str, fields: &[(&str, &str)]) {
    log(LogLevel::Error, message, fields);
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    let addr = addr.to_string();
    let workers = config
        .workers
        .map_or_else(|| "auto".to_string(), |w| w.to_string());
    let alerts = if config.webhook().is_some() {
        "enabled"
    } else {
        "disabled"
    };
    info(
        "SSRF sheriff listening",
        &[
            ("addr", &addr),
            ("workers", &workers),
            ("alerts", alerts),
            ("templates_dir", &config.templates_dir),
        ],
    );
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    error("Failed to serve connection", &[("error", &err.to_string())]);
}

pub fn log_shutdown(reason: &str) {
    info("Shutting down", &[("reason", reason)]);
}
