// Configuration types module
// Defines the startup configuration and the values derived from it

use hyper::header::HeaderValue;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Main configuration structure
///
/// Read once at startup; immutable afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Listen address, `host:port` or `:port`
    pub addr: String,
    pub ssrf_token: String,
    /// Slack-compatible incoming webhook, empty disables alerts
    #[serde(default)]
    pub webhook_url: String,
    /// Path substring that marks health probes, empty disables the check
    #[serde(default)]
    pub healthcheck_url: String,
    pub logging_format: LogFormat,
    #[serde(default)]
    pub log_file_name: Option<String>,
    pub log_level: LogLevel,
    pub templates_dir: String,
    pub cache_templates: bool,
    #[serde(default)]
    pub workers: Option<usize>,
    pub read_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
    pub notify_timeout: u64,
    pub notify_queue_size: usize,
}

/// Log line encoding
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Console,
    Json,
}

/// Minimum level written by the logger
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// The secret embedded into every response.
///
/// Cheap to clone; the header form is validated once at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretToken {
    value: Arc<str>,
    header: HeaderValue,
}

impl SecretToken {
    pub fn new(value: &str) -> Result<Self, ConfigError> {
        let header = HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidToken)?;
        Ok(Self {
            value: Arc::from(value),
            header,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub const fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

// Keeps the token out of `{:?}` dumps of the app state.
impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretToken")
            .field("len", &self.value.len())
            .finish()
    }
}
