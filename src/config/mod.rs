// Configuration module entry point
// Loads startup configuration and builds the shared application state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub use state::AppState;
pub use types::{Config, LogFormat, LogLevel, SecretToken};

/// Default configuration file name (without extension)
pub const DEFAULT_CONFIG_PATH: &str = "sheriff";

impl Config {
    /// Load configuration from the default file plus environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// The file is optional. Environment variables named after the keys
    /// (`SSRF_TOKEN`, `WEBHOOK_URL`, ...) override it.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::default())
            .set_default("addr", ":8000")?
            .set_default("ssrf_token", "insert-your-ssrf-token-here")?
            .set_default("webhook_url", "")?
            .set_default("healthcheck_url", "")?
            .set_default("logging_format", "console")?
            .set_default("log_level", "info")?
            .set_default("templates_dir", "templates")?
            .set_default("cache_templates", true)?
            .set_default("read_timeout", 30)?
            .set_default("notify_timeout", 10)?
            .set_default("notify_queue_size", 256)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Resolve the listen address; `:8000` binds every interface
    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        };
        addr.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidAddress {
            addr: self.addr.clone(),
            reason: e.to_string(),
        })
    }

    pub fn token(&self) -> Result<SecretToken, ConfigError> {
        SecretToken::new(&self.ssrf_token)
    }

    pub fn webhook(&self) -> Option<&str> {
        non_empty(&self.webhook_url)
    }

    pub fn healthcheck_path(&self) -> Option<&str> {
        non_empty(&self.healthcheck_url)
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file_name.as_deref().and_then(non_empty)
    }

    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout)
    }

    pub const fn notify_timeout(&self) -> Duration {
        Duration::from_secs(self.notify_timeout)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
