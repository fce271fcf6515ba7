//! Error types
//!
//! Request handling never fails; these cover startup and the alert side path.

use thiserror::Error;

/// Fatal startup errors, reported from `main`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("secret token cannot be sent as an HTTP header value")]
    InvalidToken,

    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build notification client: {0}")]
    NotifyClient(#[source] reqwest::Error),
}

/// Errors from the alert queue and the notification channel.
///
/// Never surfaced to the requester; the worker logs them and moves on.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook responded with status {0}")]
    Status(u16),

    #[error("alert queue is full, alert dropped")]
    QueueFull,

    #[error("alert worker has stopped")]
    WorkerStopped,
}
