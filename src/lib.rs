//! SSRF sheriff
//!
//! A catch-all HTTP endpoint for detecting server-side request forgery.
//! Every request gets `200 OK` with a secret token embedded in a body whose
//! format follows the path's extension; genuine hits raise a webhook alert.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod handler;
pub mod http;
pub mod logger;
pub mod notify;
pub mod server;

pub use config::{AppState, Config, SecretToken};
pub use dispatch::{Dispatcher, ResponseArtifact};
pub use error::{ConfigError, NotifyError};
pub use event::RequestEvent;
pub use notify::{should_notify, Notifier};
