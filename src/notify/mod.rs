//! Operator notification module
//!
//! Decides which requests deserve an alert and delivers alerts off the
//! response path.

pub mod channel;
pub mod policy;
pub mod queue;

pub use channel::{AlertMessage, NotificationChannel, SlackWebhook};
pub use policy::{should_notify, NotificationPolicy, HEALTH_CHECK_SIGNATURE};
pub use queue::{AlertWorker, Notifier};
