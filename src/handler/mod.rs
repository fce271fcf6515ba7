//! Request handler module
//!
//! Turns each inbound request into the token response and, when warranted,
//! an operator alert.

pub mod request;

// Re-export main entry point
pub use request::{handle_request, NotifyDecision};
