// Signal handling module
//
// Supported signals:
// - SIGTERM: Graceful shutdown
// - SIGINT:  Graceful shutdown (Ctrl+C)

use std::sync::Arc;
use tokio::sync::Notify;

use crate::logger;

/// Start the shutdown signal listener (Unix)
///
/// Notifies `shutdown` once on SIGTERM or SIGINT. If a handler cannot be
/// registered the error is logged and only the remaining signal is watched.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => Some(s),
            Err(e) => {
                logger::error("Failed to register SIGTERM handler", &[("error", &e.to_string())]);
                None
            }
        };

        let reason = tokio::select! {
            () = async {
                match sigterm.as_mut() {
                    Some(s) => { s.recv().await; }
                    None => std::future::pending::<()>().await,
                }
            } => "SIGTERM",
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    logger::error("Failed to listen for SIGINT", &[("error", &e.to_string())]);
                    return;
                }
                "SIGINT"
            }
        };

        logger::log_shutdown(reason);
        shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            logger::log_shutdown("Ctrl+C");
            shutdown.notify_one();
        }
    });
}
