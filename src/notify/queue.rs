//! Alert queue
//!
//! Requests hand alerts to a bounded queue and return immediately; a
//! background worker delivers them one attempt each.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

use super::channel::{AlertMessage, NotificationChannel};
use crate::error::NotifyError;
use crate::event::RequestEvent;
use crate::logger;

/// Handle used by request handlers to submit alerts
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<AlertMessage>,
}

impl Notifier {
    /// Start the delivery worker on the current tokio runtime
    pub fn spawn<C: NotificationChannel>(channel: C, capacity: usize) -> (Self, AlertWorker) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let close = Arc::new(Notify::new());
        let handle = tokio::spawn(run_worker(channel, rx, Arc::clone(&close)));
        (Self { tx }, AlertWorker { handle, close })
    }

    /// Queue an alert for `event`
    ///
    /// Never waits for room: a full queue or stopped worker drops the alert,
    /// logs a warning and returns the reason.
    pub fn notify(&self, event: &RequestEvent) -> Result<(), NotifyError> {
        self.enqueue(AlertMessage::for_event(event)).inspect_err(|e| {
            logger::warn(
                "Alert not queued",
                &[("error", &e.to_string()), ("path", &event.path)],
            );
        })
    }

    pub fn enqueue(&self, message: AlertMessage) -> Result<(), NotifyError> {
        self.tx.try_send(message).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => NotifyError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => NotifyError::WorkerStopped,
        })
    }
}

/// Handle on the background delivery task
#[derive(Debug)]
pub struct AlertWorker {
    handle: JoinHandle<()>,
    close: Arc<Notify>,
}

impl AlertWorker {
    /// Close the queue and wait up to `timeout` for queued alerts
    ///
    /// Outstanding `Notifier` clones get `WorkerStopped` from then on.
    /// Returns `false` if the worker was still busy when time ran out.
    pub async fn drain(self, timeout: Duration) -> bool {
        self.close.notify_one();
        tokio::time::timeout(timeout, self.handle).await.is_ok()
    }
}

/// Deliver queued alerts until the queue is closed and empty
///
/// The queue closes when `close` fires or every `Notifier` is dropped.
async fn run_worker<C: NotificationChannel>(
    channel: C,
    mut rx: mpsc::Receiver<AlertMessage>,
    close: Arc<Notify>,
) {
    let mut closing = false;
    loop {
        let next = tokio::select! {
            message = rx.recv() => message,
            () = close.notified(), if !closing => {
                closing = true;
                rx.close();
                continue;
            }
        };
        let Some(message) = next else {
            break;
        };
        match channel.deliver(&message).await {
            Ok(()) => logger::debug("Alert delivered", &[]),
            Err(e) => logger::error("Failed to send alert", &[("error", &e.to_string())]),
        }
    }
    logger::debug("Alert worker stopped", &[]);
}
