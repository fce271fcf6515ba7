//! Request handling
//!
//! Entry point for every inbound request: any method, any path.
//! `Received → Dispatched → NotifyDecision (Skip | Sent | Dropped) → Responded`

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::AppState;
use crate::event::RequestEvent;
use crate::http;
use crate::logger;

/// Outcome of the alert step for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyDecision {
    /// Policy said no, or alerts are disabled
    Skip,
    /// Alert accepted by the queue
    Sent,
    /// Alert wanted but the queue refused it
    Dropped,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read. Always answers `200 OK`.
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let event = RequestEvent::from_request(&req, peer_addr);
    Ok(respond(&event, &state).await)
}

/// Dispatch, decide on an alert, and build the response
pub async fn respond(event: &RequestEvent, state: &AppState) -> Response<Full<Bytes>> {
    let artifact = state.dispatcher.render(&event.path).await;
    log_request(event, artifact.content_type);

    // Dropped alerts are already logged by the notifier
    if notify_if_needed(event, state) == NotifyDecision::Sent {
        logger::debug("Alert queued", &[("path", &event.path)]);
    }

    http::build_token_response(artifact, state.dispatcher.token())
}

/// Queue an alert when the policy allows it
///
/// Never waits on delivery; the notifier worker owns the outbound call.
pub fn notify_if_needed(event: &RequestEvent, state: &AppState) -> NotifyDecision {
    match &state.notifier {
        Some(notifier) if state.policy.should_notify(event) => match notifier.notify(event) {
            Ok(()) => NotifyDecision::Sent,
            Err(_) => NotifyDecision::Dropped,
        },
        _ => NotifyDecision::Skip,
    }
}

fn log_request(event: &RequestEvent, content_type: &str) {
    let ip = event.source.to_string();
    let headers = event.headers_display();
    logger::info(
        "New inbound HTTP request",
        &[
            ("ip", &ip),
            ("method", event.method.as_str()),
            ("path", &event.path),
            ("content_type", content_type),
            ("headers", &headers),
        ],
    );
}
