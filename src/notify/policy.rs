//! Alert decision policy
//!
//! Decides whether a request is worth an operator alert. Health probes from
//! load balancers and monitors are filtered out.

use crate::event::RequestEvent;

/// User-Agent substring sent by AWS ELB health checks
pub const HEALTH_CHECK_SIGNATURE: &str = "ELB-HealthChecker/";

/// Static inputs to the alert decision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationPolicy {
    pub healthcheck_path: Option<String>,
    pub webhook_configured: bool,
}

impl NotificationPolicy {
    pub fn should_notify(&self, event: &RequestEvent) -> bool {
        should_notify(
            event,
            self.healthcheck_path.as_deref(),
            self.webhook_configured,
        )
    }
}

/// Evaluated in order, first match wins:
/// 1. health-check User-Agent: skip
/// 2. no webhook configured: skip
/// 3. path contains the healthcheck substring: skip
/// 4. notify
pub fn should_notify(
    event: &RequestEvent,
    healthcheck_path: Option<&str>,
    webhook_configured: bool,
) -> bool {
    if event.user_agent().contains(HEALTH_CHECK_SIGNATURE) {
        return false;
    }
    if !webhook_configured {
        return false;
    }
    if healthcheck_path.is_some_and(|hc| event.path.contains(hc)) {
        return false;
    }
    true
}
