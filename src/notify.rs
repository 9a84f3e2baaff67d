//! User-facing notifications
//!
//! The client never renders anything itself; embedders inject a
//! [`Notifier`] and decide how messages reach the user (toast, status
//! bar, stderr).

use tracing::{error, info};

/// Capability for surfacing messages to the user
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);

    fn success(&self, message: &str);
}

/// Discards all notifications
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn error(&self, _message: &str) {}

    fn success(&self, _message: &str) {}
}

/// Forwards notifications to the `tracing` subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        error!(target: "lms_client::notify", "{message}");
    }

    fn success(&self, message: &str) {
        info!(target: "lms_client::notify", "{message}");
    }
}
