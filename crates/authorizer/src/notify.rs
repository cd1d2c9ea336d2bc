//! Fire-and-forget failure notification.
//!
//! Every authorization failure path dispatches the raw error and the
//! original header value to a [`FailureNotifier`] before the failure is
//! classified into a decision. Dispatch runs on a detached task: it can
//! never block or fail the decision, and notifier failures are discarded.

use crate::errors::AuthError;
use async_trait::async_trait;
use std::sync::Arc;

/// Observability sink for authorization failures.
///
/// Implementations must swallow their own errors; there is no channel for
/// a notification failure to propagate back into the decision flow.
#[async_trait]
pub trait FailureNotifier: Send + Sync {
    /// Record an authorization failure.
    async fn notify(&self, error: &AuthError, authorization_header: &str);
}

/// Default notifier: structured log event per failure.
pub struct LogNotifier;

#[async_trait]
impl FailureNotifier for LogNotifier {
    async fn notify(&self, error: &AuthError, authorization_header: &str) {
        tracing::warn!(
            target: "authorizer.notify",
            error = %error,
            authorization_header = %authorization_header,
            "Authorization failure"
        );
    }
}

/// Dispatch a notification on a detached task.
///
/// Returns immediately; the spawned task's outcome is discarded.
pub fn dispatch(notifier: &Arc<dyn FailureNotifier>, error: &AuthError, authorization_header: &str) {
    let notifier = Arc::clone(notifier);
    let error = error.clone();
    let header = authorization_header.to_string();
    tokio::spawn(async move {
        notifier.notify(&error, &header).await;
    });
}
