//! Errors from the WebSocket notifier.

use thiserror::Error;

/// Failures sending or managing WebSocket notifications.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Querying the connections table failed.
    #[error("connections table query failed: {0}")]
    Query(String),

    /// Subscribing a connection to a vocab word failed.
    #[error("subscription update failed: {0}")]
    Subscribe(String),
}
