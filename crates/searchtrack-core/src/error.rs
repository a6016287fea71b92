//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The backing store cannot be reached or a query against it failed.
    /// Recording callers swallow and log this; query callers surface it.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An input violated a domain invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Report delivery to the notification collaborator failed.
    /// Never blocks report persistence; logged by the maintenance run.
    #[error("notification failed: {0}")]
    Notification(String),
}
