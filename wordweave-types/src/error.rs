//! The top-level error taxonomy every layer's errors fold into.

use thiserror::Error;

/// Errors surfaced to the request-intake boundary.
///
/// Each variant corresponds to one entry of the error taxonomy: the
/// boundary matches on this enum once to decide whether a record is
/// redeliverable.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum WordWeaveError {
    /// The inbound request body failed schema validation.
    #[error("invalid request: {0}")]
    InputError(String),

    /// The source word did not pass the validation tool.
    #[error("word validation failed: {0}")]
    ValidationError(String),

    /// A tool exhausted its retries or threw; the fallback was used.
    #[error("tool {tool} failed: {message}")]
    ToolExecutionError {
        /// Name of the tool that failed.
        tool: String,
        /// Error message.
        message: String,
    },

    /// A persistence operation failed for a reason other than a duplicate write.
    #[error("persistence fault: {0}")]
    PersistenceFault(String),

    /// The request-wide deadline elapsed before the graph completed.
    #[error("deadline exceeded after {0:?}")]
    DeadlineExceeded(std::time::Duration),

    /// Catch-all for errors propagated from a lower layer.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl WordWeaveError {
    /// Whether the upstream queue should redeliver this record.
    ///
    /// Input and validation errors are permanent for this record's content;
    /// everything else is transient and worth a retry.
    pub fn is_redeliverable(&self) -> bool {
        !matches!(
            self,
            WordWeaveError::InputError(_) | WordWeaveError::ValidationError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_and_validation_errors_are_not_redeliverable() {
        assert!(!WordWeaveError::InputError("empty word".into()).is_redeliverable());
        assert!(!WordWeaveError::ValidationError("nonsense".into()).is_redeliverable());
    }

    #[test]
    fn everything_else_is_redeliverable() {
        assert!(WordWeaveError::PersistenceFault("timeout".into()).is_redeliverable());
        assert!(WordWeaveError::DeadlineExceeded(std::time::Duration::from_secs(90))
            .is_redeliverable());
        assert!(WordWeaveError::ToolExecutionError {
            tool: "media".into(),
            message: "boom".into()
        }
        .is_redeliverable());
    }
}
