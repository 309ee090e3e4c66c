//! Errors the graph engine terminates a run with.

use thiserror::Error;
use wordweave_types::{SuggestedWord, WordWeaveError};

/// Reasons the graph stops before reaching `supervisor_final_quality_check`.
///
/// Each of these is a legitimate terminal outcome, not a fault: a word that
/// fails validation or already exists is a correct result for that request,
/// just not one that goes on to persistence and notification.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GraphError {
    /// The source word failed the validation tool's own judgment (not a
    /// quality-gate failure — validation does not get retried on "invalid").
    #[error("source word failed validation: {issue}")]
    ValidationFailed {
        /// Why the word was rejected.
        issue: String,
        /// Alternatives the validation tool suggested instead.
        suggestions: Vec<SuggestedWord>,
    },

    /// Classification found this `(word, target_language)` pair already
    /// stored; the graph stops short of translation and enrichment.
    #[error("word already exists in storage")]
    WordExists {
        /// The previously stored artifact, if the classification tool
        /// returned one alongside `word_exists`.
        existing_item: Option<serde_json::Value>,
    },

    /// One or more of validation, classification, translation did not clear
    /// their quality gate even after retries and the final-retry allowance.
    #[error("sequential quality gate failed: {0:?}")]
    SequentialQualityGateFailed(Vec<String>),

    /// The request-wide deadline elapsed before the graph reached
    /// `processing_complete`.
    #[error("processing deadline exceeded")]
    DeadlineExceeded,

    /// A tool name the graph tried to dispatch has no registered
    /// implementation. Indicates a wiring bug, not a runtime condition.
    #[error("no tool registered for '{0}'")]
    ToolNotRegistered(String),
}

impl From<GraphError> for WordWeaveError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::ValidationFailed { issue, .. } => WordWeaveError::ValidationError(issue),
            GraphError::WordExists { .. } => {
                WordWeaveError::ValidationError("word already exists".to_string())
            }
            GraphError::SequentialQualityGateFailed(steps) => WordWeaveError::ToolExecutionError {
                tool: steps.join(","),
                message: "sequential quality gate failed".to_string(),
            },
            GraphError::DeadlineExceeded => {
                WordWeaveError::DeadlineExceeded(std::time::Duration::from_secs(90))
            }
            GraphError::ToolNotRegistered(name) => WordWeaveError::ToolExecutionError {
                tool: name,
                message: "no tool registered".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failed_maps_to_validation_error() {
        let err = GraphError::ValidationFailed {
            issue: "not a word".to_string(),
            suggestions: Vec::new(),
        };
        assert!(matches!(
            WordWeaveError::from(err),
            WordWeaveError::ValidationError(_)
        ));
    }

    #[test]
    fn deadline_exceeded_maps_to_deadline_exceeded() {
        let err = GraphError::DeadlineExceeded;
        assert!(matches!(
            WordWeaveError::from(err),
            WordWeaveError::DeadlineExceeded(_)
        ));
    }
}
