//! Cheap-vs-strong model routing for tool calls.

use wordweave_llm::ModelTier;

/// Resolve the [`ModelTier`] a tool call should use for its next attempt.
///
/// Attempt 0 and the first retry use the cheap [`ModelTier::Executor`];
/// once a tool has already failed twice (`retry_count > 1`) the call
/// escalates to [`ModelTier::Supervisor`]. Quality-check calls never go
/// through this function — they always use [`ModelTier::Supervisor`],
/// fixed at the call site in [`crate::Supervisor::validate_tool_output`].
pub fn tool_tier(retry_count: u32) -> ModelTier {
    if retry_count > 1 {
        ModelTier::Supervisor
    } else {
        ModelTier::Executor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempts_use_executor() {
        assert_eq!(tool_tier(0), ModelTier::Executor);
        assert_eq!(tool_tier(1), ModelTier::Executor);
    }

    #[test]
    fn later_retries_escalate() {
        assert_eq!(tool_tier(2), ModelTier::Supervisor);
        assert_eq!(tool_tier(5), ModelTier::Supervisor);
    }
}
