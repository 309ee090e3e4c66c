//! Configuration for the gateway's two routing tiers.

/// Static model routing configuration shared by every provider binding.
///
/// Per §4.3: quality checks always use `supervisor_model`; tool calls use
/// `executor_model` on attempt 0 and escalate to `supervisor_model` once
/// `retry_count > 1`.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Model identifier used for first-attempt tool calls.
    pub executor_model: String,

    /// Model identifier used for quality checks and escalated tool calls.
    pub supervisor_model: String,

    /// Default maximum output tokens per call.
    pub default_max_tokens: u32,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            executor_model: String::new(),
            supervisor_model: String::new(),
            default_max_tokens: 4096,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = GatewayConfig::default();
        assert!(config.executor_model.is_empty());
        assert!(config.supervisor_model.is_empty());
        assert_eq!(config.default_max_tokens, 4096);
    }

    #[test]
    fn custom_config_values() {
        let config = GatewayConfig {
            executor_model: "gpt-4o-mini".into(),
            supervisor_model: "claude-sonnet-4".into(),
            default_max_tokens: 2048,
        };
        assert_eq!(config.executor_model, "gpt-4o-mini");
        assert_eq!(config.supervisor_model, "claude-sonnet-4");
        assert_eq!(config.default_max_tokens, 2048);
    }
}
