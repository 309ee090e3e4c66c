//! Wire-independent types for a single structured-completion call.
//!
//! These are the internal lingua franca — not any one provider's wire
//! format. Providers convert to/from these.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which routing tier a call should use.
///
/// Tool calls start on [`ModelTier::Executor`] and escalate to
/// [`ModelTier::Supervisor`] on retry; every quality-gate check always
/// uses [`ModelTier::Supervisor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTier {
    /// Cheap model used for first-attempt tool calls.
    Executor,
    /// Strong model used for quality checks and retried tool calls.
    Supervisor,
}

/// A request for a single structured completion: one system message, one
/// user message, and a JSON Schema the reply must conform to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredRequest {
    /// Which routing tier resolves the model for this call.
    pub tier: ModelTier,
    /// System instructions.
    pub system: String,
    /// The user message (prompt text, possibly including prior feedback).
    pub user: String,
    /// JSON Schema the response must validate against.
    pub response_schema: serde_json::Value,
    /// Maximum output tokens.
    pub max_tokens: Option<u32>,
    /// Sampling temperature. Pinned to 0 by every caller in this pipeline —
    /// deterministic judge and deterministic extraction alike.
    pub temperature: f64,
}

impl StructuredRequest {
    /// Build a request with temperature pinned to 0, as every call site requires.
    pub fn new(
        tier: ModelTier,
        system: impl Into<String>,
        user: impl Into<String>,
        response_schema: serde_json::Value,
    ) -> Self {
        Self {
            tier,
            system: system.into(),
            user: user.into(),
            response_schema,
            max_tokens: None,
            temperature: 0.0,
        }
    }

    /// Override the default max-tokens budget.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Token usage from a single provider call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input (prompt) tokens consumed.
    pub prompt_tokens: u64,
    /// Output (completion) tokens generated.
    pub completion_tokens: u64,
    /// Tokens read from cache, if the provider supports it.
    pub cache_read_tokens: Option<u64>,
}

impl TokenUsage {
    /// Total tokens across prompt and completion.
    pub fn total_tokens(&self) -> u64 {
        self.prompt_tokens + self.completion_tokens
    }
}

/// Response from a structured-completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredResponse {
    /// The parsed JSON value, already validated against the request's schema.
    pub value: serde_json::Value,
    /// Token usage for this call.
    pub usage: TokenUsage,
    /// The model actually used (after tier resolution).
    pub model: String,
    /// Cost calculated by the provider, if known.
    pub cost: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_request_pins_temperature_to_zero() {
        let req = StructuredRequest::new(ModelTier::Executor, "sys", "usr", json!({}));
        assert_eq!(req.temperature, 0.0);
    }

    #[test]
    fn token_usage_total() {
        let usage = TokenUsage {
            prompt_tokens: 120,
            completion_tokens: 40,
            cache_read_tokens: None,
        };
        assert_eq!(usage.total_tokens(), 160);
    }

    #[test]
    fn model_tier_roundtrip() {
        for tier in [ModelTier::Executor, ModelTier::Supervisor] {
            let json = serde_json::to_string(&tier).unwrap();
            let back: ModelTier = serde_json::from_str(&json).unwrap();
            assert_eq!(tier, back);
        }
    }
}
