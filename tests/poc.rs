//! Proof of Concept: composability patterns without live API keys.
//!
//! Demonstrates two of the patterns the `Provider`/`Gateway` split enables:
//!
//! 1. **Provider swap** — same tool, different stub LLM backend.
//! 2. **Threshold swap** — same judge verdict, different supervisor config
//!    deciding retry vs. accept.
//!
//! All tests run without API keys using stub providers.

use std::future::Future;

use serde_json::json;
use wordweave_llm::{Gateway, ModelTier, ProviderError, StructuredRequest, StructuredResponse, TokenUsage};
use wordweave_supervisor::{Supervisor, SupervisorConfig};
use wordweave_tools::ToolDyn;
use wordweave_tools_llm::TranslationTool;

// ───────────────────────────────────────────────────────────
// Stub providers — canned responses, no network
// ───────────────────────────────────────────────────────────

struct StubProvider {
    value: serde_json::Value,
}

impl wordweave_llm::Provider for StubProvider {
    fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
        let value = self.value.clone();
        async move {
            Ok(StructuredResponse {
                value,
                usage: TokenUsage {
                    prompt_tokens: 12,
                    completion_tokens: 6,
                    cache_read_tokens: None,
                },
                model: match request.tier {
                    ModelTier::Executor => "stub-executor".to_string(),
                    ModelTier::Supervisor => "stub-supervisor".to_string(),
                },
                cost: None,
            })
        }
    }
}

fn translation_input() -> serde_json::Value {
    json!({
        "source_word": "house",
        "source_language": "English",
        "target_language": "German",
        "source_part_of_speech": "masculine noun",
    })
}

// ───────────────────────────────────────────────────────────
// Pattern 1: Provider swap
// ───────────────────────────────────────────────────────────

#[tokio::test]
async fn translation_tool_is_agnostic_to_which_provider_backs_the_gateway() {
    let house = StubProvider {
        value: json!({
            "target_word": "Haus",
            "target_part_of_speech": "neuter noun",
            "target_article": "das",
            "english_word": "house",
        }),
    };
    let cottage = StubProvider {
        value: json!({
            "target_word": "Huette",
            "target_part_of_speech": "feminine noun",
            "target_article": "die",
            "english_word": "cottage",
        }),
    };

    let tool_a = TranslationTool::new(Gateway::new(house));
    let tool_b = TranslationTool::new(Gateway::new(cottage));

    let result_a = tool_a.call(translation_input()).await.unwrap();
    let result_b = tool_b.call(translation_input()).await.unwrap();

    assert_eq!(result_a.value["target_word"], "Haus");
    assert_eq!(result_b.value["target_word"], "Huette");
}

// ───────────────────────────────────────────────────────────
// Pattern 2: Threshold swap
// ───────────────────────────────────────────────────────────

fn supervisor_with(value: serde_json::Value, config: SupervisorConfig) -> Supervisor<StubProvider> {
    Supervisor::new(Gateway::new(StubProvider { value }), config)
}

#[tokio::test]
async fn same_verdict_retries_or_accepts_depending_on_supervisor_config() {
    let verdict = json!({"score": 7.5, "issues": [], "suggestions": []});

    let strict = supervisor_with(verdict.clone(), SupervisorConfig::default());
    let lenient = supervisor_with(
        verdict,
        SupervisorConfig {
            quality_threshold: 7.0,
            ..SupervisorConfig::default()
        },
    );

    let strict_verdict = strict
        .validate_tool_output("translation", &json!({}), &json!({}), "prompt")
        .await
        .unwrap();
    let lenient_verdict = lenient
        .validate_tool_output("translation", &json!({}), &json!({}), "prompt")
        .await
        .unwrap();

    assert!(!strict_verdict.passes(strict.config().quality_threshold));
    assert!(lenient_verdict.passes(lenient.config().quality_threshold));

    let strategy = strict.plan_retry_strategy("translation", &strict_verdict, 0);
    assert!(strategy.should_retry);
}
