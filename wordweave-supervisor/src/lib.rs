#![deny(missing_docs)]
//! Quality control for the wordweave vocabulary pipeline.
//!
//! [`Supervisor`] is the LLM-as-judge: it scores a tool's output against
//! its declared schema and the prompt it was given, decides whether a low
//! score earns a retry (with feedback injected into the next attempt), and
//! tells the graph engine which parallel tasks a given state requires.

mod config;
mod router;
mod verdict;

pub use config::SupervisorConfig;
pub use router::tool_tier;
pub use verdict::{quality_verdict_schema, QualityVerdict, RetryStrategy};

use std::collections::{HashMap, HashSet};

use thiserror::Error;
use wordweave_llm::{Gateway, ModelTier, NoopObserver, Provider, StructuredRequest, UsageObserver};
use wordweave_types::PartOfSpeech;

const SKIP_VALIDATION_TOOLS: &[&str] = &["pronunciation"];

const VALIDATION_SYSTEM_MESSAGE: &str = "You are a meticulous language-learning quality reviewer. \
Score the assistant's output for schema compliance, prompt-requirement adherence, and content \
quality. Always respond with a score in [0, 10], and populate issues/suggestions only when the \
score is below the caller's threshold.";

/// Errors raised by the supervisor itself (not the tool calls it judges).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// `validate_tool_output` was asked to judge a tool name it doesn't
    /// recognize. Tool names are fixed at compile time by the graph
    /// (§4.5), so this indicates a caller bug, not a runtime condition.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Scores tool outputs, plans retries, and coordinates the parallel fan-out.
///
/// Generic over the same `(Provider, UsageObserver)` pair as
/// [`wordweave_llm::Gateway`] — the supervisor's judge calls share the same
/// gateway instance (and therefore the same usage observation) as every
/// other LLM-backed tool call in the pipeline.
pub struct Supervisor<P, O = NoopObserver> {
    gateway: Gateway<P, O>,
    config: SupervisorConfig,
}

impl<P: Provider> Supervisor<P, NoopObserver> {
    /// Build a supervisor around a gateway with no usage observation.
    pub fn new(gateway: Gateway<P, NoopObserver>, config: SupervisorConfig) -> Self {
        Self { gateway, config }
    }
}

impl<P: Provider, O: UsageObserver> Supervisor<P, O> {
    /// Build a supervisor around an already-observed gateway.
    pub fn with_gateway(gateway: Gateway<P, O>, config: SupervisorConfig) -> Self {
        Self { gateway, config }
    }

    /// Thresholds this supervisor enforces.
    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Score a tool's output against its schema and the prompt it was given.
    ///
    /// `tool_name` must be one of the eight quality-gated tools (everything
    /// except `pronunciation`, which always short-circuits to a perfect
    /// score). `output_schema` is the tool's declared output JSON Schema;
    /// `result` and `prompt` are the tool's actual output and the prompt
    /// text it was called with.
    pub async fn validate_tool_output(
        &self,
        tool_name: &str,
        result: &serde_json::Value,
        output_schema: &serde_json::Value,
        prompt: &str,
    ) -> Result<QualityVerdict, SupervisorError> {
        if SKIP_VALIDATION_TOOLS.contains(&tool_name) {
            return Ok(QualityVerdict::perfect());
        }

        if tool_name == "media" {
            if let Some(verdict) = self.short_circuit_media(result) {
                return Ok(verdict);
            }
        }

        let result_json = result.to_string();
        let user_prompt = format!(
            "Expected output schema:\n{output_schema}\n\n\
             Prompt given to the assistant:\n{prompt}\n\n\
             Assistant's output:\n{result_json}\n\n\
             Rate the output from 0 to 10. If the score is below {threshold}, list concrete \
             issues and actionable suggestions; otherwise leave both empty.",
            output_schema = output_schema,
            prompt = prompt,
            result_json = result_json,
            threshold = self.config.quality_threshold,
        );

        let request = StructuredRequest::new(
            ModelTier::Supervisor,
            VALIDATION_SYSTEM_MESSAGE,
            user_prompt,
            quality_verdict_schema(),
        );

        match self.gateway.complete::<QualityVerdict>(request).await {
            Ok((mut verdict, _response)) => {
                if verdict.passes(self.config.quality_threshold) {
                    verdict.issues.clear();
                    verdict.suggestions.clear();
                }
                Ok(verdict)
            }
            Err(err) => {
                tracing::error!(tool = tool_name, error = %err, "quality validation call failed");
                Ok(QualityVerdict {
                    score: 5.0,
                    issues: vec![format!("quality validation failed: {err}")],
                    suggestions: vec!["manual review recommended".to_string()],
                })
            }
        }
    }

    /// Media gets a bespoke short-circuit ahead of the generic judge call:
    /// a result that already carries three well-formed `https://…jpg`
    /// variant URLs is accepted outright, as is an explicit
    /// `api_fallback` marker (Pexels unreachable) — there is nothing a
    /// judge call would add in either case, and retry-looping on an
    /// external outage serves nobody.
    fn short_circuit_media(&self, result: &serde_json::Value) -> Option<QualityVerdict> {
        if result.get("api_fallback").and_then(serde_json::Value::as_bool) == Some(true) {
            return Some(QualityVerdict::perfect());
        }

        let src = result.get("media").and_then(|m| m.get("src"))?;
        let src = src.as_object()?;
        const EXPECTED_KEYS: [&str; 3] = ["large2x", "large", "medium"];
        let has_all_keys = EXPECTED_KEYS.iter().all(|k| src.contains_key(*k))
            && src.len() == EXPECTED_KEYS.len();
        if !has_all_keys {
            return None;
        }
        let all_well_formed = src.values().all(|v| {
            v.as_str()
                .is_some_and(|s| s.starts_with("https://") && s.ends_with(".jpg"))
        });
        if all_well_formed {
            Some(QualityVerdict::perfect())
        } else {
            None
        }
    }

    /// Decide whether a failing verdict earns a retry, and what feedback to
    /// merge into the tool's inputs for the next attempt.
    pub fn plan_retry_strategy(
        &self,
        tool_name: &str,
        verdict: &QualityVerdict,
        retry_count: u32,
    ) -> RetryStrategy {
        if verdict.passes(self.config.quality_threshold) {
            return RetryStrategy::accept("score meets quality threshold");
        }

        if retry_count >= self.config.max_retries {
            return if verdict.score >= self.config.accept_on_final {
                RetryStrategy::accept(format!(
                    "final retry with acceptable score ({} >= {})",
                    verdict.score, self.config.accept_on_final
                ))
            } else {
                RetryStrategy::exhausted("maximum retries reached")
            };
        }

        let mut adjusted_inputs = HashMap::new();
        if accepts_feedback(tool_name) && (!verdict.issues.is_empty() || !verdict.suggestions.is_empty()) {
            adjusted_inputs.insert(
                "quality_feedback".to_string(),
                serde_json::json!(format!(
                    "Quality score: {}/10. Please address the issues and follow the suggestions below.",
                    verdict.score
                )),
            );
            adjusted_inputs.insert("previous_issues".to_string(), serde_json::json!(verdict.issues));
            adjusted_inputs.insert("suggestions".to_string(), serde_json::json!(verdict.suggestions));
        }

        let mut retry_reason = format!(
            "quality score {} below threshold {}",
            verdict.score, self.config.quality_threshold
        );
        if !verdict.issues.is_empty() {
            retry_reason.push_str(&format!(". issues: {}", verdict.issues.join("; ")));
        }

        RetryStrategy::retry(retry_reason, adjusted_inputs)
    }

    /// Determine which parallel-branch tools a state requires: the four
    /// core tasks always run, `conjugation` joins them for verbs, and
    /// `pronunciation` always runs last (it consumes the syllable list).
    pub fn coordinate_parallel_tasks(&self, target_part_of_speech: PartOfSpeech) -> Vec<String> {
        let mut tasks: Vec<String> = ["media", "examples", "synonyms", "syllables"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        if target_part_of_speech.is_conjugatable() {
            tasks.push("conjugation".to_string());
        }

        tasks.push("pronunciation".to_string());
        tasks
    }
}

fn accepts_feedback(tool_name: &str) -> bool {
    const FEEDBACK_TOOLS: &[&str] = &[
        "synonyms",
        "examples",
        "media",
        "translation",
        "validation",
        "classification",
        "syllables",
        "conjugation",
    ];
    FEEDBACK_TOOLS.contains(&tool_name)
}

/// The fixed set of tool names this supervisor knows how to judge, used to
/// validate `tool_name` arguments at call sites that build prompts.
pub fn known_tools() -> HashSet<&'static str> {
    [
        "validation",
        "classification",
        "translation",
        "examples",
        "synonyms",
        "syllables",
        "conjugation",
        "media",
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use wordweave_llm::{ProviderError, StructuredResponse, TokenUsage};

    struct StubProvider {
        value: serde_json::Value,
    }

    impl Provider for StubProvider {
        fn complete_structured(
            &self,
            _request: StructuredRequest,
        ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
            let value = self.value.clone();
            async move {
                Ok(StructuredResponse {
                    value,
                    usage: TokenUsage::default(),
                    model: "stub-supervisor".to_string(),
                    cost: None,
                })
            }
        }
    }

    struct FailingProvider;

    impl Provider for FailingProvider {
        fn complete_structured(
            &self,
            _request: StructuredRequest,
        ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
            async { Err(ProviderError::RequestFailed("down".to_string())) }
        }
    }

    fn supervisor_with(value: serde_json::Value) -> Supervisor<StubProvider, NoopObserver> {
        Supervisor::new(Gateway::new(StubProvider { value }), SupervisorConfig::default())
    }

    #[tokio::test]
    async fn pronunciation_skips_validation() {
        let supervisor = supervisor_with(serde_json::json!({"score": 0.0}));
        let verdict = supervisor
            .validate_tool_output("pronunciation", &serde_json::json!({}), &serde_json::json!({}), "")
            .await
            .unwrap();
        assert_eq!(verdict.score, 10.0);
    }

    #[tokio::test]
    async fn media_with_well_formed_urls_short_circuits() {
        let supervisor = supervisor_with(serde_json::json!({"score": 0.0}));
        let result = serde_json::json!({
            "media": {
                "src": {
                    "large2x": "https://cdn.example.com/a.jpg",
                    "large": "https://cdn.example.com/b.jpg",
                    "medium": "https://cdn.example.com/c.jpg",
                }
            }
        });
        let verdict = supervisor
            .validate_tool_output("media", &result, &serde_json::json!({}), "")
            .await
            .unwrap();
        assert_eq!(verdict.score, 10.0);
    }

    #[tokio::test]
    async fn media_api_fallback_short_circuits() {
        let supervisor = supervisor_with(serde_json::json!({"score": 0.0}));
        let result = serde_json::json!({"api_fallback": true});
        let verdict = supervisor
            .validate_tool_output("media", &result, &serde_json::json!({}), "")
            .await
            .unwrap();
        assert_eq!(verdict.score, 10.0);
    }

    #[tokio::test]
    async fn media_without_short_circuit_falls_through_to_judge() {
        let supervisor = supervisor_with(serde_json::json!({"score": 9.0}));
        let result = serde_json::json!({"media": {"src": {}}, "search_query": ["cat"]});
        let verdict = supervisor
            .validate_tool_output("media", &result, &serde_json::json!({}), "")
            .await
            .unwrap();
        assert_eq!(verdict.score, 9.0);
    }

    #[tokio::test]
    async fn high_score_clears_issues_and_suggestions() {
        let supervisor = supervisor_with(serde_json::json!({
            "score": 9.0,
            "issues": ["should not survive"],
            "suggestions": ["should not survive"]
        }));
        let verdict = supervisor
            .validate_tool_output("translation", &serde_json::json!({}), &serde_json::json!({}), "prompt")
            .await
            .unwrap();
        assert!(verdict.issues.is_empty());
        assert!(verdict.suggestions.is_empty());
    }

    #[tokio::test]
    async fn judge_call_failure_yields_manual_review_score() {
        let supervisor = Supervisor::new(Gateway::new(FailingProvider), SupervisorConfig::default());
        let verdict = supervisor
            .validate_tool_output("translation", &serde_json::json!({}), &serde_json::json!({}), "prompt")
            .await
            .unwrap();
        assert_eq!(verdict.score, 5.0);
        assert!(verdict.issues[0].contains("quality validation failed"));
    }

    #[test]
    fn plan_retry_strategy_accepts_above_threshold() {
        let supervisor = supervisor_with(serde_json::json!({}));
        let verdict = QualityVerdict {
            score: 8.0,
            ..Default::default()
        };
        let strategy = supervisor.plan_retry_strategy("translation", &verdict, 0);
        assert!(!strategy.should_retry);
    }

    #[test]
    fn plan_retry_strategy_retries_below_threshold_with_budget_left() {
        let supervisor = supervisor_with(serde_json::json!({}));
        let verdict = QualityVerdict {
            score: 6.0,
            issues: vec!["bad grammar".to_string()],
            suggestions: vec!["fix it".to_string()],
        };
        let strategy = supervisor.plan_retry_strategy("translation", &verdict, 0);
        assert!(strategy.should_retry);
        assert!(strategy.adjusted_inputs.contains_key("quality_feedback"));
        assert!(strategy.adjusted_inputs.contains_key("previous_issues"));
        assert!(strategy.adjusted_inputs.contains_key("suggestions"));
    }

    #[test]
    fn plan_retry_strategy_accepts_on_final_retry_above_accept_on_final() {
        let supervisor = supervisor_with(serde_json::json!({}));
        let verdict = QualityVerdict {
            score: 7.25,
            ..Default::default()
        };
        let strategy = supervisor.plan_retry_strategy("translation", &verdict, 2);
        assert!(!strategy.should_retry);
        assert!(strategy.accepted);
        assert!(strategy.retry_reason.contains("final retry"));
    }

    #[test]
    fn plan_retry_strategy_gives_up_below_accept_on_final() {
        let supervisor = supervisor_with(serde_json::json!({}));
        let verdict = QualityVerdict {
            score: 7.0,
            ..Default::default()
        };
        let strategy = supervisor.plan_retry_strategy("translation", &verdict, 2);
        assert!(!strategy.should_retry);
        assert!(!strategy.accepted);
        assert_eq!(strategy.retry_reason, "maximum retries reached");
    }

    #[test]
    fn plan_retry_strategy_skips_feedback_for_tools_that_dont_accept_it() {
        let supervisor = supervisor_with(serde_json::json!({}));
        let verdict = QualityVerdict {
            score: 6.0,
            issues: vec!["x".to_string()],
            suggestions: vec![],
        };
        let strategy = supervisor.plan_retry_strategy("pronunciation", &verdict, 0);
        assert!(strategy.adjusted_inputs.is_empty());
    }

    #[test]
    fn coordinate_parallel_tasks_includes_conjugation_only_for_verbs() {
        let supervisor = supervisor_with(serde_json::json!({}));
        let noun_tasks = supervisor.coordinate_parallel_tasks(PartOfSpeech::MasculineNoun);
        assert!(!noun_tasks.contains(&"conjugation".to_string()));
        assert_eq!(noun_tasks.last().unwrap(), "pronunciation");

        let verb_tasks = supervisor.coordinate_parallel_tasks(PartOfSpeech::Verb);
        assert!(verb_tasks.contains(&"conjugation".to_string()));
        assert_eq!(verb_tasks.last().unwrap(), "pronunciation");
    }
}
