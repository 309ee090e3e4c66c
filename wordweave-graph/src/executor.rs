//! The quality-gated executor: call a tool, score it, retry with feedback
//! or fall back, per the same loop the reference `execute_with_quality_gate`
//! implements.

use std::sync::Arc;

use wordweave_llm::{NoopObserver, Provider, UsageObserver};
use wordweave_supervisor::Supervisor;
use wordweave_tools::{ToolRegistry, ToolCallResult};

use crate::GraphError;

/// Outcome of running a tool through the quality gate to completion
/// (approved, accepted on final retry, or replaced with its fallback).
#[derive(Debug, Clone)]
pub struct GateOutcome {
    /// The value ultimately produced: the tool's output, or its fallback.
    pub value: serde_json::Value,
    /// Whether the value came from an approved or final-retry-accepted
    /// call, as opposed to a fallback.
    pub approved: bool,
    /// The last quality score observed, or `0.0` for a hard execution
    /// failure that never reached the judge.
    pub score: f64,
    /// How many retries were spent before reaching this outcome.
    pub retry_count: u32,
}

/// Drives one tool call through the quality gate: invoke, judge, and
/// either accept, retry with injected feedback, or fall back.
///
/// Generic over the same `(Provider, UsageObserver)` pair as
/// [`Supervisor`] and [`wordweave_llm::Gateway`] — one executor instance
/// is shared across every node in a graph run.
pub struct QualityGatedExecutor<P, O = NoopObserver> {
    supervisor: Arc<Supervisor<P, O>>,
    tools: Arc<ToolRegistry>,
}

impl<P, O> Clone for QualityGatedExecutor<P, O> {
    fn clone(&self) -> Self {
        Self {
            supervisor: Arc::clone(&self.supervisor),
            tools: Arc::clone(&self.tools),
        }
    }
}

impl<P: Provider, O: UsageObserver> QualityGatedExecutor<P, O> {
    /// Build an executor around a shared supervisor and tool registry.
    pub fn new(supervisor: Arc<Supervisor<P, O>>, tools: Arc<ToolRegistry>) -> Self {
        Self { supervisor, tools }
    }

    /// Run `tool_name` through the quality gate: invoke, judge, retry with
    /// feedback up to the supervisor's `max_retries`, then accept or fall
    /// back per `plan_retry_strategy`.
    ///
    /// `pronunciation` is the one tool the reference implementation never
    /// quality-gates (it has no prompt-adherence question to judge, only
    /// whether the TTS call succeeded) — callers route it through
    /// [`Self::execute_without_quality_gate`] instead.
    pub async fn execute_with_quality_gate(
        &self,
        tool_name: &str,
        inputs: serde_json::Value,
    ) -> Result<GateOutcome, GraphError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| GraphError::ToolNotRegistered(tool_name.to_string()))?;

        let mut inputs = inputs;
        let mut retry_count = 0u32;

        loop {
            let call_result = match tool.call(inputs.clone()).await {
                Ok(result) => result,
                Err(err) => {
                    tracing::error!(tool = tool_name, error = %err, retry_count, "tool call failed");
                    return Ok(GateOutcome {
                        value: tool.fallback(),
                        approved: false,
                        score: 0.0,
                        retry_count,
                    });
                }
            };

            let ToolCallResult { value, prompt } = call_result;

            let verdict = self
                .supervisor
                .validate_tool_output(
                    tool_name,
                    &value,
                    &tool.output_schema(),
                    prompt.as_deref().unwrap_or(""),
                )
                .await
                .unwrap_or_else(|err| {
                    tracing::error!(tool = tool_name, error = %err, "supervisor rejected tool name");
                    wordweave_supervisor::QualityVerdict {
                        score: 0.0,
                        issues: vec![err.to_string()],
                        suggestions: Vec::new(),
                    }
                });

            tracing::info!(
                tool = tool_name,
                score = verdict.score,
                retry_count,
                "quality check completed"
            );

            if verdict.passes(self.supervisor.config().quality_threshold) {
                return Ok(GateOutcome {
                    value,
                    approved: true,
                    score: verdict.score,
                    retry_count,
                });
            }

            let strategy = self
                .supervisor
                .plan_retry_strategy(tool_name, &verdict, retry_count);

            if strategy.should_retry {
                retry_count += 1;
                merge_adjusted_inputs(&mut inputs, strategy.adjusted_inputs);
                tracing::info!(
                    tool = tool_name,
                    retry_count,
                    reason = %strategy.retry_reason,
                    "retrying tool call with feedback"
                );
                continue;
            }

            if strategy.accepted {
                return Ok(GateOutcome {
                    value,
                    approved: true,
                    score: verdict.score,
                    retry_count,
                });
            }

            tracing::warn!(
                tool = tool_name,
                reason = %strategy.retry_reason,
                "quality gate exhausted, using fallback"
            );
            return Ok(GateOutcome {
                value: tool.fallback(),
                approved: false,
                score: verdict.score,
                retry_count,
            });
        }
    }

    /// Run `pronunciation`: a single call, no judge, no retry. Failure
    /// falls back to the tool's error-marker output.
    pub async fn execute_without_quality_gate(
        &self,
        tool_name: &str,
        inputs: serde_json::Value,
    ) -> Result<GateOutcome, GraphError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| GraphError::ToolNotRegistered(tool_name.to_string()))?;

        match tool.call(inputs).await {
            Ok(result) => Ok(GateOutcome {
                value: result.value,
                approved: true,
                score: 10.0,
                retry_count: 0,
            }),
            Err(err) => {
                tracing::error!(tool = tool_name, error = %err, "tool call failed");
                Ok(GateOutcome {
                    value: tool.fallback(),
                    approved: false,
                    score: 0.0,
                    retry_count: 0,
                })
            }
        }
    }
}

fn merge_adjusted_inputs(
    inputs: &mut serde_json::Value,
    adjusted: std::collections::HashMap<String, serde_json::Value>,
) {
    if adjusted.is_empty() {
        return;
    }
    if let serde_json::Value::Object(map) = inputs {
        for (key, value) in adjusted {
            map.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicU32, Ordering};
    use wordweave_llm::{Gateway, ProviderError, StructuredRequest, StructuredResponse, TokenUsage};
    use wordweave_supervisor::SupervisorConfig;
    use wordweave_tools::{ToolDyn, ToolError};

    struct JudgeProvider {
        score: f64,
    }

    impl Provider for JudgeProvider {
        fn complete_structured(
            &self,
            _request: StructuredRequest,
        ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
            let score = self.score;
            async move {
                Ok(StructuredResponse {
                    value: serde_json::json!({ "score": score }),
                    usage: TokenUsage::default(),
                    model: "stub".to_string(),
                    cost: None,
                })
            }
        }
    }

    struct CountingTool {
        calls: AtomicU32,
    }

    impl ToolDyn for CountingTool {
        fn name(&self) -> &str {
            "synonyms"
        }
        fn description(&self) -> &str {
            "test tool"
        }
        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        fn output_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        fn call(
            &self,
            _input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                Ok(ToolCallResult::with_prompt(
                    serde_json::json!({"attempt": n}),
                    "give synonyms",
                ))
            })
        }
        fn fallback(&self) -> serde_json::Value {
            serde_json::json!({"note": "ERROR: synonyms tool failed", "synonyms": []})
        }
    }

    struct FailingTool;

    impl ToolDyn for FailingTool {
        fn name(&self) -> &str {
            "examples"
        }
        fn description(&self) -> &str {
            "always fails"
        }
        fn input_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        fn output_schema(&self) -> serde_json::Value {
            serde_json::json!({"type": "object"})
        }
        fn call(
            &self,
            _input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
            Box::pin(async move { Err(ToolError::ExecutionFailed("boom".to_string())) })
        }
        fn fallback(&self) -> serde_json::Value {
            serde_json::json!({"examples": [{"original": "ERROR", "translation": "ERROR"}]})
        }
    }

    fn executor(score: f64, tool: Arc<dyn ToolDyn>) -> QualityGatedExecutor<JudgeProvider, NoopObserver> {
        let supervisor = Arc::new(Supervisor::new(
            Gateway::new(JudgeProvider { score }),
            SupervisorConfig::default(),
        ));
        let mut registry = ToolRegistry::new();
        registry.register(tool);
        QualityGatedExecutor::new(supervisor, Arc::new(registry))
    }

    #[tokio::test]
    async fn high_score_approves_on_first_attempt() {
        let tool = Arc::new(CountingTool { calls: AtomicU32::new(0) });
        let exec = executor(9.0, tool.clone());
        let outcome = exec
            .execute_with_quality_gate("synonyms", serde_json::json!({}))
            .await
            .unwrap();
        assert!(outcome.approved);
        assert_eq!(outcome.retry_count, 0);
    }

    #[tokio::test]
    async fn low_score_retries_then_exhausts_to_fallback() {
        let tool = Arc::new(CountingTool { calls: AtomicU32::new(0) });
        let exec = executor(2.0, tool.clone());
        let outcome = exec
            .execute_with_quality_gate("synonyms", serde_json::json!({}))
            .await
            .unwrap();
        assert!(!outcome.approved);
        assert_eq!(outcome.retry_count, 2);
        assert_eq!(outcome.value, tool.fallback());
        assert_eq!(tool.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn tool_error_falls_back_immediately() {
        let exec = executor(10.0, Arc::new(FailingTool));
        let outcome = exec
            .execute_with_quality_gate("examples", serde_json::json!({}))
            .await
            .unwrap();
        assert!(!outcome.approved);
        assert_eq!(outcome.retry_count, 0);
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let exec = executor(10.0, Arc::new(FailingTool));
        let result = exec
            .execute_with_quality_gate("nonexistent", serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(GraphError::ToolNotRegistered(_))));
    }

    #[tokio::test]
    async fn without_gate_is_a_single_call() {
        let tool = Arc::new(CountingTool { calls: AtomicU32::new(0) });
        let exec = executor(0.0, tool.clone());
        let outcome = exec
            .execute_without_quality_gate("synonyms", serde_json::json!({}))
            .await
            .unwrap();
        assert!(outcome.approved);
        assert_eq!(tool.calls.load(Ordering::SeqCst), 1);
    }
}
