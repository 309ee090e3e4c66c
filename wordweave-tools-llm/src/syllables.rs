//! The syllables tool, grounded on `syllables_tool.py`'s `get_syllables`.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_tools::schema::SyllablesOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::Language;

const SYSTEM_LINGUISTIC_SPECIALIST: &str = "You are a linguistic expert. Be accurate and natural.";

#[derive(Debug, Deserialize)]
struct SyllablesInput {
    target_word: String,
    target_language: Language,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Breaks a word down into syllables with a learner-friendly phonetic guide.
pub struct SyllablesTool<P, O> {
    gateway: Gateway<P, O>,
}

impl<P: Provider, O: UsageObserver> SyllablesTool<P, O> {
    /// Build a syllables tool around the given gateway.
    pub fn new(gateway: Gateway<P, O>) -> Self {
        Self { gateway }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for SyllablesTool<P, O> {
    fn name(&self) -> &str {
        "syllables"
    }

    fn description(&self) -> &str {
        "Breaks a word into syllables with a phonetic guide."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["target_word", "target_language"],
            "properties": {
                "target_word": {"type": "string"},
                "target_language": {"type": "string"}
            }
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        output_schema()
    }

    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let input: SyllablesInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let base_prompt = format!(
                "Break '{}' ({}) into syllables and provide a simple, learner-friendly ASCII phonetic \
                 guide (no IPA).",
                input.target_word,
                input.target_language.display_name(),
            );

            let prompt = crate::feedback::with_feedback(
                base_prompt,
                &[
                    "Syllables must concatenate back to the original word",
                    "Phonetic guide uses plain ASCII, never IPA symbols",
                ],
                input.quality_feedback.as_deref(),
                &input.previous_issues,
                &input.suggestions,
            );

            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_LINGUISTIC_SPECIALIST, prompt.clone(), output_schema());
            let (output, _): (SyllablesOutput, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(SyllablesOutput::fallback("")).unwrap()
    }
}

fn output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["syllables", "phonetic_guide"],
        "properties": {
            "syllables": {"type": "array", "minItems": 1, "items": {"type": "string"}},
            "phonetic_guide": {"type": "string"}
        }
    })
}
