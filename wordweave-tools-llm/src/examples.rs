//! The examples tool, grounded on `examples_tool.py`'s `get_examples`.
//!
//! Unlike the other generic tools, the reference never threads quality
//! feedback into this one's prompt — `node_get_examples` has no retry loop
//! in the original graph keyed off feedback fields, so this tool accepts
//! none either.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_tools::schema::ExamplesOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::Language;

const SYSTEM_LINGUISTIC_SPECIALIST: &str = "You are a linguistic expert. Be accurate and natural.";

#[derive(Debug, Deserialize)]
struct ExamplesInput {
    source_word: String,
    target_word: String,
    source_language: Language,
    target_language: Language,
}

/// Generates two to three bilingual example sentences using the word and
/// its translation.
pub struct ExamplesTool<P, O> {
    gateway: Gateway<P, O>,
}

impl<P: Provider, O: UsageObserver> ExamplesTool<P, O> {
    /// Build an examples tool around the given gateway.
    pub fn new(gateway: Gateway<P, O>) -> Self {
        Self { gateway }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for ExamplesTool<P, O> {
    fn name(&self) -> &str {
        "examples"
    }

    fn description(&self) -> &str {
        "Generates bilingual example sentences using the source and target words."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["source_word", "target_word", "source_language", "target_language"],
            "properties": {
                "source_word": {"type": "string"},
                "target_word": {"type": "string"},
                "source_language": {"type": "string"},
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
            let input: ExamplesInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let prompt = format!(
                "Create 2 to 3 bilingual example sentences using '{}' ({}) and '{}' ({}). Real-life \
                 contexts, medium length, everyday conversations. The context should be in {}.",
                input.source_word,
                input.source_language.display_name(),
                input.target_word,
                input.target_language.display_name(),
                input.source_language.display_name(),
            );

            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_LINGUISTIC_SPECIALIST, prompt.clone(), output_schema());
            let (output, _): (ExamplesOutput, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(ExamplesOutput::fallback()).unwrap()
    }
}

fn output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["examples"],
        "properties": {
            "examples": {
                "type": "array",
                "minItems": 2,
                "maxItems": 3,
                "items": {
                    "type": "object",
                    "required": ["original", "translation"],
                    "properties": {
                        "original": {"type": "string", "minLength": 20},
                        "translation": {"type": "string", "minLength": 20},
                        "context": {"type": "string"}
                    }
                }
            }
        }
    })
}
