//! The synonyms tool, grounded on `synonyms_tool.py`'s `get_synonyms`.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_tools::schema::SynonymsOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::{Language, PartOfSpeech};

const SYSTEM_LINGUISTIC_SPECIALIST: &str = "You are a linguistic expert. Be accurate and natural.";

#[derive(Debug, Deserialize)]
struct SynonymsInput {
    target_word: String,
    source_language: Language,
    target_language: Language,
    target_part_of_speech: PartOfSpeech,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Finds one to three synonyms for the translated word, with explanations
/// of nuance written in the source language.
pub struct SynonymsTool<P, O> {
    gateway: Gateway<P, O>,
}

impl<P: Provider, O: UsageObserver> SynonymsTool<P, O> {
    /// Build a synonyms tool around the given gateway.
    pub fn new(gateway: Gateway<P, O>) -> Self {
        Self { gateway }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for SynonymsTool<P, O> {
    fn name(&self) -> &str {
        "synonyms"
    }

    fn description(&self) -> &str {
        "Finds one to three synonyms for the translated word, explained in the source language."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["target_word", "source_language", "target_language", "target_part_of_speech"],
            "properties": {
                "target_word": {"type": "string"},
                "source_language": {"type": "string"},
                "target_language": {"type": "string"},
                "target_part_of_speech": {"type": "string"}
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
            let input: SynonymsInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let base_prompt = format!(
                "Provide synonyms for '{}' ({}, {}). Determine if direct, common synonyms exist; if \
                 not, explain why in {}. In any case provide 1 to 3 of the closest words or concepts, \
                 each with an explanation in {} of how it differs in nuance and usage from '{}'.",
                input.target_word,
                input.target_language.display_name(),
                input.target_part_of_speech,
                input.source_language.display_name(),
                input.source_language.display_name(),
                input.target_word,
            );

            let prompt = crate::feedback::with_feedback(
                base_prompt,
                &[
                    "If no direct synonym exists, state so in the note field",
                    "List the closest related concepts, not meta-commentary",
                    "Avoid archaic or overly academic terms unless the target word is also of that nature",
                ],
                input.quality_feedback.as_deref(),
                &input.previous_issues,
                &input.suggestions,
            );

            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_LINGUISTIC_SPECIALIST, prompt.clone(), output_schema());
            let (output, _): (SynonymsOutput, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(SynonymsOutput::fallback()).unwrap()
    }
}

fn output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["synonyms"],
        "properties": {
            "note": {"type": "string"},
            "synonyms": {
                "type": "array",
                "minItems": 1,
                "maxItems": 3,
                "items": {
                    "type": "object",
                    "required": ["synonym", "explanation"],
                    "properties": {
                        "synonym": {"type": "string"},
                        "explanation": {"type": "string"}
                    }
                }
            }
        }
    })
}
