//! The translation tool: translate the base word and categorize its target
//! part of speech, grounded on `translation_tool.py`'s `get_translation`.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_tools::schema::TranslationOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::{Language, PartOfSpeech};

const SYSTEM_LINGUISTIC_SPECIALIST: &str = "You are a linguistic expert. Be accurate and natural.";

#[derive(Debug, Deserialize)]
struct TranslationInput {
    source_word: String,
    source_language: Language,
    target_language: Language,
    source_part_of_speech: PartOfSpeech,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Translates a validated word into the target language, with part of
/// speech, article, plural form, and an English rendering for media search.
pub struct TranslationTool<P, O> {
    gateway: Gateway<P, O>,
}

impl<P: Provider, O: UsageObserver> TranslationTool<P, O> {
    /// Build a translation tool around the given gateway.
    pub fn new(gateway: Gateway<P, O>) -> Self {
        Self { gateway }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for TranslationTool<P, O> {
    fn name(&self) -> &str {
        "translation"
    }

    fn description(&self) -> &str {
        "Translates a word into the target language between English, German, and Spanish."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["source_word", "source_language", "target_language", "source_part_of_speech"],
            "properties": {
                "source_word": {"type": "string"},
                "source_language": {"type": "string"},
                "target_language": {"type": "string"},
                "source_part_of_speech": {"type": "string"}
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
            let input: TranslationInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let base_prompt = format!(
                "Translate '{}' ({}, {}) into {}. Provide part of speech, article if it's a noun, \
                 plural form if applicable, and an English rendering (with article if a proper noun, \
                 or 'to' if a verb) for image search.",
                input.source_word,
                input.source_language.display_name(),
                input.source_part_of_speech,
                input.target_language.display_name(),
            );

            let prompt = crate::feedback::with_feedback(
                base_prompt,
                &[
                    "Keep the target word in its base dictionary form",
                    "english_word must be suitable as an image search term",
                ],
                input.quality_feedback.as_deref(),
                &input.previous_issues,
                &input.suggestions,
            );

            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_LINGUISTIC_SPECIALIST, prompt.clone(), output_schema());
            let (output, _): (TranslationOutput, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(TranslationOutput::fallback()).unwrap()
    }
}

fn output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["target_word", "target_part_of_speech", "english_word"],
        "properties": {
            "target_word": {"type": "string"},
            "target_part_of_speech": {"type": "string"},
            "target_article": {"type": "string"},
            "target_additional_info": {"type": "string"},
            "target_plural_form": {"type": "string"},
            "english_word": {"type": "string"}
        }
    })
}
