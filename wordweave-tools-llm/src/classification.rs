//! The classification tool: base form, definitions, part of speech, then
//! an existence check against the store, grounded on
//! `classification_tool.py`'s `get_classification`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_store::Store;
use wordweave_tools::schema::ClassificationOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::{Language, PartOfSpeech};

const SYSTEM_LINGUISTIC_SPECIALIST: &str = "You are a linguistic expert. Be accurate and natural.";

#[derive(Debug, Deserialize)]
struct ClassificationInput {
    source_word: String,
    source_language: Language,
    target_language: Language,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Classifies a word's base form, definitions, and part of speech, then
/// checks whether this word pair already exists in the store.
pub struct ClassificationTool<P, O> {
    gateway: Gateway<P, O>,
    store: Arc<Store>,
}

impl<P: Provider, O: UsageObserver> ClassificationTool<P, O> {
    /// Build a classification tool around the given gateway and store.
    pub fn new(gateway: Gateway<P, O>, store: Arc<Store>) -> Self {
        Self { gateway, store }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for ClassificationTool<P, O> {
    fn name(&self) -> &str {
        "classification"
    }

    fn description(&self) -> &str {
        "Classifies a word's base form, definitions, and part of speech, then checks for an existing entry."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["source_word", "source_language", "target_language"],
            "properties": {
                "source_word": {"type": "string"},
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
            let input: ClassificationInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let base_prompt = format!(
                "Classify '{}' ({}): part of speech, one to three definitions, and the base dictionary \
                 form with any article or modifier removed. For source_article: English uses null; \
                 German uses der/die/das for nouns; Spanish uses el/la/los/las for nouns.",
                input.source_word,
                input.source_language.display_name(),
            );

            let prompt = crate::feedback::with_feedback(
                base_prompt,
                &[
                    "Extract the base word correctly, removing any articles or modifiers",
                    "1-3 clear and natural definitions that are distinct and common",
                    "Note informal or slang usage in source_additional_info",
                ],
                input.quality_feedback.as_deref(),
                &input.previous_issues,
                &input.suggestions,
            );

            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_LINGUISTIC_SPECIALIST, prompt.clone(), output_schema());
            let (mut output, _): (ClassificationOutput, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            let existing = self
                .store
                .check_exists(input.source_language, &output.source_word, input.target_language)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            output.word_exists = Some(existing.is_some());
            output.existing_item = existing;

            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(ClassificationOutput::fallback("ERROR")).unwrap()
    }
}

fn output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["source_word", "source_definition", "source_part_of_speech"],
        "properties": {
            "source_word": {"type": "string"},
            "source_definition": {"type": "array", "minItems": 1, "maxItems": 3, "items": {"type": "string"}},
            "source_part_of_speech": {"type": "string", "enum": all_parts_of_speech()},
            "source_article": {"type": "string"},
            "source_additional_info": {"type": "string"},
            "word_exists": {"type": "boolean"},
            "existing_item": {"type": "object"}
        }
    })
}

fn all_parts_of_speech() -> Vec<&'static str> {
    [
        PartOfSpeech::FeminineNoun,
        PartOfSpeech::MasculineNoun,
        PartOfSpeech::NeuterNoun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
        PartOfSpeech::Preposition,
        PartOfSpeech::Conjunction,
        PartOfSpeech::Pronoun,
        PartOfSpeech::Article,
        PartOfSpeech::Interjection,
    ]
    .into_iter()
    .map(PartOfSpeech::as_str)
    .collect()
}
