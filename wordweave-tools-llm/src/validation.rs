//! The validation tool: is the word real, well-formed, and unambiguous,
//! grounded on `validation_tool.py`'s `validate_word`.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_tools::schema::ValidationOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::Language;

const SYSTEM_VALIDATION_SPECIALIST: &str =
    "You are a vocabulary validation expert. Follow instructions exactly. Return valid JSON only.";

#[derive(Debug, Deserialize)]
struct ValidationInput {
    source_word: String,
    target_language: Language,
    #[serde(default)]
    source_language: Option<Language>,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Checks that a word is a real, correctly spelled, unambiguous entry
/// before the rest of the pipeline commits to processing it.
pub struct ValidationTool<P, O> {
    gateway: Gateway<P, O>,
}

impl<P: Provider, O: UsageObserver> ValidationTool<P, O> {
    /// Build a validation tool around the given gateway.
    pub fn new(gateway: Gateway<P, O>) -> Self {
        Self { gateway }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for ValidationTool<P, O> {
    fn name(&self) -> &str {
        "validation"
    }

    fn description(&self) -> &str {
        "Validates spelling, language clarity, and ambiguity for the requested word."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["source_word", "target_language"],
            "properties": {
                "source_word": {"type": "string"},
                "target_language": {"type": "string"},
                "source_language": {"type": "string"}
            }
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["is_valid", "source_language"],
            "properties": {
                "is_valid": {"type": "boolean"},
                "source_language": {"type": "string"},
                "issue_message": {"type": "string"},
                "issue_suggestions": {"type": "array", "items": {"type": "object"}}
            }
        })
    }

    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let input: ValidationInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let possible_source_languages: Vec<&str> = match input.source_language {
                Some(lang) => vec![lang.display_name()],
                None => Language::all()
                    .into_iter()
                    .filter(|lang| *lang != input.target_language)
                    .map(Language::display_name)
                    .collect(),
            };

            let base_prompt = format!(
                "Validate '{}' as a real, correctly spelled, unambiguous word. Source language: {}. \
                 Possible source languages if unspecified: {}.",
                input.source_word,
                input.source_language.map(Language::display_name).unwrap_or("unknown"),
                possible_source_languages.join(", "),
            );

            let prompt = crate::feedback::with_feedback(
                base_prompt,
                &[
                    "Reject words that are ambiguous between multiple languages without strong context.",
                    "Reject misspellings, but suggest up to three corrected alternatives.",
                ],
                input.quality_feedback.as_deref(),
                &input.previous_issues,
                &input.suggestions,
            );

            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_VALIDATION_SPECIALIST, prompt.clone(), output_schema());
            let (output, _): (ValidationOutput, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(ValidationOutput::fallback(Language::English)).unwrap()
    }
}

fn output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["is_valid", "source_language"],
        "properties": {
            "is_valid": {"type": "boolean"},
            "source_language": {"type": "string"},
            "issue_message": {"type": "string"},
            "issue_suggestions": {
                "type": "array",
                "maxItems": 3,
                "items": {
                    "type": "object",
                    "required": ["word", "language"],
                    "properties": {
                        "word": {"type": "string"},
                        "language": {"type": "string"}
                    }
                }
            }
        }
    })
}
