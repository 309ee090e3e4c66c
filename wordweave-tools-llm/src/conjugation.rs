//! The conjugation tool: a full verb conjugation table, one schema shape per
//! target language, grounded on `conjugation_tool.py`'s `get_conjugation`.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_tools::schema::ConjugationOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::{Language, PartOfSpeech};

const SYSTEM_LINGUISTIC_SPECIALIST: &str = "You are a linguistic expert. Be accurate and natural.";

#[derive(Debug, Deserialize)]
struct ConjugationInput {
    target_word: String,
    target_language: Language,
    target_part_of_speech: PartOfSpeech,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Produces a full conjugation table for verbs; a fixed sentinel for
/// everything else.
pub struct ConjugationTool<P, O> {
    gateway: Gateway<P, O>,
}

impl<P: Provider, O: UsageObserver> ConjugationTool<P, O> {
    /// Build a conjugation tool around the given gateway.
    pub fn new(gateway: Gateway<P, O>) -> Self {
        Self { gateway }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for ConjugationTool<P, O> {
    fn name(&self) -> &str {
        "conjugation"
    }

    fn description(&self) -> &str {
        "Produces a full conjugation table for a verb, or a not-a-verb sentinel otherwise."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["target_word", "target_language", "target_part_of_speech"],
            "properties": {
                "target_word": {"type": "string"},
                "target_language": {"type": "string"},
                "target_part_of_speech": {"type": "string"}
            }
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        output_schema(Language::English)
    }

    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let input: ConjugationInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            if !input.target_part_of_speech.is_conjugatable() {
                return Ok(ToolCallResult::new(
                    serde_json::to_value(ConjugationOutput::not_a_verb()).unwrap(),
                ));
            }

            let base_prompt = format!(
                "Produce a full conjugation table for '{}', a verb in {}.{}",
                input.target_word,
                input.target_language.display_name(),
                expected_tenses(input.target_language),
            );

            let prompt = crate::feedback::with_feedback(
                base_prompt,
                &["Cover every tense and mood listed above", "Use the verb's base/infinitive form throughout"],
                input.quality_feedback.as_deref(),
                &input.previous_issues,
                &input.suggestions,
            );

            let schema = output_schema(input.target_language);
            let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_LINGUISTIC_SPECIALIST, prompt.clone(), schema);
            let (table, _): (serde_json::Value, _) = self
                .gateway
                .complete(request)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            let output = ConjugationOutput::Table(table);
            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(ConjugationOutput::fallback()).unwrap()
    }
}

/// Tense/mood axes per language, mirroring each language's conjugation
/// schema in the reference implementation.
fn expected_tenses(language: Language) -> String {
    let (mood_a, mood_b) = match language {
        Language::English => ("Indicative", "Subjunctive"),
        Language::German => ("Indikativ", "Konjunktiv"),
        Language::Spanish => ("Indicative", "Subjunctive"),
    };

    let non_personal = match language {
        Language::English => "Infinitive, Gerund, Past Participle",
        Language::German => "Infinitiv, Partizip I, Partizip II",
        Language::Spanish => "Infinitivo, Gerundio, Participio",
    };

    let indicative = match language {
        Language::English => "Present, Past, Future, Present Perfect, Past Perfect, Future Perfect",
        Language::German => "Präsens, Präteritum, Perfekt, Plusquamperfekt, Futur I, Futur II",
        Language::Spanish => "Presente, Pretérito, Imperfecto, Futuro, Pretérito Perfecto, Pluscuamperfecto",
    };

    let subjunctive = match language {
        Language::English => "Present, Past",
        Language::German => "Konjunktiv I, Konjunktiv II",
        Language::Spanish => "Presente, Imperfecto, Futuro",
    };

    format!(
        "\nExpected tenses for {}:\n- Non Personal Forms: {}\n- {}: {}\n- {}: {}\n",
        language.display_name(),
        non_personal,
        mood_a,
        indicative,
        mood_b,
        subjunctive,
    )
}

fn output_schema(language: Language) -> serde_json::Value {
    match language {
        Language::English => serde_json::json!({
            "type": "object",
            "description": "English verb conjugation: infinitive, gerund, past participle, indicative and subjunctive tenses.",
            "additionalProperties": true
        }),
        Language::German => serde_json::json!({
            "type": "object",
            "description": "German verb conjugation: Infinitiv, Partizipien, Indikativ and Konjunktiv tenses.",
            "additionalProperties": true
        }),
        Language::Spanish => serde_json::json!({
            "type": "object",
            "description": "Spanish verb conjugation: infinitivo, gerundio, participio, Indicative and Subjunctive tenses.",
            "additionalProperties": true
        }),
    }
}
