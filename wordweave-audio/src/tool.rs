//! The pronunciation tool: word + syllable audio, with idempotent reuse,
//! grounded on `pronunciation_tool.py`'s `get_pronunciation`.

use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

use wordweave_media::{is_cloud_context, vocab_audio_paths, Blobs};
use wordweave_tools::schema::PronunciationOutput;
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::{Language, Pronunciations};

use crate::synth::Synthesizer;
use crate::voice::{VoiceIdentity, VoiceSettings};

#[derive(Debug, Deserialize)]
struct PronunciationInput {
    target_word: String,
    target_language: Language,
    #[serde(default)]
    target_syllables: Vec<String>,
}

/// Generates whole-word and (when applicable) syllable-by-syllable
/// pronunciation audio, reusing existing uploads when available.
///
/// Never quality-gated: `wordweave-supervisor` runs this tool after
/// `syllables` succeeds and accepts its output unconditionally, mirroring
/// `node_get_pronunciation`'s place in the original graph.
pub struct PronunciationTool {
    synth: Synthesizer,
    blobs: Blobs,
    identity: VoiceIdentity,
}

impl PronunciationTool {
    /// Build a pronunciation tool around the given synthesizer and blob store.
    pub fn new(synth: Synthesizer, blobs: Blobs) -> Self {
        Self {
            synth,
            blobs,
            identity: VoiceIdentity::from_env(),
        }
    }

    async fn generate_and_upload(&self, text: &str, key: &str, settings: VoiceSettings, language_code: &str) -> String {
        if !is_cloud_context() {
            return format!("https://mock-s3-bucket.local/{key}");
        }

        let Some(bytes) = self
            .synth
            .generate_with_retry(text, language_code, &self.identity, settings)
            .await
        else {
            tracing::warn!(key, "audio generation failed, using fallback marker");
            return format!("ERROR: audio generation failed for {text}");
        };

        match self.blobs.put(key, bytes, "audio/mpeg").await {
            Ok(url) => url,
            Err(e) => {
                tracing::error!(error = %e, key, "audio upload failed");
                format!("ERROR: audio upload failed for {text}")
            }
        }
    }
}

impl ToolDyn for PronunciationTool {
    fn name(&self) -> &str {
        "pronunciation"
    }

    fn description(&self) -> &str {
        "Generates whole-word and syllable pronunciation audio, reusing existing uploads when available."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["target_word", "target_language"],
            "properties": {
                "target_word": {"type": "string"},
                "target_language": {"type": "string"},
                "target_syllables": {"type": "array", "items": {"type": "string"}}
            }
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["audio"],
            "properties": {
                "audio": {"type": "string"},
                "syllables": {"type": "string"}
            }
        })
    }

    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let input: PronunciationInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let paths = vocab_audio_paths(input.target_language.code(), &input.target_word);
            let syllables_needed = input.target_syllables.len() > 1;

            if !is_cloud_context() {
                let syllables = syllables_needed.then(|| format!("https://mock-s3-bucket.local/{}", paths.syllables_key));
                let output = PronunciationOutput {
                    pronunciations: Pronunciations {
                        audio: format!("https://mock-s3-bucket.local/{}", paths.pronunciation_key),
                        syllables,
                    },
                };
                return Ok(ToolCallResult::new(serde_json::to_value(output).unwrap()));
            }

            let audio_exists = self.blobs.exists(&paths.pronunciation_key).await;
            let syllables_exist = syllables_needed && self.blobs.exists(&paths.syllables_key).await;

            if audio_exists && (!syllables_needed || syllables_exist) {
                tracing::info!(word = %input.target_word, "reusing existing pronunciation audio");
                let output = PronunciationOutput {
                    pronunciations: Pronunciations {
                        audio: self.blobs.url_for(&paths.pronunciation_key),
                        syllables: syllables_needed.then(|| self.blobs.url_for(&paths.syllables_key)),
                    },
                };
                return Ok(ToolCallResult::new(serde_json::to_value(output).unwrap()));
            }

            let language_code = input.target_language.code();

            let audio_url = if audio_exists {
                self.blobs.url_for(&paths.pronunciation_key)
            } else {
                self.generate_and_upload(
                    &input.target_word,
                    &paths.pronunciation_key,
                    VoiceSettings::for_word(),
                    language_code,
                )
                .await
            };

            let syllables_url = if syllables_needed {
                if syllables_exist {
                    Some(self.blobs.url_for(&paths.syllables_key))
                } else {
                    let text = input.target_syllables.join("\n\n");
                    Some(
                        self.generate_and_upload(&text, &paths.syllables_key, VoiceSettings::for_syllables(), language_code)
                            .await,
                    )
                }
            } else {
                None
            };

            let output = PronunciationOutput {
                pronunciations: Pronunciations {
                    audio: audio_url,
                    syllables: syllables_url,
                },
            };
            Ok(ToolCallResult::new(serde_json::to_value(output).unwrap()))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(PronunciationOutput::fallback()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_deserializes_with_missing_syllables() {
        let value = serde_json::json!({
            "target_word": "casa",
            "target_language": "Spanish",
        });
        let input: PronunciationInput = serde_json::from_value(value).unwrap();
        assert!(input.target_syllables.is_empty());
    }
}
