//! ElevenLabs text-to-speech client with streamed size validation and
//! exponential backoff retries, grounded on `pronunciation_tool.py`'s
//! `generate_audio_with_retry`.

use futures_util::StreamExt;
use rand::Rng;

use crate::error::AudioError;
use crate::voice::{VoiceIdentity, VoiceSettings, MAX_AUDIO_BYTES, MAX_RETRIES, MIN_AUDIO_BYTES};

const SYNTHESIS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// Client for ElevenLabs' streaming text-to-speech endpoint.
pub struct Synthesizer {
    client: reqwest::Client,
    api_key: String,
}

impl Synthesizer {
    /// Build a synthesizer around the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Generate audio for `text` once, streaming the response and aborting
    /// if it exceeds [`MAX_AUDIO_BYTES`].
    async fn generate_once(
        &self,
        text: &str,
        language_code: &str,
        identity: &VoiceIdentity,
        settings: VoiceSettings,
    ) -> Result<Vec<u8>, AudioError> {
        let url = format!("{SYNTHESIS_URL}/{}", identity.voice_id);

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&serde_json::json!({
                "text": text,
                "language_code": language_code,
                "model_id": identity.model_id,
                "output_format": "mp3_44100_128",
                "voice_settings": {
                    "stability": settings.stability,
                    "similarity_boost": settings.similarity_boost,
                    "style": settings.style,
                    "use_speaker_boost": settings.use_speaker_boost,
                    "speed": settings.speed,
                }
            }))
            .send()
            .await
            .map_err(|e| AudioError::Synthesis(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AudioError::Synthesis(format!("elevenlabs returned {status}: {body}")));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AudioError::Synthesis(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
            if bytes.len() > MAX_AUDIO_BYTES {
                return Err(AudioError::TooLarge(bytes.len()));
            }
        }

        if bytes.len() < MIN_AUDIO_BYTES {
            return Err(AudioError::TooSmall(bytes.len()));
        }

        Ok(bytes)
    }

    /// Generate audio for `text`, retrying with exponential backoff and
    /// jitter up to [`MAX_RETRIES`] times. Returns `None`, rather than an
    /// error, once retries are exhausted, so callers can substitute their
    /// own fallback marker exactly as the reference does.
    pub async fn generate_with_retry(
        &self,
        text: &str,
        language_code: &str,
        identity: &VoiceIdentity,
        settings: VoiceSettings,
    ) -> Option<Vec<u8>> {
        for attempt in 0..MAX_RETRIES {
            let outcome = tokio::time::timeout(
                std::time::Duration::from_secs(crate::voice::ATTEMPT_TIMEOUT_SECS),
                self.generate_once(text, language_code, identity, settings),
            )
            .await;

            let result = match outcome {
                Ok(result) => result,
                Err(_) => Err(AudioError::Synthesis(format!(
                    "timed out after {}s",
                    crate::voice::ATTEMPT_TIMEOUT_SECS
                ))),
            };

            match result {
                Ok(bytes) => return Some(bytes),
                Err(err) if attempt + 1 < MAX_RETRIES => {
                    let delay = backoff_delay(attempt);
                    tracing::warn!(attempt = attempt + 1, error = %err, delay_secs = delay.as_secs_f32(), "audio generation attempt failed, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::error!(error = %err, "audio generation exhausted retries");
                }
            }
        }
        None
    }
}

fn backoff_delay(attempt: u32) -> std::time::Duration {
    let base = 2u64.pow(attempt) as f32;
    let jitter: f32 = rand::thread_rng().gen_range(0.0..1.0);
    std::time::Duration::from_secs_f32(base + jitter)
}
