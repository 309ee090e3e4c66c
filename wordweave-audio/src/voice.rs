//! Voice and quality-floor constants, grounded on `pronunciation_tool.py`'s
//! `VOICE_CONFIG`.

/// Words are spoken slower than natural conversational speed, so learners
/// can follow along; syllables are spoken slower still.
pub const WORD_SPEED: f32 = 0.85;
/// Per-syllable playback speed, lower than [`WORD_SPEED`] for clarity.
pub const SYLLABLES_SPEED: f32 = 0.7;

/// Voice stability, similarity boost, and style sliders passed to the
/// text-to-speech provider, tuned for consistent, clear pronunciation audio
/// rather than expressive delivery.
pub const STABILITY: f32 = 0.9;
/// See [`STABILITY`].
pub const SIMILARITY_BOOST: f32 = 0.9;
/// See [`STABILITY`].
pub const STYLE: f32 = 0.9;
/// Whether the provider's speaker-boost post-processing is enabled.
pub const USE_SPEAKER_BOOST: bool = true;

/// Default voice id, overridable via `ELEVENLABS_VOICE_ID`.
pub const DEFAULT_VOICE_ID: &str = "94zOad0g7T7K4oa7zhDq";
/// Default model id, overridable via `ELEVENLABS_MODEL_ID`.
pub const DEFAULT_MODEL_ID: &str = "eleven_flash_v2_5";

/// Maximum cumulative audio stream size, in bytes, before generation aborts.
pub const MAX_AUDIO_BYTES: usize = 5 * 1024 * 1024;
/// Minimum cumulative audio stream size, in bytes; anything smaller is
/// treated as a failed generation (silence, truncated stream, or an error
/// page misrouted through the audio channel).
pub const MIN_AUDIO_BYTES: usize = 1024;
/// Maximum number of generation attempts before falling back.
pub const MAX_RETRIES: u32 = 3;
/// Per-attempt generation timeout, in seconds.
pub const ATTEMPT_TIMEOUT_SECS: u64 = 30;

/// Resolved voice settings for a single text-to-speech request.
#[derive(Debug, Clone, Copy)]
pub struct VoiceSettings {
    /// Playback speed.
    pub speed: f32,
    /// Voice stability.
    pub stability: f32,
    /// Similarity boost.
    pub similarity_boost: f32,
    /// Style exaggeration.
    pub style: f32,
    /// Speaker boost toggle.
    pub use_speaker_boost: bool,
}

impl VoiceSettings {
    /// Settings for a single word or phrase, at [`WORD_SPEED`].
    pub fn for_word() -> Self {
        Self::with_speed(WORD_SPEED)
    }

    /// Settings for a syllable breakdown, at [`SYLLABLES_SPEED`].
    pub fn for_syllables() -> Self {
        Self::with_speed(SYLLABLES_SPEED)
    }

    fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            stability: STABILITY,
            similarity_boost: SIMILARITY_BOOST,
            style: STYLE,
            use_speaker_boost: USE_SPEAKER_BOOST,
        }
    }
}

/// Provider identity, resolved from the environment with the reference's
/// defaults.
pub struct VoiceIdentity {
    /// Voice id to synthesize with.
    pub voice_id: String,
    /// Text-to-speech model id.
    pub model_id: String,
}

impl VoiceIdentity {
    /// Read `ELEVENLABS_VOICE_ID`/`ELEVENLABS_MODEL_ID`, falling back to the
    /// defaults this pipeline ships with.
    pub fn from_env() -> Self {
        Self {
            voice_id: std::env::var("ELEVENLABS_VOICE_ID").unwrap_or_else(|_| DEFAULT_VOICE_ID.to_string()),
            model_id: std::env::var("ELEVENLABS_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_and_syllable_speeds_differ() {
        assert!(VoiceSettings::for_word().speed > VoiceSettings::for_syllables().speed);
    }

    #[test]
    fn default_identity_matches_reference_defaults() {
        std::env::remove_var("ELEVENLABS_VOICE_ID");
        std::env::remove_var("ELEVENLABS_MODEL_ID");
        let identity = VoiceIdentity::from_env();
        assert_eq!(identity.voice_id, DEFAULT_VOICE_ID);
        assert_eq!(identity.model_id, DEFAULT_MODEL_ID);
    }
}
