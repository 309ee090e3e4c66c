//! Errors from the pronunciation tool's text-to-speech and upload path.

use thiserror::Error;

/// Failures in audio generation, validation, or upload.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AudioError {
    /// The text-to-speech provider returned an error or an unreadable stream.
    #[error("text-to-speech request failed: {0}")]
    Synthesis(String),

    /// The generated audio exceeded the streaming size bound.
    #[error("audio stream exceeded {0} bytes")]
    TooLarge(usize),

    /// The generated audio was smaller than the quality floor.
    #[error("audio quality check failed: {0} bytes is below the floor")]
    TooSmall(usize),

    /// All retry attempts were exhausted without producing valid audio.
    #[error("exhausted {0} attempts generating audio")]
    RetriesExhausted(u32),

    /// Uploading the generated audio to blob storage failed.
    #[error("audio upload failed: {0}")]
    Upload(String),
}
