//! Errors from the media tool's HTTP and blob-storage calls.

use thiserror::Error;

/// Errors from fetching, selecting, or storing media.
///
/// None of these are surfaced directly to the quality gate: `MediaTool`
/// converts every one into its fallback output and logs the cause, per the
/// tool contract (`ToolDyn::call` only returns `Err` for genuinely
/// unrecoverable input, never for a downstream HTTP/storage failure).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MediaError {
    /// The Pexels search request failed.
    #[error("pexels search failed: {0}")]
    Pexels(String),

    /// Uploading an image variant to blob storage failed.
    #[error("s3 upload failed: {0}")]
    Upload(String),

    /// The LLM call used for translation or selection failed.
    #[error("llm call failed: {0}")]
    Llm(String),
}
