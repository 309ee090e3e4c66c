//! Provider trait for LLM backends.
//!
//! The [`Provider`] trait uses RPITIT (return-position `impl Trait` in
//! traits) and is intentionally NOT object-safe — callers are generic over
//! `P: Provider`, same as the reference implementation's model-agnostic
//! client wrapper.

use crate::types::{StructuredRequest, StructuredResponse};
use std::future::Future;
use thiserror::Error;

/// Errors from LLM providers.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderError {
    /// HTTP or network request failed.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Provider rate-limited the request.
    #[error("rate limited")]
    RateLimited,

    /// Authentication/authorization failed.
    #[error("auth failed: {0}")]
    AuthFailed(String),

    /// The response could not be parsed, or failed schema validation.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ProviderError {
    /// Whether retrying this request might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited | ProviderError::RequestFailed(_)
        )
    }
}

/// LLM provider interface: one structured completion in, one JSON value out.
///
/// Each provider (Anthropic, OpenAI, Ollama) implements this trait. A
/// provider whose SDK is synchronous wraps its call in
/// `tokio::task::spawn_blocking` so every binding is awaited uniformly.
pub trait Provider: Send + Sync {
    /// Resolve `request.tier` to a concrete model identifier and send it.
    fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send;
}
