#![deny(missing_docs)]
//! Structured-completion gateway shared by every LLM-backed tool and the
//! supervisor's quality gate.
//!
//! Exposes one operation: given a response schema, a system message, and a
//! user message, return a value conforming to that schema, or a typed
//! error. [`Provider`] is the seam each backend (Anthropic, OpenAI, Ollama)
//! implements; [`Gateway`] wraps a provider with schema validation and an
//! observability hook that sees every call's token usage and model
//! identifier, regardless of which provider served it.

pub mod config;
pub mod provider;
pub mod types;

pub use config::GatewayConfig;
pub use provider::{Provider, ProviderError};
pub use types::{ModelTier, StructuredRequest, StructuredResponse, TokenUsage};

use serde::de::DeserializeOwned;

/// Observes every completed call: token usage and the model identifier.
///
/// Implemented by `wordweave-hooks` to feed a tracing span; a no-op
/// implementation is provided for tests.
pub trait UsageObserver: Send + Sync {
    /// Called once per successful [`Provider::complete_structured`] call.
    fn observe(&self, model: &str, usage: &TokenUsage);
}

/// A [`UsageObserver`] that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl UsageObserver for NoopObserver {
    fn observe(&self, _model: &str, _usage: &TokenUsage) {}
}

/// Wraps a [`Provider`] with schema-typed responses and usage observation.
pub struct Gateway<P, O = NoopObserver> {
    provider: P,
    observer: O,
}

impl<P: Provider> Gateway<P, NoopObserver> {
    /// Wrap a provider with no usage observation.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            observer: NoopObserver,
        }
    }
}

impl<P: Provider, O: UsageObserver> Gateway<P, O> {
    /// Wrap a provider with the given usage observer.
    pub fn with_observer(provider: P, observer: O) -> Self {
        Self { provider, observer }
    }

    /// Run a structured completion and deserialize the result into `S`.
    ///
    /// `response_schema` on `request` is sent to the provider as the shape
    /// to constrain decoding to; the raw JSON value returned is still
    /// deserialized into `S` here so schema drift surfaces as a typed error
    /// rather than a silent mismatch downstream.
    pub async fn complete<S: DeserializeOwned>(
        &self,
        request: StructuredRequest,
    ) -> Result<(S, StructuredResponse), ProviderError> {
        let response = self.provider.complete_structured(request).await?;
        self.observer.observe(&response.model, &response.usage);
        let value = serde_json::from_value(response.value.clone())
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;
        Ok((value, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;
    use std::future::Future;
    use std::sync::atomic::{AtomicU64, Ordering};

    struct StubProvider {
        value: serde_json::Value,
    }

    impl Provider for StubProvider {
        fn complete_structured(
            &self,
            request: StructuredRequest,
        ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
            let value = self.value.clone();
            async move {
                Ok(StructuredResponse {
                    value,
                    usage: TokenUsage {
                        prompt_tokens: 10,
                        completion_tokens: 5,
                        cache_read_tokens: None,
                    },
                    model: match request.tier {
                        ModelTier::Executor => "stub-executor".to_string(),
                        ModelTier::Supervisor => "stub-supervisor".to_string(),
                    },
                    cost: None,
                })
            }
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Score {
        score: f64,
    }

    #[derive(Default)]
    struct CountingObserver {
        calls: AtomicU64,
    }

    impl UsageObserver for CountingObserver {
        fn observe(&self, _model: &str, _usage: &TokenUsage) {
            self.calls.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[tokio::test]
    async fn completes_and_deserializes() {
        let gateway = Gateway::new(StubProvider {
            value: json!({"score": 8.5}),
        });
        let req = StructuredRequest::new(ModelTier::Supervisor, "sys", "usr", json!({}));
        let (score, resp): (Score, _) = gateway.complete(req).await.unwrap();
        assert_eq!(score, Score { score: 8.5 });
        assert_eq!(resp.model, "stub-supervisor");
    }

    #[tokio::test]
    async fn observer_sees_every_call() {
        let observer = CountingObserver::default();
        let gateway = Gateway::with_observer(
            StubProvider {
                value: json!({"score": 1.0}),
            },
            observer,
        );
        let req = StructuredRequest::new(ModelTier::Executor, "sys", "usr", json!({}));
        let _: (Score, _) = gateway.complete(req).await.unwrap();
        assert_eq!(gateway.observer.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn schema_mismatch_is_a_typed_error() {
        let gateway = Gateway::new(StubProvider {
            value: json!({"not_score": 1}),
        });
        let req = StructuredRequest::new(ModelTier::Executor, "sys", "usr", json!({}));
        let result: Result<(Score, _), _> = gateway.complete(req).await;
        assert!(matches!(result, Err(ProviderError::InvalidResponse(_))));
    }
}
