//! Anthropic API client struct and builder.

use std::future::Future;

use wordweave_llm::{ModelTier, Provider, ProviderError, StructuredRequest, StructuredResponse};

use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::{from_api_response, resolve_model, to_api_request};

/// Default Anthropic API base URL.
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API.
///
/// Implements [`Provider`] for use anywhere a structured-completion gateway
/// accepts one.
#[derive(Clone)]
pub struct Anthropic {
    api_key: String,
    executor_model: String,
    supervisor_model: String,
    base_url: String,
    client: reqwest::Client,
}

impl Anthropic {
    /// Create a new client with the given API key and model identifiers
    /// for the executor and supervisor routing tiers.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        executor_model: impl Into<String>,
        supervisor_model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            executor_model: executor_model.into(),
            supervisor_model: supervisor_model.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the API base URL. Useful for testing against a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

impl Provider for Anthropic {
    fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
        let url = self.messages_url();
        let api_key = self.api_key.clone();
        let model = resolve_model(request.tier, &self.executor_model, &self.supervisor_model);
        let http_client = self.client.clone();

        async move {
            let body = to_api_request(&request, &model);

            tracing::debug!(url = %url, model = %model, "sending structured completion request");

            let response = http_client
                .post(&url)
                .header("x-api-key", &api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&body)
                .send()
                .await
                .map_err(map_reqwest_error)?;

            let status = response.status();
            let response_text = response.text().await.map_err(map_reqwest_error)?;

            if !status.is_success() {
                return Err(map_http_status(status, &response_text));
            }

            let json: serde_json::Value = serde_json::from_str(&response_text)
                .map_err(|e| ProviderError::InvalidResponse(format!("invalid JSON response: {e}")))?;

            from_api_response(&json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_is_set() {
        let client = Anthropic::new("test-key", "claude-haiku", "claude-sonnet");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn builder_overrides_base_url() {
        let client =
            Anthropic::new("test-key", "claude-haiku", "claude-sonnet").base_url("http://localhost:9999");
        assert_eq!(client.base_url, "http://localhost:9999");
    }

    #[test]
    fn messages_url_includes_path() {
        let client =
            Anthropic::new("test-key", "claude-haiku", "claude-sonnet").base_url("http://localhost:9999");
        assert_eq!(client.messages_url(), "http://localhost:9999/v1/messages");
    }
}
