//! Ollama API client struct and builder.

use std::future::Future;

use wordweave_llm::{Provider, ProviderError, StructuredRequest, StructuredResponse};

use crate::error::{map_http_status, map_reqwest_error};
use crate::mapping::{from_api_response, resolve_model, to_api_request};

const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Client for a local Ollama server's `/api/chat` endpoint.
///
/// Ollama runs models locally, so there are no auth headers and cost is
/// always absent rather than estimated.
#[derive(Clone)]
pub struct Ollama {
    base_url: String,
    executor_model: String,
    supervisor_model: String,
    client: reqwest::Client,
}

impl Ollama {
    /// Create a new client pointed at the default local Ollama server,
    /// with model tags for the executor and supervisor routing tiers.
    #[must_use]
    pub fn new(executor_model: impl Into<String>, supervisor_model: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            executor_model: executor_model.into(),
            supervisor_model: supervisor_model.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Override the server base URL. Useful when Ollama runs on a remote host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url.trim_end_matches('/'))
    }
}

impl Provider for Ollama {
    fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
        let url = self.chat_url();
        let model = resolve_model(request.tier, &self.executor_model, &self.supervisor_model);
        let http_client = self.client.clone();

        async move {
            let body = to_api_request(&request, &model);

            tracing::debug!(url = %url, model = %model, "sending structured completion request");

            let response = http_client
                .post(&url)
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
        let client = Ollama::new("llama3.1", "llama3.1:70b");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn with_base_url_overrides_default() {
        let client = Ollama::new("llama3.1", "llama3.1:70b").with_base_url("http://10.0.0.5:11434");
        assert_eq!(client.base_url, "http://10.0.0.5:11434");
    }

    #[test]
    fn chat_url_appends_path() {
        let client = Ollama::new("llama3.1", "llama3.1:70b").with_base_url("http://host:11434/");
        assert_eq!(client.chat_url(), "http://host:11434/api/chat");
    }
}
