#![deny(missing_docs)]
//! OpenAI Chat Completions API binding for the wordweave LLM gateway.

mod error;
mod mapping;

use std::future::Future;

use wordweave_llm::{Provider, ProviderError, StructuredRequest, StructuredResponse};

use error::{map_http_status, map_reqwest_error};
use mapping::{from_api_response, resolve_model, to_api_request};

const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Client for the OpenAI Chat Completions API.
#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    executor_model: String,
    supervisor_model: String,
    api_url: String,
    org_id: Option<String>,
    client: reqwest::Client,
}

impl OpenAi {
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
            api_url: DEFAULT_API_URL.into(),
            org_id: None,
            client: reqwest::Client::new(),
        }
    }

    /// Override the API URL. Useful for testing or proxies.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the `OpenAI-Organization` header for multi-org accounts.
    #[must_use]
    pub fn with_org(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }
}

impl Provider for OpenAi {
    fn complete_structured(
        &self,
        request: StructuredRequest,
    ) -> impl Future<Output = Result<StructuredResponse, ProviderError>> + Send {
        let url = self.api_url.clone();
        let api_key = self.api_key.clone();
        let org_id = self.org_id.clone();
        let model = resolve_model(request.tier, &self.executor_model, &self.supervisor_model);
        let http_client = self.client.clone();

        async move {
            let body = to_api_request(&request, &model);

            tracing::debug!(url = %url, model = %model, "sending structured completion request");

            let mut req = http_client
                .post(&url)
                .bearer_auth(&api_key)
                .header("content-type", "application/json")
                .json(&body);
            if let Some(org) = &org_id {
                req = req.header("OpenAI-Organization", org);
            }

            let response = req.send().await.map_err(map_reqwest_error)?;
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
    fn default_api_url_is_set() {
        let client = OpenAi::new("test-key", "gpt-4o-mini", "gpt-4o");
        assert_eq!(client.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn with_url_overrides_default() {
        let client =
            OpenAi::new("test-key", "gpt-4o-mini", "gpt-4o").with_url("http://localhost:9999");
        assert_eq!(client.api_url, "http://localhost:9999");
    }

    #[test]
    fn with_org_sets_org_id() {
        let client = OpenAi::new("test-key", "gpt-4o-mini", "gpt-4o").with_org("org-123");
        assert_eq!(client.org_id.as_deref(), Some("org-123"));
    }
}
