//! Request/response mapping between [`StructuredRequest`] and the OpenAI
//! Chat Completions API format.
//!
//! Uses native structured outputs (`response_format: json_schema`, strict
//! mode) rather than a forced tool call — OpenAI's Chat Completions API
//! supports schema-constrained JSON decoding directly.
//!
//! Reference: <https://platform.openai.com/docs/guides/structured-outputs>

use wordweave_llm::{ModelTier, ProviderError, StructuredRequest, StructuredResponse, TokenUsage};

/// Build the OpenAI Chat Completions API request body for a structured completion.
#[must_use]
pub fn to_api_request(req: &StructuredRequest, model: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            { "role": "system", "content": req.system },
            { "role": "user", "content": req.user },
        ],
        "max_tokens": req.max_tokens.unwrap_or(4096),
        "temperature": req.temperature,
        "response_format": {
            "type": "json_schema",
            "json_schema": {
                "name": "structured_result",
                "strict": true,
                "schema": req.response_schema,
            }
        },
    })
}

/// Resolve a [`ModelTier`] to a concrete OpenAI model identifier.
pub fn resolve_model(tier: ModelTier, executor_model: &str, supervisor_model: &str) -> String {
    match tier {
        ModelTier::Executor => executor_model.to_string(),
        ModelTier::Supervisor => supervisor_model.to_string(),
    }
}

/// Parse an OpenAI Chat Completions API response into a [`StructuredResponse`].
pub fn from_api_response(body: &serde_json::Value) -> Result<StructuredResponse, ProviderError> {
    let model = body["model"]
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse("missing 'model' in response".into()))?
        .to_string();

    let content = body["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| {
            ProviderError::InvalidResponse("missing choices[0].message.content".into())
        })?;

    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
        ProviderError::InvalidResponse(format!("response content was not valid JSON: {e}"))
    })?;

    let usage = TokenUsage {
        prompt_tokens: body["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
        completion_tokens: body["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        cache_read_tokens: body["usage"]["prompt_tokens_details"]["cached_tokens"].as_u64(),
    };

    Ok(StructuredResponse {
        value,
        usage,
        model,
        cost: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_strict_json_schema() {
        let req = StructuredRequest::new(ModelTier::Executor, "sys", "usr", json!({"type": "object"}));
        let body = to_api_request(&req, "gpt-4o-mini");
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
        assert_eq!(body["temperature"], 0.0);
    }

    #[test]
    fn resolve_model_picks_tier() {
        assert_eq!(
            resolve_model(ModelTier::Executor, "cheap", "strong"),
            "cheap"
        );
        assert_eq!(
            resolve_model(ModelTier::Supervisor, "cheap", "strong"),
            "strong"
        );
    }

    #[test]
    fn response_parses_json_content_string() {
        let body = json!({
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "content": "{\"score\": 7.5}" } }],
            "usage": { "prompt_tokens": 30, "completion_tokens": 8 }
        });
        let resp = from_api_response(&body).unwrap();
        assert_eq!(resp.value["score"], 7.5);
        assert_eq!(resp.usage.prompt_tokens, 30);
    }

    #[test]
    fn response_with_malformed_json_content_is_invalid() {
        let body = json!({
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "content": "not json" } }],
            "usage": { "prompt_tokens": 5, "completion_tokens": 5 }
        });
        let err = from_api_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
