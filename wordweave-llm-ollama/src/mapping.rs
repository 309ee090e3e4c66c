//! Request/response mapping between [`StructuredRequest`] and the Ollama
//! `/api/chat` format.
//!
//! Ollama's `/api/chat` endpoint accepts a JSON Schema directly in the
//! `format` field and constrains decoding to it — no forced tool call
//! needed, unlike Anthropic.
//!
//! Reference: <https://github.com/ollama/ollama/blob/main/docs/api.md#chat-request-structured-outputs>

use wordweave_llm::{ModelTier, ProviderError, StructuredRequest, StructuredResponse, TokenUsage};

/// Build the Ollama `/api/chat` request body for a structured completion.
#[must_use]
pub fn to_api_request(req: &StructuredRequest, model: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "messages": [
            { "role": "system", "content": req.system },
            { "role": "user", "content": req.user },
        ],
        "format": req.response_schema,
        "stream": false,
        "options": {
            "temperature": req.temperature,
            "num_predict": req.max_tokens.unwrap_or(4096),
        },
    })
}

/// Resolve a [`ModelTier`] to a concrete locally-pulled Ollama model tag.
pub fn resolve_model(tier: ModelTier, executor_model: &str, supervisor_model: &str) -> String {
    match tier {
        ModelTier::Executor => executor_model.to_string(),
        ModelTier::Supervisor => supervisor_model.to_string(),
    }
}

/// Parse an Ollama `/api/chat` response into a [`StructuredResponse`].
pub fn from_api_response(body: &serde_json::Value) -> Result<StructuredResponse, ProviderError> {
    let model = body["model"]
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse("missing 'model' in response".into()))?
        .to_string();

    let content = body["message"]["content"]
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse("missing message.content".into()))?;

    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
        ProviderError::InvalidResponse(format!("response content was not valid JSON: {e}"))
    })?;

    let usage = TokenUsage {
        prompt_tokens: body["prompt_eval_count"].as_u64().unwrap_or(0),
        completion_tokens: body["eval_count"].as_u64().unwrap_or(0),
        cache_read_tokens: None,
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
    fn request_carries_schema_in_format() {
        let req = StructuredRequest::new(ModelTier::Executor, "sys", "usr", json!({"type": "object"}));
        let body = to_api_request(&req, "llama3.1");
        assert_eq!(body["format"], json!({"type": "object"}));
        assert_eq!(body["stream"], false);
        assert_eq!(body["options"]["temperature"], 0.0);
    }

    #[test]
    fn resolve_model_picks_tier() {
        assert_eq!(
            resolve_model(ModelTier::Executor, "llama3.1", "llama3.1:70b"),
            "llama3.1"
        );
        assert_eq!(
            resolve_model(ModelTier::Supervisor, "llama3.1", "llama3.1:70b"),
            "llama3.1:70b"
        );
    }

    #[test]
    fn response_parses_json_content_string() {
        let body = json!({
            "model": "llama3.1",
            "message": { "role": "assistant", "content": "{\"score\": 6.0}" },
            "prompt_eval_count": 50,
            "eval_count": 10
        });
        let resp = from_api_response(&body).unwrap();
        assert_eq!(resp.value["score"], 6.0);
        assert_eq!(resp.usage.prompt_tokens, 50);
        assert_eq!(resp.usage.completion_tokens, 10);
    }

    #[test]
    fn response_with_malformed_json_content_is_invalid() {
        let body = json!({
            "model": "llama3.1",
            "message": { "role": "assistant", "content": "nope" },
        });
        let err = from_api_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
