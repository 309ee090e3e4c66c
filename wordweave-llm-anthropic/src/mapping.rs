//! Request/response mapping between [`StructuredRequest`] and the Anthropic
//! Messages API format.
//!
//! Anthropic has no native JSON-mode; structured output is obtained by
//! forcing a single tool call named `respond` whose `input_schema` is the
//! caller's response schema, then reading that tool call's `input` back as
//! the result. This is the same forced-tool-call pattern `instructor` and
//! similar structured-output libraries use against this API.
//!
//! Reference: <https://docs.anthropic.com/en/api/messages>

use wordweave_llm::{ModelTier, ProviderError, StructuredRequest, StructuredResponse, TokenUsage};

const RESPOND_TOOL: &str = "respond";

/// Build the Anthropic Messages API request body for a structured completion.
#[must_use]
pub fn to_api_request(req: &StructuredRequest, model: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "system": req.system,
        "messages": [
            { "role": "user", "content": [{ "type": "text", "text": req.user }] }
        ],
        "max_tokens": req.max_tokens.unwrap_or(4096),
        "temperature": req.temperature,
        "tools": [{
            "name": RESPOND_TOOL,
            "description": "Respond with the structured result.",
            "input_schema": req.response_schema,
        }],
        "tool_choice": { "type": "tool", "name": RESPOND_TOOL },
    })
}

/// Resolve a [`ModelTier`] to a concrete Anthropic model identifier.
pub fn resolve_model(tier: ModelTier, executor_model: &str, supervisor_model: &str) -> String {
    match tier {
        ModelTier::Executor => executor_model.to_string(),
        ModelTier::Supervisor => supervisor_model.to_string(),
    }
}

/// Parse an Anthropic Messages API response into a [`StructuredResponse`].
pub fn from_api_response(body: &serde_json::Value) -> Result<StructuredResponse, ProviderError> {
    let model = body["model"]
        .as_str()
        .ok_or_else(|| ProviderError::InvalidResponse("missing 'model' in response".into()))?
        .to_string();

    let content = body["content"]
        .as_array()
        .ok_or_else(|| ProviderError::InvalidResponse("missing 'content' array".into()))?;

    let value = content
        .iter()
        .find(|block| block["type"] == "tool_use" && block["name"] == RESPOND_TOOL)
        .map(|block| block["input"].clone())
        .ok_or_else(|| {
            ProviderError::InvalidResponse(format!("model did not call '{RESPOND_TOOL}'"))
        })?;

    let usage = TokenUsage {
        prompt_tokens: body["usage"]["input_tokens"].as_u64().unwrap_or(0),
        completion_tokens: body["usage"]["output_tokens"].as_u64().unwrap_or(0),
        cache_read_tokens: body["usage"]["cache_read_input_tokens"].as_u64(),
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
    fn request_forces_respond_tool() {
        let req = StructuredRequest::new(ModelTier::Executor, "sys", "usr", json!({"type": "object"}));
        let body = to_api_request(&req, "claude-test");
        assert_eq!(body["tool_choice"]["name"], RESPOND_TOOL);
        assert_eq!(body["tools"][0]["name"], RESPOND_TOOL);
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
    fn response_extracts_respond_tool_input() {
        let body = json!({
            "model": "claude-sonnet-4-20250514",
            "content": [{
                "type": "tool_use",
                "id": "toolu_1",
                "name": RESPOND_TOOL,
                "input": { "score": 9.0 }
            }],
            "usage": { "input_tokens": 40, "output_tokens": 12 }
        });
        let resp = from_api_response(&body).unwrap();
        assert_eq!(resp.value["score"], 9.0);
        assert_eq!(resp.usage.prompt_tokens, 40);
        assert_eq!(resp.usage.completion_tokens, 12);
    }

    #[test]
    fn response_without_respond_tool_call_is_invalid() {
        let body = json!({
            "model": "claude-sonnet-4-20250514",
            "content": [{ "type": "text", "text": "I refuse to call tools" }],
            "usage": { "input_tokens": 10, "output_tokens": 5 }
        });
        let err = from_api_response(&body).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }
}
