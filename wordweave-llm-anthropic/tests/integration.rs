//! Integration tests for the Anthropic provider against a mocked Messages API.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordweave_llm::{ModelTier, Provider, ProviderError, StructuredRequest};
use wordweave_llm_anthropic::Anthropic;

fn request() -> StructuredRequest {
    StructuredRequest::new(
        ModelTier::Executor,
        "You are a linguistic expert.",
        "Classify 'house'.",
        json!({"type": "object", "properties": {"score": {"type": "number"}}}),
    )
}

#[tokio::test]
async fn sends_forced_tool_call_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "claude-haiku-4-5-20251001",
            "content": [{
                "type": "tool_use",
                "id": "toolu_1",
                "name": "respond",
                "input": { "score": 9.0 }
            }],
            "usage": { "input_tokens": 42, "output_tokens": 11 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Anthropic::new("test-key", "claude-haiku-4-5-20251001", "claude-sonnet-4-20250514")
        .base_url(mock_server.uri());

    let (value, response) = client
        .complete_structured(request())
        .await
        .map(|r| (r.value.clone(), r))
        .expect("mocked call should succeed");

    assert_eq!(value["score"], 9.0);
    assert_eq!(response.usage.prompt_tokens, 42);
    assert_eq!(response.usage.completion_tokens, 11);
    assert_eq!(response.model, "claude-haiku-4-5-20251001");
}

#[tokio::test]
async fn server_error_is_a_request_failed_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let client =
        Anthropic::new("test-key", "claude-haiku-4-5-20251001", "claude-sonnet-4-20250514").base_url(mock_server.uri());

    let err = client.complete_structured(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::RequestFailed(_)));
}

#[tokio::test]
async fn response_without_tool_call_is_invalid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "claude-haiku-4-5-20251001",
            "content": [{ "type": "text", "text": "I'd rather not." }],
            "usage": { "input_tokens": 10, "output_tokens": 5 }
        })))
        .mount(&mock_server)
        .await;

    let client =
        Anthropic::new("test-key", "claude-haiku-4-5-20251001", "claude-sonnet-4-20250514").base_url(mock_server.uri());

    let err = client.complete_structured(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}
