//! Integration tests for the OpenAI provider against a mocked Chat Completions API.

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordweave_llm::{ModelTier, Provider, ProviderError, StructuredRequest};
use wordweave_llm_openai::OpenAi;

fn request() -> StructuredRequest {
    StructuredRequest::new(
        ModelTier::Executor,
        "You are a linguistic expert.",
        "Classify 'house'.",
        json!({"type": "object", "properties": {"score": {"type": "number"}}}),
    )
}

#[tokio::test]
async fn sends_strict_json_schema_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "content": "{\"score\": 8.5}" } }],
            "usage": { "prompt_tokens": 33, "completion_tokens": 9 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAi::new("test-key", "gpt-4o-mini", "gpt-4o").with_url(mock_server.uri());

    let response = client
        .complete_structured(request())
        .await
        .expect("mocked call should succeed");

    assert_eq!(response.value["score"], 8.5);
    assert_eq!(response.usage.prompt_tokens, 33);
    assert_eq!(response.usage.completion_tokens, 9);
}

#[tokio::test]
async fn organization_header_is_sent_when_set() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(header("openai-organization", "org-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{ "message": { "content": "{\"score\": 5.0}" } }],
            "usage": { "prompt_tokens": 1, "completion_tokens": 1 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenAi::new("test-key", "gpt-4o-mini", "gpt-4o")
        .with_url(mock_server.uri())
        .with_org("org-123");

    client.complete_structured(request()).await.expect("mocked call should succeed");
}

#[tokio::test]
async fn rate_limit_status_is_a_rate_limited_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("too many requests"))
        .mount(&mock_server)
        .await;

    let client = OpenAi::new("test-key", "gpt-4o-mini", "gpt-4o").with_url(mock_server.uri());

    let err = client.complete_structured(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::RateLimited));
}
