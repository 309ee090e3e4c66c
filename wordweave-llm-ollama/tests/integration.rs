//! Integration tests for the Ollama provider against a mocked local server.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wordweave_llm::{ModelTier, Provider, ProviderError, StructuredRequest};
use wordweave_llm_ollama::Ollama;

fn request() -> StructuredRequest {
    StructuredRequest::new(
        ModelTier::Executor,
        "You are a linguistic expert.",
        "Classify 'house'.",
        json!({"type": "object", "properties": {"score": {"type": "number"}}}),
    )
}

#[tokio::test]
async fn sends_schema_in_format_field_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "message": { "role": "assistant", "content": "{\"score\": 7.0}" },
            "prompt_eval_count": 48,
            "eval_count": 14
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Ollama::new("llama3.1", "llama3.1:70b").with_base_url(mock_server.uri());

    let response = client
        .complete_structured(request())
        .await
        .expect("mocked call should succeed");

    assert_eq!(response.value["score"], 7.0);
    assert_eq!(response.usage.prompt_tokens, 48);
    assert_eq!(response.usage.completion_tokens, 14);
    assert!(response.cost.is_none());
}

#[tokio::test]
async fn supervisor_tier_requests_the_supervisor_model() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1:70b",
            "message": { "role": "assistant", "content": "{\"score\": 9.0}" },
            "prompt_eval_count": 10,
            "eval_count": 2
        })))
        .mount(&mock_server)
        .await;

    let client = Ollama::new("llama3.1", "llama3.1:70b").with_base_url(mock_server.uri());
    let req = StructuredRequest::new(ModelTier::Supervisor, "sys", "usr", json!({"type": "object"}));

    let response = client.complete_structured(req).await.expect("mocked call should succeed");
    assert_eq!(response.model, "llama3.1:70b");
}

#[tokio::test]
async fn model_not_found_is_an_invalid_response_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model 'llama3.1' not found"))
        .mount(&mock_server)
        .await;

    let client = Ollama::new("llama3.1", "llama3.1:70b").with_base_url(mock_server.uri());

    let err = client.complete_structured(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_request_failed_error() {
    let client = Ollama::new("llama3.1", "llama3.1:70b").with_base_url("http://127.0.0.1:1");

    let err = client.complete_structured(request()).await.unwrap_err();
    assert!(matches!(err, ProviderError::RequestFailed(_)));
}
