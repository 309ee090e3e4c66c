//! Broadcasting notifications to every connection subscribed to a vocab
//! word, grounded on `websocket_utils.py`'s `WebSocketNotifier`.

use aws_sdk_apigatewaymanagementapi::primitives::Blob;
use aws_sdk_apigatewaymanagementapi::Client as ApiGatewayClient;

use wordweave_types::Language;

use crate::message::Notification;
use crate::registry::ConnectionRegistry;

/// Sends pipeline progress events to every WebSocket connection subscribed
/// to the word pair being processed.
pub struct Notifier {
    registry: ConnectionRegistry,
    api_gateway: ApiGatewayClient,
    user_id: String,
    request_id: Option<String>,
}

impl Notifier {
    /// Build a notifier for a single pipeline run. `user_id` defaults to
    /// `"anonymous"`, matching requests with no authenticated caller.
    pub fn new(registry: ConnectionRegistry, api_gateway: ApiGatewayClient, user_id: Option<String>, request_id: Option<String>) -> Self {
        Self {
            registry,
            api_gateway,
            user_id: user_id.unwrap_or_else(|| "anonymous".to_string()),
            request_id,
        }
    }

    /// Build the API Gateway Management API client from an endpoint URL and
    /// the ambient AWS config.
    pub async fn api_gateway_client(endpoint_url: &str) -> ApiGatewayClient {
        let config = aws_config::load_from_env().await;
        let override_config = aws_sdk_apigatewaymanagementapi::config::Builder::from(&config)
            .endpoint_url(endpoint_url)
            .build();
        ApiGatewayClient::from_conf(override_config)
    }

    /// Subscribe `connection_id` to updates for this word pair.
    pub async fn subscribe(&self, connection_id: &str, source_word: &str, target_language: Language) -> bool {
        self.registry
            .subscribe_to_vocab_word(connection_id, source_word, target_language)
            .await
            .is_ok()
    }

    /// Broadcast `processing_started`.
    pub async fn processing_started(&self, source_word: &str, target_language: Language) -> usize {
        let note = Notification::processing_started(&self.user_id, self.request_id.as_deref(), source_word, target_language);
        self.broadcast(source_word, target_language, note).await
    }

    /// Broadcast a `step_update` for a single pipeline step.
    pub async fn step_update(
        &self,
        source_word: &str,
        target_language: Language,
        step_name: &str,
        step_data: serde_json::Value,
        status: &str,
    ) -> usize {
        let note = Notification::step_update(&self.user_id, self.request_id.as_deref(), source_word, target_language, step_name, step_data, status);
        self.broadcast(source_word, target_language, note).await
    }

    /// Broadcast a `chunk_update` for streamed partial output.
    pub async fn chunk_update(&self, source_word: &str, target_language: Language, chunk: serde_json::Value) -> usize {
        let note = Notification::chunk_update(&self.user_id, self.request_id.as_deref(), source_word, target_language, chunk);
        self.broadcast(source_word, target_language, note).await
    }

    /// Broadcast `processing_completed`.
    pub async fn processing_completed(&self, source_word: &str, target_language: Language, result: serde_json::Value) -> usize {
        let note = Notification::processing_completed(&self.user_id, self.request_id.as_deref(), source_word, target_language, result);
        self.broadcast(source_word, target_language, note).await
    }

    /// Broadcast `processing_failed`.
    pub async fn processing_failed(&self, source_word: &str, target_language: Language, error: &str) -> usize {
        let note = Notification::processing_failed(&self.user_id, self.request_id.as_deref(), source_word, target_language, error);
        self.broadcast(source_word, target_language, note).await
    }

    /// Broadcast `cache_hit`.
    pub async fn cache_hit(&self, source_word: &str, target_language: Language, cached: serde_json::Value) -> usize {
        let note = Notification::cache_hit(&self.user_id, self.request_id.as_deref(), source_word, target_language, cached);
        self.broadcast(source_word, target_language, note).await
    }

    async fn broadcast(&self, source_word: &str, target_language: Language, message: Notification) -> usize {
        let connections = match self.registry.vocab_word_subscribers(source_word, target_language).await {
            Ok(connections) => connections,
            Err(e) => {
                tracing::error!(error = %e, source_word, "failed to look up subscribers");
                return 0;
            }
        };

        let total = connections.len();
        let mut sent = 0;
        for connection_id in &connections {
            if self.send_to_connection(connection_id, &message).await {
                sent += 1;
            }
        }

        tracing::info!(
            message_type = message.kind(),
            total_subscribers = total,
            successful_sends = sent,
            initiated_by = %self.user_id,
            "broadcast to vocab word subscribers"
        );

        sent
    }

    async fn send_to_connection(&self, connection_id: &str, message: &Notification) -> bool {
        let result = self
            .api_gateway
            .post_to_connection()
            .connection_id(connection_id)
            .data(Blob::new(message.to_bytes()))
            .send()
            .await;

        match result {
            Ok(_) => true,
            Err(err) => {
                let is_gone = err
                    .as_service_error()
                    .map(|service_err| service_err.is_gone_exception())
                    .unwrap_or(false);

                if is_gone {
                    tracing::info!(connection_id, "stale connection, removing");
                    self.registry.remove_stale(connection_id).await;
                } else {
                    tracing::error!(connection_id, error = %err, "websocket send failed");
                }
                false
            }
        }
    }
}
