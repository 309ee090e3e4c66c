//! The connections table: subscription bookkeeping and subscriber lookup,
//! grounded on `websocket_utils.py`'s table/GSI access.

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::error::NotifyError;
use crate::message::vocab_word_key;
use wordweave_types::Language;

const VOCAB_WORD_INDEX: &str = "VocabWordConnectionsIndex";
const USER_CONNECTIONS_INDEX: &str = "UserConnectionsIndex";

/// Wraps the WebSocket connections table: one row per open connection,
/// keyed by `connection_id`, with secondary indexes on `vocab_word` and
/// `user_id` for fan-out lookups.
pub struct ConnectionRegistry {
    client: Client,
    table_name: String,
}

impl ConnectionRegistry {
    /// Wrap an already-configured client around `table_name`.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS config.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config), table_name)
    }

    /// Subscribe `connection_id` to updates for `(source_word, target_language)`.
    pub async fn subscribe_to_vocab_word(
        &self,
        connection_id: &str,
        source_word: &str,
        target_language: Language,
    ) -> Result<(), NotifyError> {
        let key = vocab_word_key(source_word, target_language);

        self.client
            .update_item()
            .table_name(&self.table_name)
            .key("connection_id", AttributeValue::S(connection_id.to_string()))
            .update_expression("SET vocab_word = :vocab_word, last_subscription = :timestamp")
            .expression_attribute_values(":vocab_word", AttributeValue::S(key))
            .expression_attribute_values(":timestamp", AttributeValue::S(chrono::Utc::now().to_rfc3339()))
            .send()
            .await
            .map_err(|e| NotifyError::Subscribe(e.to_string()))?;

        Ok(())
    }

    /// All connections subscribed to `(source_word, target_language)`.
    pub async fn vocab_word_subscribers(&self, source_word: &str, target_language: Language) -> Result<Vec<String>, NotifyError> {
        let key = vocab_word_key(source_word, target_language);

        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(VOCAB_WORD_INDEX)
            .key_condition_expression("vocab_word = :vocab_word")
            .expression_attribute_values(":vocab_word", AttributeValue::S(key))
            .send()
            .await
            .map_err(|e| NotifyError::Query(e.to_string()))?;

        Ok(connection_ids(response.items()))
    }

    /// All connections belonging to `user_id`, regardless of subscription.
    pub async fn user_connections(&self, user_id: &str) -> Result<Vec<String>, NotifyError> {
        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(USER_CONNECTIONS_INDEX)
            .key_condition_expression("user_id = :user_id")
            .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
            .send()
            .await
            .map_err(|e| NotifyError::Query(e.to_string()))?;

        Ok(connection_ids(response.items()))
    }

    /// Remove a connection row, because `post_to_connection` reported it gone.
    pub async fn remove_stale(&self, connection_id: &str) {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("connection_id", AttributeValue::S(connection_id.to_string()))
            .send()
            .await;

        match result {
            Ok(_) => tracing::info!(connection_id, "removed stale connection"),
            Err(e) => tracing::warn!(connection_id, error = %e, "failed to remove stale connection"),
        }
    }
}

fn connection_ids(items: &[std::collections::HashMap<String, AttributeValue>]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get("connection_id"))
        .filter_map(|v| v.as_s().ok().cloned())
        .collect()
}
