//! DynamoDB-backed store: existence checks, media-reuse lookups, and the
//! idempotent write path.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use wordweave_types::{normalize_word, Language};

use wordweave_types::VocabState;

use crate::attr::item_from_json;
use crate::error::StoreError;
use crate::item::{build_item, normalized_search_words, source_partition_key};

const MEDIA_REUSE_INDEX: &str = "EnglishMediaLookupIndex";

/// Persistence operations against the primary vocabulary table.
///
/// One instance per process: the underlying `aws_sdk_dynamodb::Client`
/// keeps its own pooled HTTP connector, so there is no benefit to building
/// a fresh client per request (§9 "ownership of long-lived clients").
pub struct Store {
    client: Client,
    table_name: String,
}

impl Store {
    /// Wrap an already-configured DynamoDB client.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the ambient AWS config (region, credentials,
    /// retry policy) and wrap it around `table_name`.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config), table_name)
    }

    /// Query for any previously stored translation of `source_word` into
    /// `target_language`, regardless of part of speech. Returns the raw
    /// item as JSON if found.
    pub async fn check_exists(
        &self,
        source_language: Language,
        source_word: &str,
        target_language: Language,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let pk = source_partition_key(source_language, source_word);
        let sk_prefix = format!("TGT#{}", target_language.code());

        let response = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :sk_prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(pk))
            .expression_attribute_values(":sk_prefix", AttributeValue::S(sk_prefix))
            .limit(1)
            .send()
            .await
            .map_err(|err| StoreError::Fault(err.to_string()))?;

        Ok(response
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .map(item_to_json))
    }

    /// Query the media-reuse GSI for each of `search_words` concurrently,
    /// returning the first non-empty hit and abandoning the rest.
    ///
    /// Grounded on the reference's `asyncio.as_completed` first-hit-wins
    /// loop: `tokio::select!` inside a loop over a `JoinSet` gives the same
    /// "stop at the first winner, let the loser futures be dropped"
    /// semantics without an explicit cancellation token.
    pub async fn find_reusable_media(
        &self,
        search_words: &[String],
    ) -> Result<Option<serde_json::Value>, StoreError> {
        if search_words.is_empty() {
            return Ok(None);
        }

        let mut tasks = tokio::task::JoinSet::new();
        for word in search_words {
            let client = self.client.clone();
            let table_name = self.table_name.clone();
            let word = word.clone();
            tasks.spawn(async move { query_media_for_word(&client, &table_name, &word).await });
        }

        while let Some(result) = tasks.join_next().await {
            match result {
                Ok(Some(media)) => {
                    tasks.abort_all();
                    return Ok(Some(media));
                }
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(error = %err, "media reuse lookup task panicked");
                }
            }
        }

        Ok(None)
    }

    /// Write the completed state's row, then fan out per-search-term reuse
    /// rows if media was freshly fetched. A duplicate write (the
    /// conditional put's precondition failing) is logged and treated as
    /// success, per §7's "persistence conflict" taxonomy entry.
    pub async fn store_result(
        &self,
        item: &serde_json::Value,
        search_query: &[String],
        media_freshly_fetched: bool,
    ) -> Result<(), StoreError> {
        let object = item
            .as_object()
            .ok_or_else(|| StoreError::IncompleteResult("item is not a JSON object".to_string()))?;
        let pk = object
            .get("PK")
            .and_then(|v| v.as_str())
            .ok_or_else(|| StoreError::IncompleteResult("PK".to_string()))?
            .to_string();
        let sk = object
            .get("SK")
            .and_then(|v| v.as_str())
            .ok_or_else(|| StoreError::IncompleteResult("SK".to_string()))?
            .to_string();

        let attributes = item_from_json(object);

        let put = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(attributes))
            .condition_expression("attribute_not_exists(PK) and attribute_not_exists(SK)")
            .send()
            .await;

        match put {
            Ok(_) => {
                tracing::info!(pk, sk, "vocab row stored");
            }
            Err(err) => {
                if is_conditional_check_failure(&err) {
                    tracing::info!(pk, sk, "duplicate write ignored");
                    return Ok(());
                }
                return Err(StoreError::Fault(err.to_string()));
            }
        }

        let search_words = normalized_search_words(search_query);
        if media_freshly_fetched && !search_words.is_empty() {
            self.store_search_word_entries(&pk, &sk, &search_words, object.get("media"))
                .await?;
        }

        Ok(())
    }

    /// Build the item for a completed state and store it, per
    /// [`build_item`]'s field requirements.
    pub async fn store_vocab_state(
        &self,
        state: &VocabState,
        user_id: Option<&str>,
        search_query: &[String],
        media_freshly_fetched: bool,
    ) -> Result<(), StoreError> {
        let item = build_item(state, user_id)
            .ok_or_else(|| StoreError::IncompleteResult("state is missing mandatory fields".to_string()))?;
        self.store_result(&item, search_query, media_freshly_fetched).await
    }

    async fn store_search_word_entries(
        &self,
        main_pk: &str,
        main_sk: &str,
        search_words: &[String],
        media: Option<&serde_json::Value>,
    ) -> Result<(), StoreError> {
        let media_attr = media.and_then(crate::attr::to_attribute_value);

        for word in search_words {
            let mut item: HashMap<String, AttributeValue> = HashMap::new();
            item.insert("PK".to_string(), AttributeValue::S(format!("SEARCH#{word}")));
            item.insert(
                "SK".to_string(),
                AttributeValue::S(format!("REF#{main_pk}#{main_sk}")),
            );
            item.insert("english_word".to_string(), AttributeValue::S(word.clone()));
            item.insert("reference_pk".to_string(), AttributeValue::S(main_pk.to_string()));
            item.insert("reference_sk".to_string(), AttributeValue::S(main_sk.to_string()));
            item.insert("schema_version".to_string(), AttributeValue::N("1".to_string()));
            if let Some(media_attr) = media_attr.clone() {
                item.insert("media".to_string(), media_attr);
            }

            self.client
                .put_item()
                .table_name(&self.table_name)
                .set_item(Some(item))
                .send()
                .await
                .map_err(|err| StoreError::Fault(err.to_string()))?;
        }

        tracing::debug!(count = search_words.len(), "search word entries stored");
        Ok(())
    }
}

async fn query_media_for_word(
    client: &Client,
    table_name: &str,
    word: &str,
) -> Option<serde_json::Value> {
    let normalized = normalize_word(word);
    let response = client
        .query()
        .table_name(table_name)
        .index_name(MEDIA_REUSE_INDEX)
        .key_condition_expression("english_word = :w")
        .expression_attribute_values(":w", AttributeValue::S(normalized))
        .projection_expression("media")
        .limit(1)
        .send()
        .await;

    match response {
        Ok(output) => {
            let item = output.items.unwrap_or_default().into_iter().next()?;
            let media = item.get("media")?;
            let mut value = attribute_value_to_json(media);
            if let serde_json::Value::Object(ref mut map) = value {
                map.insert("matched_word".to_string(), serde_json::json!(word));
            }
            Some(value)
        }
        Err(err) => {
            tracing::warn!(word, error = %err, "english media lookup failed");
            None
        }
    }
}

fn is_conditional_check_failure<E: std::fmt::Display>(err: &E) -> bool {
    err.to_string().contains("ConditionalCheckFailed")
}

fn item_to_json(item: HashMap<String, AttributeValue>) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, value) in item {
        map.insert(key, attribute_value_to_json(&value));
    }
    serde_json::Value::Object(map)
}

fn attribute_value_to_json(value: &AttributeValue) -> serde_json::Value {
    match value {
        AttributeValue::S(s) => serde_json::Value::String(s.clone()),
        AttributeValue::N(n) => n
            .parse::<i64>()
            .map(serde_json::Value::from)
            .or_else(|_| n.parse::<f64>().map(serde_json::Value::from))
            .unwrap_or(serde_json::Value::Null),
        AttributeValue::Bool(b) => serde_json::Value::Bool(*b),
        AttributeValue::L(list) => serde_json::Value::Array(list.iter().map(attribute_value_to_json).collect()),
        AttributeValue::M(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                object.insert(k.clone(), attribute_value_to_json(v));
            }
            serde_json::Value::Object(object)
        }
        AttributeValue::Null(_) => serde_json::Value::Null,
        _ => serde_json::Value::Null,
    }
}
