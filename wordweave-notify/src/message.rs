//! Notification message shapes, grounded on `websocket_utils.py`'s
//! `_create_message` and its `send_*` helpers.

use wordweave_types::{normalize_word, Language};

/// A standardized WebSocket event envelope.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    message_type: &'static str,
    timestamp: String,
    user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<String>,
    data: serde_json::Value,
}

impl Notification {
    fn new(message_type: &'static str, user_id: &str, request_id: Option<&str>, step: Option<&str>, data: serde_json::Value) -> Self {
        Self {
            message_type,
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_id: user_id.to_string(),
            request_id: request_id.map(str::to_string),
            step: step.map(str::to_string),
            data,
        }
    }

    /// All subscribers to a word pair should start seeing progress.
    pub fn processing_started(user_id: &str, request_id: Option<&str>, source_word: &str, target_language: Language) -> Self {
        Self::new(
            "processing_started",
            user_id,
            request_id,
            None,
            serde_json::json!({
                "source_word": source_word,
                "target_language": target_language.code(),
                "status": "started",
            }),
        )
    }

    /// A single pipeline step finished (or is still running, for partial updates).
    pub fn step_update(
        user_id: &str,
        request_id: Option<&str>,
        source_word: &str,
        target_language: Language,
        step_name: &str,
        step_data: serde_json::Value,
        status: &str,
    ) -> Self {
        Self::new(
            "step_update",
            user_id,
            request_id,
            Some(step_name),
            serde_json::json!({
                "source_word": source_word,
                "target_language": target_language.code(),
                "status": status,
                "result": step_data,
            }),
        )
    }

    /// A streamed partial chunk of model output.
    pub fn chunk_update(user_id: &str, request_id: Option<&str>, source_word: &str, target_language: Language, chunk: serde_json::Value) -> Self {
        Self::new(
            "chunk_update",
            user_id,
            request_id,
            None,
            serde_json::json!({
                "source_word": source_word,
                "target_language": target_language.code(),
                "chunk": chunk,
            }),
        )
    }

    /// The full pipeline finished for this word pair.
    pub fn processing_completed(
        user_id: &str,
        request_id: Option<&str>,
        source_word: &str,
        target_language: Language,
        result: serde_json::Value,
    ) -> Self {
        Self::new(
            "processing_completed",
            user_id,
            request_id,
            None,
            serde_json::json!({
                "source_word": source_word,
                "target_language": target_language.code(),
                "status": "completed",
                "result": result,
            }),
        )
    }

    /// The pipeline failed for this word pair.
    pub fn processing_failed(user_id: &str, request_id: Option<&str>, source_word: &str, target_language: Language, error: &str) -> Self {
        Self::new(
            "processing_failed",
            user_id,
            request_id,
            None,
            serde_json::json!({
                "source_word": source_word,
                "target_language": target_language.code(),
                "status": "failed",
                "error": error,
            }),
        )
    }

    /// The word pair was already in the store; no pipeline run was needed.
    pub fn cache_hit(
        user_id: &str,
        request_id: Option<&str>,
        source_word: &str,
        target_language: Language,
        cached: serde_json::Value,
    ) -> Self {
        Self::new(
            "cache_hit",
            user_id,
            request_id,
            None,
            serde_json::json!({
                "source_word": source_word,
                "target_language": target_language.code(),
                "status": "cached",
                "result": cached,
            }),
        )
    }

    /// Serialize to the JSON bytes sent over the connection.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("notification always serializes")
    }

    /// The message's `type` field, for logging.
    pub fn kind(&self) -> &'static str {
        self.message_type
    }
}

/// The partition-key value subscribers are indexed under: a stable
/// combination of target language and normalized source word.
pub fn vocab_word_key(source_word: &str, target_language: Language) -> String {
    format!("{}#{}", target_language.code(), normalize_word(source_word))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocab_word_key_is_lowercase_and_normalized() {
        assert_eq!(vocab_word_key("Construir ", Language::Spanish), "es#construir");
    }

    #[test]
    fn notification_serializes_type_field() {
        let note = Notification::cache_hit("anon", None, "casa", Language::Spanish, serde_json::json!({}));
        let value: serde_json::Value = serde_json::from_slice(&note.to_bytes()).unwrap();
        assert_eq!(value["type"], "cache_hit");
        assert_eq!(value["data"]["status"], "cached");
    }
}
