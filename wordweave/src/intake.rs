//! Request intake: parse and validate one inbound record per SPEC_FULL
//! §4.10 / §6. Rejections here are *input errors* (§7) — reported as a
//! failure for this record, never fatal to the worker.

use serde::Deserialize;

use wordweave_types::{Language, WordWeaveError};

/// The inbound request body, as received from the upstream queue/API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequest {
    /// The word to enrich, as given by the caller.
    pub source_word: String,
    /// The language to translate into.
    pub target_language: String,
    /// The language of `source_word`, if known up front.
    #[serde(default)]
    pub source_language: Option<String>,
    /// Caller identity, used for notification addressing.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Caller-supplied correlation id, echoed back on every event.
    #[serde(default)]
    pub request_id: Option<String>,
}

/// A validated, typed request ready to seed a [`wordweave_types::VocabState`].
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    /// The word to enrich, trimmed.
    pub source_word: String,
    /// The language to translate into.
    pub target_language: Language,
    /// The language of `source_word`, if known up front.
    pub source_language: Option<Language>,
    /// Caller identity, used for notification addressing.
    pub user_id: Option<String>,
    /// Caller-supplied correlation id, echoed back on every event.
    pub request_id: Option<String>,
}

/// Parse a raw JSON body into a [`RawRequest`], then validate it into an
/// [`IntakeRequest`].
///
/// Malformed JSON, an empty (or all-whitespace) `source_word`, or an
/// unrecognized language code are all *input errors*: the record is
/// reported failed, not redelivered as a transient fault.
pub fn parse_and_validate(body: &str) -> Result<IntakeRequest, WordWeaveError> {
    let raw: RawRequest = serde_json::from_str(body)
        .map_err(|err| WordWeaveError::InputError(format!("malformed request body: {err}")))?;
    validate(raw)
}

/// Validate an already-deserialized [`RawRequest`].
pub fn validate(raw: RawRequest) -> Result<IntakeRequest, WordWeaveError> {
    let source_word = raw.source_word.trim().to_string();
    if source_word.is_empty() {
        return Err(WordWeaveError::InputError(
            "source_word must not be empty or whitespace".to_string(),
        ));
    }

    let target_language = Language::from_code(&raw.target_language).ok_or_else(|| {
        WordWeaveError::InputError(format!(
            "unknown target_language code: {}",
            raw.target_language
        ))
    })?;

    let source_language = raw
        .source_language
        .as_deref()
        .map(|code| {
            Language::from_code(code)
                .ok_or_else(|| WordWeaveError::InputError(format!("unknown source_language code: {code}")))
        })
        .transpose()?;

    Ok(IntakeRequest {
        source_word,
        target_language,
        source_language,
        user_id: raw.user_id,
        request_id: raw.request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_source_word() {
        let raw = RawRequest {
            source_word: "   ".to_string(),
            target_language: "es".to_string(),
            source_language: None,
            user_id: None,
            request_id: None,
        };
        assert!(matches!(validate(raw), Err(WordWeaveError::InputError(_))));
    }

    #[test]
    fn rejects_unknown_language_code() {
        let raw = RawRequest {
            source_word: "hola".to_string(),
            target_language: "fr".to_string(),
            source_language: None,
            user_id: None,
            request_id: None,
        };
        assert!(matches!(validate(raw), Err(WordWeaveError::InputError(_))));
    }

    #[test]
    fn accepts_well_formed_request() {
        let raw = RawRequest {
            source_word: " to build ".to_string(),
            target_language: "es".to_string(),
            source_language: Some("en".to_string()),
            user_id: Some("user-1".to_string()),
            request_id: Some("req-1".to_string()),
        };
        let parsed = validate(raw).unwrap();
        assert_eq!(parsed.source_word, "to build");
        assert_eq!(parsed.target_language, Language::Spanish);
        assert_eq!(parsed.source_language, Some(Language::English));
    }

    #[test]
    fn parse_and_validate_rejects_malformed_json() {
        let err = parse_and_validate("{not json").unwrap_err();
        assert!(matches!(err, WordWeaveError::InputError(_)));
    }
}
