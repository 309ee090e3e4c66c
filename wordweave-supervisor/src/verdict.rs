//! Types exchanged between the supervisor and the quality-gated executor.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The quality judge's verdict on one tool call's output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QualityVerdict {
    /// Score in `[0, 10]`.
    pub score: f64,
    /// Issues found, populated only when `score` is below threshold.
    #[serde(default)]
    pub issues: Vec<String>,
    /// Actionable suggestions, populated only when `score` is below threshold.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl QualityVerdict {
    /// A perfect verdict with no issues, used for tools that skip validation
    /// or short-circuit it (pronunciation, well-formed media, API fallback).
    pub fn perfect() -> Self {
        Self {
            score: 10.0,
            issues: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    /// Whether this verdict meets the given quality threshold.
    pub fn passes(&self, threshold: f64) -> bool {
        self.score >= threshold
    }
}

/// JSON Schema for [`QualityVerdict`], sent to the judge call as the
/// response shape it must conform to.
pub fn quality_verdict_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "score": { "type": "number", "minimum": 0.0, "maximum": 10.0 },
            "issues": { "type": "array", "items": { "type": "string" } },
            "suggestions": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["score"]
    })
}

/// What the executor should do after a quality verdict.
///
/// `should_retry = false` is ambiguous on its own — it covers both "accept
/// this result" (score met the threshold, or met `accept_on_final` on the
/// last retry) and "give up, fall back" (retries exhausted below
/// `accept_on_final`). `accepted` disambiguates so the executor never has
/// to parse `retry_reason` to decide which.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryStrategy {
    /// Whether the tool should be retried.
    pub should_retry: bool,
    /// When `should_retry` is false, whether the result should be accepted
    /// (`true`) or replaced with the tool's fallback (`false`).
    pub accepted: bool,
    /// Human-readable reason, surfaced in logs and traces.
    pub retry_reason: String,
    /// Fields to merge into the tool's input before retrying: quality
    /// feedback, previous issues, and suggestions, for tools that accept it.
    pub adjusted_inputs: HashMap<String, serde_json::Value>,
}

impl RetryStrategy {
    /// No retry needed: the verdict already met the quality threshold, or
    /// met `accept_on_final` on the last retry.
    pub fn accept(reason: impl Into<String>) -> Self {
        Self {
            should_retry: false,
            accepted: true,
            retry_reason: reason.into(),
            adjusted_inputs: HashMap::new(),
        }
    }

    /// Retries exhausted below `accept_on_final`: the executor should fall
    /// back.
    pub fn exhausted(reason: impl Into<String>) -> Self {
        Self {
            should_retry: false,
            accepted: false,
            retry_reason: reason.into(),
            adjusted_inputs: HashMap::new(),
        }
    }

    /// Retry with feedback merged into the tool's next-attempt inputs.
    pub fn retry(reason: impl Into<String>, adjusted_inputs: HashMap<String, serde_json::Value>) -> Self {
        Self {
            should_retry: true,
            accepted: false,
            retry_reason: reason.into(),
            adjusted_inputs,
        }
    }
}
