//! Environment-driven configuration, loaded once at process start into a
//! typed, immutable struct per SPEC_FULL §11 (mirrors the §6 enumerated
//! environment variables, `serde`-backed defaults where sensible).

use thiserror::Error;

const DEFAULT_PROCESSING_TIMEOUT_SECONDS: u64 = 90;
const DEFAULT_QUALITY_THRESHOLD: f64 = 8.0;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_ACCEPT_ON_FINAL: f64 = 7.25;

/// A required environment variable was absent or malformed at startup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable was not set.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// A variable was set but failed to parse into its expected type.
    #[error("environment variable {name} has invalid value {value:?}: {reason}")]
    Invalid {
        /// The variable's name.
        name: &'static str,
        /// The raw value read from the environment.
        value: String,
        /// Why it failed to parse.
        reason: String,
    },
}

/// Which LLM backend the binary should wire up for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    /// Anthropic Messages API.
    Anthropic,
    /// OpenAI Chat Completions API.
    OpenAi,
    /// Local Ollama server.
    Ollama,
}

impl LlmProviderKind {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            other => Err(ConfigError::Invalid {
                name: "LLM_PROVIDER",
                value: other.to_string(),
                reason: "expected one of anthropic, openai, ollama".to_string(),
            }),
        }
    }
}

/// Persistence, transport, and quality-gate configuration for one process.
///
/// Loaded once via [`Config::from_env`] and shared read-only across every
/// request the process handles (§5 "shared resources").
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table backing [`wordweave_store::Store`].
    pub vocab_table_name: String,
    /// DynamoDB table backing [`wordweave_notify::ConnectionRegistry`].
    pub connections_table_name: String,
    /// S3 bucket backing [`wordweave_media::Blobs`].
    pub media_bucket_name: String,
    /// API Gateway Management API endpoint for outbound WebSocket frames.
    pub websocket_api_endpoint: String,
    /// Wall-clock budget for one full graph run.
    pub processing_timeout_seconds: u64,
    /// Minimum score to approve a tool's output outright.
    pub quality_threshold: f64,
    /// Maximum retries per tool before falling back.
    pub max_retries: u32,
    /// Score required to accept on the final retry.
    pub accept_on_final: f64,
    /// Which LLM backend to construct.
    pub llm_provider: LlmProviderKind,
    /// API key (or, for Ollama, an ignored placeholder) for the LLM backend.
    pub llm_api_key: String,
    /// Model identifier used for first-attempt tool calls.
    pub llm_executor_model: String,
    /// Model identifier used for quality checks and escalated tool calls.
    pub llm_supervisor_model: String,
    /// ElevenLabs API key for text-to-speech synthesis.
    pub tts_api_key: String,
    /// Pexels API key for stock photo search.
    pub pexels_api_key: String,
    /// Whether to install [`wordweave_hooks::TracingUsageObserver`] instead
    /// of [`wordweave_llm::NoopObserver`] on the gateway.
    pub tracing_enabled: bool,
}

impl Config {
    /// Load configuration from the process environment, failing fast with
    /// a descriptive error if a required variable is missing or malformed
    /// rather than panicking deep in a request path.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            vocab_table_name: required("VOCAB_TABLE_NAME")?,
            connections_table_name: required("CONNECTIONS_TABLE_NAME")?,
            media_bucket_name: required("MEDIA_BUCKET_NAME")?,
            websocket_api_endpoint: required("WEBSOCKET_API_ENDPOINT")?,
            processing_timeout_seconds: parsed_or(
                "PROCESSING_TIMEOUT_SECONDS",
                DEFAULT_PROCESSING_TIMEOUT_SECONDS,
            )?,
            quality_threshold: parsed_or("QUALITY_THRESHOLD", DEFAULT_QUALITY_THRESHOLD)?,
            max_retries: parsed_or("MAX_RETRIES", DEFAULT_MAX_RETRIES)?,
            accept_on_final: parsed_or("ACCEPT_ON_FINAL", DEFAULT_ACCEPT_ON_FINAL)?,
            llm_provider: LlmProviderKind::parse(&required("LLM_PROVIDER")?)?,
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or_default(),
            llm_executor_model: required("LLM_EXECUTOR_MODEL")?,
            llm_supervisor_model: required("LLM_SUPERVISOR_MODEL")?,
            tts_api_key: required("TTS_API_KEY")?,
            pexels_api_key: required("PEXELS_API_KEY")?,
            tracing_enabled: std::env::var("TRACING_ENABLED")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// The graph's wall-clock deadline, derived from
    /// `processing_timeout_seconds`.
    pub fn processing_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.processing_timeout_seconds)
    }

    /// Thresholds for [`wordweave_supervisor::SupervisorConfig`].
    pub fn supervisor_config(&self) -> wordweave_supervisor::SupervisorConfig {
        wordweave_supervisor::SupervisorConfig {
            quality_threshold: self.quality_threshold,
            max_retries: self.max_retries,
            accept_on_final: self.accept_on_final,
        }
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.parse::<T>().map_err(|err| ConfigError::Invalid {
            name,
            value,
            reason: err.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn llm_provider_kind_parses_known_values() {
        assert_eq!(LlmProviderKind::parse("anthropic").unwrap(), LlmProviderKind::Anthropic);
        assert_eq!(LlmProviderKind::parse("OpenAI").unwrap(), LlmProviderKind::OpenAi);
        assert_eq!(LlmProviderKind::parse("ollama").unwrap(), LlmProviderKind::Ollama);
    }

    #[test]
    fn llm_provider_kind_rejects_unknown_values() {
        assert!(LlmProviderKind::parse("mistral").is_err());
    }

    #[test]
    fn parsed_or_falls_back_to_default_when_unset() {
        std::env::remove_var("WORDWEAVE_TEST_UNSET_VAR");
        let value: u64 = parsed_or("WORDWEAVE_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
