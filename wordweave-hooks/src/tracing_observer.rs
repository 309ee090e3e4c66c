//! A [`wordweave_llm::UsageObserver`] that emits a `tracing` event per call.
//!
//! Field names follow OpenTelemetry GenAI semantic conventions
//! (`gen_ai.request.model`, `gen_ai.usage.input_tokens`,
//! `gen_ai.usage.output_tokens`) so the optional observability sink is
//! simply "this event exists" — no bespoke sink trait is needed beyond
//! what `wordweave_llm::UsageObserver` already defines.

use wordweave_llm::{TokenUsage, UsageObserver};

/// Emits one `tracing::info!` event per completed gateway call.
///
/// Enabled unconditionally by the binary when `TRACING_ENABLED` is set;
/// otherwise [`wordweave_llm::NoopObserver`] is used instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingUsageObserver;

impl TracingUsageObserver {
    /// Create a new observer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl UsageObserver for TracingUsageObserver {
    fn observe(&self, model: &str, usage: &TokenUsage) {
        tracing::info!(
            gen_ai.request.model = model,
            gen_ai.usage.input_tokens = usage.prompt_tokens,
            gen_ai.usage.output_tokens = usage.completion_tokens,
            gen_ai.usage.cache_read_tokens = usage.cache_read_tokens,
            "gen_ai.client.completion"
        );
    }
}
