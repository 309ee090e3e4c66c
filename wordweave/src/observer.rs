//! The one usage observer type every gateway in the process is built
//! around.
//!
//! [`wordweave_llm::UsageObserver`] is object-safe, but giving every tool's
//! [`wordweave_llm::Gateway`] the same concrete `O` type parameter avoids
//! threading a trait object through nine call sites for what is, in
//! practice, a binary choice made once at startup (`TRACING_ENABLED`).

use wordweave_hooks::TracingUsageObserver;
use wordweave_llm::{NoopObserver, TokenUsage, UsageObserver};

/// Either the no-op observer or the tracing-span observer, selected once in
/// [`crate::config::Config::from_env`] via `TRACING_ENABLED`.
#[derive(Debug, Clone, Copy)]
pub enum DynObserver {
    /// No observation; used when tracing is disabled.
    Noop(NoopObserver),
    /// Emits a `gen_ai.client.completion` tracing event per call.
    Tracing(TracingUsageObserver),
}

impl DynObserver {
    /// Select an observer based on the `tracing_enabled` config flag.
    #[must_use]
    pub fn from_flag(tracing_enabled: bool) -> Self {
        if tracing_enabled {
            Self::Tracing(TracingUsageObserver::new())
        } else {
            Self::Noop(NoopObserver)
        }
    }
}

impl UsageObserver for DynObserver {
    fn observe(&self, model: &str, usage: &TokenUsage) {
        match self {
            Self::Noop(o) => o.observe(model, usage),
            Self::Tracing(o) => o.observe(model, usage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_flag_selects_variant() {
        assert!(matches!(DynObserver::from_flag(false), DynObserver::Noop(_)));
        assert!(matches!(DynObserver::from_flag(true), DynObserver::Tracing(_)));
    }

    #[test]
    fn observe_does_not_panic_for_either_variant() {
        let usage = TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 1,
            cache_read_tokens: None,
        };
        DynObserver::from_flag(false).observe("m", &usage);
        DynObserver::from_flag(true).observe("m", &usage);
    }
}
