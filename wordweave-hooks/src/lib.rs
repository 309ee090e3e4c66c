#![deny(missing_docs)]
//! Hook registry and composition for the wordweave pipeline.
//!
//! Tracing spans (per SPEC_FULL §11) cover the primary observability path —
//! every LLM call and quality-gate decision opens its own span. The
//! [`HookRegistry`] exists for side-channel consumers that want to react to
//! the same events without threading a bespoke sink trait through every
//! layer: a metrics exporter, an audit log, a test harness that records
//! graph transitions for assertions.
//!
//! The [`HookRegistry`] collects [`Hook`] implementations and dispatches
//! events to whichever hooks registered interest in that [`HookPoint`], in
//! registration order. Hook errors are logged and do not interrupt the
//! pipeline: a broken metrics exporter must never fail a vocabulary
//! enrichment request.

mod tracing_observer;

pub use tracing_observer::TracingUsageObserver;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// A point in the pipeline's lifecycle a [`Hook`] can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// A tool call is about to be attempted (including retries).
    ToolCallStarted,
    /// A tool call finished, successfully or via fallback.
    ToolCallCompleted,
    /// The supervisor scored a tool's output against its schema/prompt.
    QualityCheckCompleted,
    /// A retry was scheduled for a tool with feedback injected.
    RetryScheduled,
    /// One branch of the parallel fan-out finished.
    ParallelTaskCompleted,
    /// The graph reached its terminal state for a request.
    GraphCompleted,
}

/// Event payload delivered to hooks at a [`HookPoint`].
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Which lifecycle point this event represents.
    pub point: HookPoint,
    /// Name of the tool involved, when the point is tool-scoped.
    pub tool_name: Option<String>,
    /// Correlates events belonging to the same inbound request.
    pub request_id: Option<String>,
    /// Event-specific details (score, retry count, fallback reason, ...).
    pub payload: serde_json::Value,
}

impl HookContext {
    /// Build a context for a pipeline-wide event with no specific tool.
    #[must_use]
    pub fn new(point: HookPoint, payload: serde_json::Value) -> Self {
        Self {
            point,
            tool_name: None,
            request_id: None,
            payload,
        }
    }

    /// Attach a tool name to this context.
    #[must_use]
    pub fn with_tool(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    /// Attach a request id to this context.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Error raised by a [`Hook`] while handling an event.
///
/// The [`HookRegistry`] logs these and continues; they never abort a
/// request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HookError {
    /// The hook's side-channel (exporter, log sink, ...) rejected the event.
    #[error("hook '{hook}' failed: {message}")]
    DeliveryFailed {
        /// Name of the hook that failed, for the log line.
        hook: String,
        /// Human-readable failure detail.
        message: String,
    },
}

/// A side-channel observer of pipeline lifecycle events.
#[async_trait]
pub trait Hook: Send + Sync {
    /// A short name used in error log lines.
    fn name(&self) -> &str;

    /// The points this hook wants to be notified about.
    fn points(&self) -> &[HookPoint];

    /// Handle one event. Errors are logged by the registry, not propagated
    /// to the pipeline.
    async fn on_event(&self, ctx: &HookContext) -> Result<(), HookError>;
}

/// A registry that dispatches lifecycle events to every interested hook.
///
/// Hooks are called in registration order. Unlike a middleware chain, there
/// is no short-circuiting: every matching hook always runs, because these
/// are observers, not gatekeepers. A hook's error is logged via `tracing`
/// and the remaining hooks still run.
pub struct HookRegistry {
    hooks: Vec<Arc<dyn Hook>>,
}

impl HookRegistry {
    /// Create a new empty hook registry.
    #[must_use]
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Add a hook to the registry.
    pub fn add(&mut self, hook: Arc<dyn Hook>) {
        self.hooks.push(hook);
    }

    /// Dispatch an event to every hook registered for `ctx.point`.
    pub async fn dispatch(&self, ctx: &HookContext) {
        for hook in &self.hooks {
            if !hook.points().contains(&ctx.point) {
                continue;
            }

            if let Err(err) = hook.on_event(ctx).await {
                tracing::warn!(hook = hook.name(), error = %err, "hook failed, continuing");
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingHook {
        points: Vec<HookPoint>,
        count: AtomicUsize,
    }

    #[async_trait]
    impl Hook for CountingHook {
        fn name(&self) -> &str {
            "counting"
        }

        fn points(&self) -> &[HookPoint] {
            &self.points
        }

        async fn on_event(&self, _ctx: &HookContext) -> Result<(), HookError> {
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingHook;

    #[async_trait]
    impl Hook for FailingHook {
        fn name(&self) -> &str {
            "failing"
        }

        fn points(&self) -> &[HookPoint] {
            &[HookPoint::ToolCallCompleted]
        }

        async fn on_event(&self, _ctx: &HookContext) -> Result<(), HookError> {
            Err(HookError::DeliveryFailed {
                hook: "failing".into(),
                message: "sink unreachable".into(),
            })
        }
    }

    #[tokio::test]
    async fn dispatch_calls_only_matching_hooks() {
        let counter = Arc::new(CountingHook {
            points: vec![HookPoint::QualityCheckCompleted],
            count: AtomicUsize::new(0),
        });
        let mut registry = HookRegistry::new();
        registry.add(counter.clone());

        registry
            .dispatch(&HookContext::new(
                HookPoint::ToolCallStarted,
                serde_json::json!({}),
            ))
            .await;
        assert_eq!(counter.count.load(Ordering::SeqCst), 0);

        registry
            .dispatch(&HookContext::new(
                HookPoint::QualityCheckCompleted,
                serde_json::json!({"score": 8.0}),
            ))
            .await;
        assert_eq!(counter.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_hook_does_not_stop_dispatch() {
        let counter = Arc::new(CountingHook {
            points: vec![HookPoint::ToolCallCompleted],
            count: AtomicUsize::new(0),
        });
        let mut registry = HookRegistry::new();
        registry.add(Arc::new(FailingHook));
        registry.add(counter.clone());

        registry
            .dispatch(&HookContext::new(
                HookPoint::ToolCallCompleted,
                serde_json::json!({}),
            ))
            .await;

        assert_eq!(counter.count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn context_builders_set_fields() {
        let ctx = HookContext::new(HookPoint::RetryScheduled, serde_json::json!({}))
            .with_tool("translation")
            .with_request_id("req-1");
        assert_eq!(ctx.tool_name.as_deref(), Some("translation"));
        assert_eq!(ctx.request_id.as_deref(), Some("req-1"));
    }
}
