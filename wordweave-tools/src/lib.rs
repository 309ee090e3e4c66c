#![deny(missing_docs)]
//! Tool interface and typed schemas for the vocabulary-enrichment pipeline.
//!
//! Defines the [`ToolDyn`] trait for object-safe tool dispatch, the
//! [`ToolRegistry`] that the graph engine looks tools up by name in, and
//! the typed input/output contracts (and fallback shapes) for each of the
//! nine pipeline tools in [`schema`].

pub mod schema;

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use thiserror::Error;

/// Errors from tool operations.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found in the registry.
    #[error("tool not found: {0}")]
    NotFound(String),

    /// Tool execution failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The input provided to the tool was invalid.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Catch-all for other errors.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A tool's raw output plus the prompt text it was given, when the tool is
/// LLM-backed. The quality gate needs both: the output to score, and the
/// prompt to check requirement-adherence against.
#[derive(Debug, Clone)]
pub struct ToolCallResult {
    /// The tool's output, in the shape `output_schema()` describes.
    pub value: serde_json::Value,
    /// The prompt text sent to the LLM, if this tool is LLM-backed.
    pub prompt: Option<String>,
}

impl ToolCallResult {
    /// Wrap a result with no associated prompt (non-LLM-backed tools).
    pub fn new(value: serde_json::Value) -> Self {
        Self { value, prompt: None }
    }

    /// Wrap a result together with the prompt text that produced it.
    pub fn with_prompt(value: serde_json::Value, prompt: impl Into<String>) -> Self {
        Self {
            value,
            prompt: Some(prompt.into()),
        }
    }
}

/// Object-safe trait for a pipeline tool implementation.
///
/// The quality-gated executor (`wordweave-supervisor`) drives tools purely
/// through this interface: it never knows whether a tool is LLM-backed,
/// an HTTP call, or a pure function. Tools are stored as `Arc<dyn ToolDyn>`
/// in [`ToolRegistry`].
pub trait ToolDyn: Send + Sync {
    /// The tool's unique name, as used in `{tool}_quality_approved` state fields.
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// JSON Schema the tool's output is validated against by the quality gate.
    fn output_schema(&self) -> serde_json::Value;

    /// Execute the tool with the given input, returning its raw JSON output.
    ///
    /// Implementations should not swallow errors into the fallback shape —
    /// that conversion is the quality-gated executor's responsibility so it
    /// can record the failure before substituting the fallback.
    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>>;

    /// The fixed, structurally-valid fallback output used when this tool
    /// exhausts its retries or throws.
    fn fallback(&self) -> serde_json::Value;
}

/// Registry of tools available to the graph engine.
///
/// Holds tools as `Arc<dyn ToolDyn>` keyed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolDyn>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. Overwrites any existing tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn ToolDyn>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolDyn>> {
        self.tools.get(name)
    }

    /// Iterate over all registered tools.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ToolDyn>> {
        self.tools.values()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn tool_dyn_is_object_safe() {
        _assert_send_sync::<Arc<dyn ToolDyn>>();
    }

    struct EchoTool;

    impl ToolDyn for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "Echoes input back"
        }
        fn input_schema(&self) -> serde_json::Value {
            json!({"type": "object"})
        }
        fn output_schema(&self) -> serde_json::Value {
            json!({"type": "object"})
        }
        fn call(
            &self,
            input: serde_json::Value,
        ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>>
        {
            Box::pin(async move { Ok(ToolCallResult::new(json!({"echoed": input}))) })
        }
        fn fallback(&self) -> serde_json::Value {
            json!({"echoed": "ERROR: echo fallback"})
        }
    }

    #[test]
    fn registry_add_and_get() {
        let mut reg = ToolRegistry::new();
        assert!(reg.is_empty());

        reg.register(Arc::new(EchoTool));
        assert_eq!(reg.len(), 1);
        assert!(reg.get("echo").is_some());
        assert!(reg.get("nonexistent").is_none());
    }

    #[tokio::test]
    async fn registry_call_tool() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(EchoTool));

        let tool = reg.get("echo").unwrap();
        let result = tool.call(json!({"msg": "hello"})).await.unwrap();
        assert_eq!(result.value, json!({"echoed": {"msg": "hello"}}));
    }

    #[test]
    fn registry_overwrite() {
        let mut reg = ToolRegistry::new();
        reg.register(Arc::new(EchoTool));
        assert_eq!(reg.len(), 1);
        reg.register(Arc::new(EchoTool));
        assert_eq!(reg.len(), 1);
    }
}
