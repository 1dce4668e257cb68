//! Tool registry for managing MCP tool handlers.
//!
//! Provides a `ToolHandler` trait for implementing tools and a `ToolRegistry`
//! that resolves invocations by exact name match.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;
use rmcp::model::{CallToolResult, JsonObject, Tool as McpTool};

/// Trait for handling MCP tool invocations.
///
/// Each tool implements this trait to define its schema and execution logic.
/// Handlers are expected to report their own failures inside the
/// `CallToolResult` (with the error flag set); an `Err` from `execute` is a
/// handler bug and is surfaced as a protocol-level error by the server.
pub trait ToolHandler: Send + Sync {
    /// Returns the tool's name (e.g., "search_case_law").
    fn name(&self) -> &str;

    /// Returns the tool's description.
    fn description(&self) -> &str;

    /// Returns the input schema for this tool.
    fn input_schema(&self) -> JsonObject;

    /// Executes the tool with the given arguments.
    fn execute(
        &self,
        args: JsonObject,
    ) -> Pin<Box<dyn Future<Output = Result<CallToolResult>> + Send + '_>>;

    /// Converts this handler to an `McpTool` for use in `list_tools`.
    fn to_mcp_tool(&self) -> McpTool {
        use std::borrow::Cow;

        McpTool {
            name: Cow::Owned(self.name().to_string()),
            title: None,
            description: Some(Cow::Owned(self.description().to_string())),
            input_schema: Arc::new(self.input_schema()),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }
    }
}

/// Dispatch-level failures, distinct from tool-execution failures.
#[derive(Debug, Clone)]
pub enum DispatchError {
    /// The invocation named a tool that is not registered.
    ToolNotFound(String),
    /// A handler returned an error instead of reporting it as a result.
    Handler { tool: String, message: String },
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::ToolNotFound(name) => write!(f, "Tool not found: {}", name),
            DispatchError::Handler { tool, message } => {
                write!(f, "Tool {} failed: {}", tool, message)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Registry for managing tool handlers.
///
/// Populated once at startup and read-only afterwards. Names are unique;
/// `list_tools` reports definitions in registration order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: Vec<Arc<dyn ToolHandler>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool handler. A handler re-using an existing name replaces it.
    pub fn register(mut self, handler: Arc<dyn ToolHandler>) -> Self {
        let name = handler.name().to_string();
        match self.by_name.get(&name) {
            Some(&idx) => self.handlers[idx] = handler,
            None => {
                self.by_name.insert(name, self.handlers.len());
                self.handlers.push(handler);
            }
        }
        self
    }

    /// Register a tool handler from a type that implements `ToolHandler`.
    pub fn register_handler<T: ToolHandler + 'static>(self, handler: T) -> Self {
        self.register(Arc::new(handler))
    }

    /// Get a tool handler by exact name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.by_name
            .get(name)
            .map(|&idx| self.handlers[idx].clone())
    }

    /// Get all registered tools as `McpTool` instances for `list_tools`.
    pub fn list_tools(&self) -> Vec<McpTool> {
        self.handlers
            .iter()
            .map(|handler| handler.to_mcp_tool())
            .collect()
    }

    /// Execute a tool by name with the given arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        args: JsonObject,
    ) -> Result<CallToolResult, DispatchError> {
        let handler = self
            .get(name)
            .ok_or_else(|| DispatchError::ToolNotFound(name.to_string()))?;
        handler
            .execute(args)
            .await
            .map_err(|e| DispatchError::Handler {
                tool: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Check if a tool with the given name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Return the number of registered tools.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Return `true` if no tools are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
