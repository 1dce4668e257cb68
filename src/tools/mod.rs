//! Tool handler registry for managing MCP tool implementations.
//!
//! This module provides a simple way to register and invoke tool handlers,
//! making it easy to add new tools without modifying the core `ServerHandler`
//! implementation.

mod registry;

pub use registry::{DispatchError, ToolHandler, ToolRegistry};

// Tool handler implementations
mod search_case_law;

pub use search_case_law::{SEARCH_TOOL_NAME, SearchCaseLawHandler, format_documents};
