//! Handler for the `search_case_law` tool.
//!
//! Validates the query argument, runs the similarity search, and renders the
//! returned documents as numbered source blocks. Every failure on this path
//! is reported as an error-flagged result; nothing escapes to the dispatcher.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::json;
use tracing::error;

use crate::retrieval::{Document, Retriever};
use crate::tools::ToolHandler;

pub const SEARCH_TOOL_NAME: &str = "search_case_law";

const NO_RESULTS_TEXT: &str = "No relevant case law found.";

/// Handler for the `search_case_law` tool.
pub struct SearchCaseLawHandler {
    retriever: Arc<Retriever>,
}

impl SearchCaseLawHandler {
    pub fn new(retriever: Arc<Retriever>) -> Self {
        Self { retriever }
    }
}

/// Render retrieved documents as numbered source blocks.
pub fn format_documents(docs: &[Document]) -> String {
    if docs.is_empty() {
        return NO_RESULTS_TEXT.to_string();
    }

    docs.iter()
        .enumerate()
        .map(|(i, doc)| {
            let metadata = serde_json::to_string(&doc.metadata)
                .unwrap_or_else(|_| "{}".to_string());
            format!(
                "--- Source {} ---\n{}\nMetadata: {}",
                i + 1,
                doc.page_content,
                metadata
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn error_result(message: &str) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(format!(
            "Error searching case law: {}",
            message
        ))],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}

impl ToolHandler for SearchCaseLawHandler {
    fn name(&self) -> &str {
        SEARCH_TOOL_NAME
    }

    fn description(&self) -> &str {
        "Search for Kenyan case law and rulings. Use this to find relevant \
         legal precedents and statutes."
    }

    fn input_schema(&self) -> JsonObject {
        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));

        let mut properties = serde_json::Map::new();
        properties.insert(
            "query".to_string(),
            json!({
                "type": "string",
                "description": "The legal query or topic to search for.",
            }),
        );

        schema.insert("properties".to_string(), json!(properties));
        schema.insert("required".to_string(), json!(["query"]));
        schema
    }

    fn execute(
        &self,
        args: JsonObject,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<CallToolResult>> + Send + '_>> {
        let retriever = self.retriever.clone();

        Box::pin(async move {
            let query = match args.get("query").and_then(|v| v.as_str()) {
                Some(q) if !q.is_empty() => q.to_string(),
                _ => return Ok(error_result("Invalid query argument")),
            };

            match retriever.retrieve(&query).await {
                Ok(docs) => Ok(CallToolResult {
                    content: vec![Content::text(format_documents(&docs))],
                    structured_content: None,
                    is_error: None,
                    meta: None,
                }),
                Err(e) => {
                    error!("Error executing {}: {}", SEARCH_TOOL_NAME, e);
                    Ok(error_result(&e.to_string()))
                }
            }
        })
    }
}
