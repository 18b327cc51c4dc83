//! MCP tool implementations
//!
//! This module contains tool handlers organized by concern, plus the
//! helpers they share for turning results into MCP content.

pub mod categories;
pub mod expenses;

#[cfg(test)]
mod categories_test;

pub use categories::CategoryTools;
pub use expenses::ExpenseTools;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use tracing::warn;

use crate::db::DbError;
use crate::expenses::ToolResponse;

/// Map a storage failure to an MCP error for this one request.
pub(crate) fn map_db_error(e: DbError) -> McpError {
    warn!(error = %e, "Database error during tool call");
    match e {
        DbError::Validation { .. } => McpError::invalid_params(
            "validation_error",
            Some(serde_json::json!({"error": e.to_string()})),
        ),
        _ => McpError::internal_error(
            "database_error",
            Some(serde_json::json!({"error": e.to_string()})),
        ),
    }
}

/// Serialize a value as the single text content of a successful result.
pub(crate) fn json_content<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(serde_json::json!({"error": e.to_string()})),
        )
    })?;

    Ok(CallToolResult::success(vec![Content::text(content)]))
}

/// Wrap a shaped response as a tool result.
pub(crate) fn respond(response: ToolResponse) -> Result<CallToolResult, McpError> {
    json_content(&response)
}
