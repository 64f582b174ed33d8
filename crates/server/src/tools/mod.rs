//! MCP tool implementations.
//!
//! This module contains all tools exposed by the ustawka server.

pub mod board;
pub mod details;
pub mod metrics;
pub mod years;

#[cfg(test)]
pub(crate) mod testing;

pub use board::BoardParams;
pub use details::DetailsParams;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use ustawka_core::Error;

/// Render a tool result as pretty JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| Error::Serialization { field: "response", reason: e.to_string() })?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
