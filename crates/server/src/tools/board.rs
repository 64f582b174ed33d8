//! acts_board tool implementation.
//!
//! Returns one year's acts grouped into status columns.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use ustawka_core::{ActService, Error};

use super::json_result;

/// Parameters for the acts_board tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BoardParams {
    /// Publication year, e.g. 2024.
    pub year: i32,
}

/// Implementation of the acts_board tool.
pub async fn board_impl(service: &ActService, params: BoardParams) -> Result<CallToolResult, McpError> {
    if !(1000..=9999).contains(&params.year) {
        return Err(Error::InvalidInput(format!("year must have four digits, got {}", params.year)).into());
    }

    let board = service.board_for_year(params.year).await?;
    json_result(&board)
}
