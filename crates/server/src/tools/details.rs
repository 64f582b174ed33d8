//! act_details tool implementation.
//!
//! Returns the full record of one act, addressed by year and position.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use ustawka_core::{ActId, ActService};

use super::json_result;

/// Parameters for the act_details tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DetailsParams {
    /// Publication year, e.g. "2024".
    #[serde(deserialize_with = "id_part")]
    pub year: String,
    /// Position within the year, e.g. "17".
    #[serde(deserialize_with = "id_part")]
    pub position: String,
}

/// Accept either a JSON string or a number for an identifier part.
fn id_part<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Part {
        Text(String),
        Number(i64),
    }

    Ok(match Part::deserialize(deserializer)? {
        Part::Text(s) => s,
        Part::Number(n) => n.to_string(),
    })
}

/// Implementation of the act_details tool.
pub async fn details_impl(service: &ActService, params: DetailsParams) -> Result<CallToolResult, McpError> {
    let id = ActId::from_parts(&params.year, &params.position)?;
    let details = service.act_details(&id).await?;
    json_result(&details)
}
