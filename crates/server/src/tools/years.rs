//! acts_years tool implementation.
//!
//! Lists the years, from 2021 on, that have published acts.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use ustawka_core::ActService;

use super::json_result;

/// Implementation of the acts_years tool.
pub async fn years_impl(service: &ActService) -> Result<CallToolResult, McpError> {
    let years = service.available_years().await?;
    json_result(&years)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{StubRegistry, act, result_json, service};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_years_lists_non_empty_years() {
        let mut registry = StubRegistry::default();
        registry.years.insert(2021, vec![act(2021, 1, "obowiązujący")]);
        registry.years.insert(2022, Vec::new());
        let service = service(Arc::new(registry)).await;

        let result = years_impl(&service).await.unwrap();
        assert_eq!(result_json(&result), serde_json::json!([2021]));
    }

    #[tokio::test]
    async fn test_years_all_failing() {
        let service = service(Arc::new(StubRegistry::default())).await;

        let err = years_impl(&service).await.unwrap_err();
        assert_eq!(err.code.0, -32008);
        assert!(err.message.starts_with("failed to fetch any years"));
    }
}
