//! metrics tool implementation.
//!
//! Reports request and cache counters since startup.

use rmcp::{ErrorData as McpError, model::CallToolResult};
use ustawka_core::ActService;

use super::json_result;

/// Implementation of the metrics tool.
pub fn metrics_impl(service: &ActService) -> Result<CallToolResult, McpError> {
    json_result(&service.metrics().snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::testing::{StubRegistry, act, result_json, service};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_metrics_track_cache_use() {
        let mut registry = StubRegistry::default();
        registry.years.insert(2024, vec![act(2024, 1, "")]);
        let service = service(Arc::new(registry)).await;

        service.board_for_year(2024).await.unwrap();
        service.board_for_year(2024).await.unwrap();

        let snapshot = result_json(&metrics_impl(&service).unwrap());
        assert_eq!(snapshot["api_calls"], 2);
        assert_eq!(snapshot["sejm_api_calls"], 1);
        assert_eq!(snapshot["cache_misses"], 1);
        assert_eq!(snapshot["cache_hits"], 1);
    }
}
