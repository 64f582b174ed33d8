//! Shared fixtures for tool tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rmcp::model::CallToolResult;
use ustawka_core::service::ServiceSettings;
use ustawka_core::{Act, ActDetails, ActId, ActService, ActsSource, CacheDb, Error, Metrics};

/// In-process registry with fixed answers. Unknown years fail.
#[derive(Default)]
pub struct StubRegistry {
    pub years: HashMap<i32, Vec<Act>>,
    pub details: HashMap<String, ActDetails>,
    pub calls: AtomicUsize,
}

impl StubRegistry {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ActsSource for StubRegistry {
    async fn fetch_acts(&self, year: i32) -> Result<Vec<Act>, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.years.get(&year).cloned().ok_or_else(|| Error::Upstream(format!("HTTP error: 404 for {year}")))
    }

    async fn fetch_act_details(&self, id: &ActId) -> Result<ActDetails, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.details.get(&id.to_string()).cloned().ok_or_else(|| Error::Upstream("HTTP error: 404".into()))
    }
}

pub fn act(year: i32, position: u32, status: &str) -> Act {
    Act {
        id: format!("DU/{year}/{position}"),
        title: format!("Ustawa z dnia {position} stycznia {year}"),
        status: status.into(),
        published: format!("{year}-01-{position:02}"),
        position,
        year,
        kind: "Ustawa".into(),
        address: format!("WDU{year}{position:07}"),
    }
}

/// Service over `registry` and a fresh in-memory cache.
pub async fn service(registry: Arc<StubRegistry>) -> ActService {
    let store = Arc::new(CacheDb::open_in_memory().await.unwrap());
    ActService::with_settings(registry, store, Arc::new(Metrics::new()), ServiceSettings::default())
}

/// Parse the JSON text of a successful tool result.
pub fn result_json(result: &CallToolResult) -> serde_json::Value {
    let text = result.content.first().and_then(|c| c.as_text()).expect("Expected text content in result");
    serde_json::from_str(&text.text).unwrap()
}
