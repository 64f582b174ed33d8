//! Registry response envelopes.

use serde::Deserialize;
use ustawka_core::Act;

/// Listing envelope returned by `GET /acts/DU/{year}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ActsPage {
    pub items: Vec<Act>,
    pub offset: u64,
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}
