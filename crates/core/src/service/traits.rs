use std::time::Duration;

use async_trait::async_trait;

use crate::Error;
use crate::models::{Act, ActDetails, ActId};

/// Origin of act data, normally the Sejm ELI registry.
#[async_trait]
pub trait ActsSource: Send + Sync {
    /// Fetches the full listing for a year, in registry order.
    async fn fetch_acts(&self, year: i32) -> Result<Vec<Act>, Error>;

    /// Fetches one act record.
    async fn fetch_act_details(&self, id: &ActId) -> Result<ActDetails, Error>;
}

/// Local copy of act data.
#[async_trait]
pub trait ActsStore: Send + Sync {
    /// Gets the cached listing for a year, ordered by position.
    async fn get_acts(&self, year: i32) -> Result<Vec<Act>, Error>;

    /// Replaces the cached listing for a year atomically.
    async fn replace_acts(&self, year: i32, acts: &[Act]) -> Result<(), Error>;

    /// Gets cached details, `None` if never stored.
    async fn get_act_details(&self, id: &ActId) -> Result<Option<ActDetails>, Error>;

    /// Inserts or overwrites the details record.
    async fn upsert_act_details(&self, details: &ActDetails) -> Result<(), Error>;

    /// Age of the freshest cached row for a year, `None` when unknown.
    async fn cache_age(&self, year: i32) -> Result<Option<Duration>, Error>;
}
