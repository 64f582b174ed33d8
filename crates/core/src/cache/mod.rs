//! SQLite-backed store for act listings and act details.
//!
//! Data lives in two tables managed by versioned migrations:
//!
//! - `acts`: per-year listings, replaced wholesale inside a transaction
//! - `act_details`: full records, upserted by identifier, with the nested
//!   fields kept as JSON text
//!
//! Both tables carry an `updated_at` column maintained by column defaults and
//! triggers; it drives the per-year cache age.

pub mod connection;
pub mod migrations;

mod acts;
mod details;
mod fields;

use std::time::Duration;

use async_trait::async_trait;

pub use connection::CacheDb;

use crate::Error;
use crate::models::{Act, ActDetails, ActId};
use crate::service::ActsStore;

#[async_trait]
impl ActsStore for CacheDb {
    async fn get_acts(&self, year: i32) -> Result<Vec<Act>, Error> {
        CacheDb::get_acts(self, year).await
    }

    async fn replace_acts(&self, year: i32, acts: &[Act]) -> Result<(), Error> {
        CacheDb::replace_acts(self, year, acts).await
    }

    async fn get_act_details(&self, id: &ActId) -> Result<Option<ActDetails>, Error> {
        CacheDb::get_act_details(self, id).await
    }

    async fn upsert_act_details(&self, details: &ActDetails) -> Result<(), Error> {
        CacheDb::upsert_act_details(self, details).await
    }

    async fn cache_age(&self, year: i32) -> Result<Option<Duration>, Error> {
        CacheDb::cache_age(self, year).await
    }
}
