//! Cache-coordinating service.
//!
//! Every read goes to the local store first and falls back to the registry
//! when the cached copy is missing, stale or unreadable. Fresh registry data
//! is written back on a best-effort basis: a failed write is logged and the
//! data is still returned.

mod board;
mod traits;

pub use board::{Board, IN_PREPARATION, organize_by_status};
pub use traits::{ActsSource, ActsStore};

use std::future::Future;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};

use crate::Error;
use crate::config::{AppConfig, DEFAULT_API_TIMEOUT, DEFAULT_CACHE_TTL};
use crate::metrics::Metrics;
use crate::models::{Act, ActDetails, ActId};

/// First year probed when listing available years.
pub const FIRST_YEAR: i32 = 2021;

/// Timing knobs for [`ActService`], fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Deadline for each registry call.
    pub api_timeout: Duration,
    /// A cached year younger than this is served without asking the registry.
    pub cache_ttl: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { api_timeout: DEFAULT_API_TIMEOUT, cache_ttl: DEFAULT_CACHE_TTL }
    }
}

impl From<&AppConfig> for ServiceSettings {
    fn from(config: &AppConfig) -> Self {
        Self { api_timeout: config.api_timeout(), cache_ttl: config.cache_ttl() }
    }
}

/// Serves act listings and details from the cache or the registry.
///
/// Holds no per-request state; share it behind an `Arc` or clone it.
#[derive(Clone)]
pub struct ActService {
    source: Arc<dyn ActsSource>,
    store: Arc<dyn ActsStore>,
    metrics: Arc<Metrics>,
    settings: ServiceSettings,
}

impl std::fmt::Debug for ActService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActService").field("settings", &self.settings).finish_non_exhaustive()
    }
}

impl ActService {
    /// Build a service with durations taken from `config`.
    ///
    /// Malformed durations fall back to their defaults with a warning.
    pub fn new(
        source: Arc<dyn ActsSource>, store: Arc<dyn ActsStore>, metrics: Arc<Metrics>, config: &AppConfig,
    ) -> Self {
        Self::with_settings(source, store, metrics, ServiceSettings::from(config))
    }

    pub fn with_settings(
        source: Arc<dyn ActsSource>, store: Arc<dyn ActsStore>, metrics: Arc<Metrics>, settings: ServiceSettings,
    ) -> Self {
        Self { source, store, metrics, settings }
    }

    pub fn settings(&self) -> ServiceSettings {
        self.settings
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Acts for `year`, from the cache when it is fresh, otherwise from the registry.
    ///
    /// Cache failures never fail the call; registry failures always do.
    pub async fn acts_for_year(&self, year: i32) -> Result<Vec<Act>, Error> {
        let age = match self.store.cache_age(year).await {
            Ok(age) => age,
            Err(e) => {
                tracing::error!(year, path = "cache", error = %e, "failed to read cache age");
                None
            }
        };

        if let Some(age) = age.filter(|age| *age < self.settings.cache_ttl) {
            match self.store.get_acts(year).await {
                Ok(acts) if !acts.is_empty() => {
                    self.metrics.record_cache_hit();
                    tracing::debug!(year, path = "cache", age = ?age, count = acts.len(), "resolved acts");
                    return Ok(acts);
                }
                Ok(_) => tracing::debug!(year, path = "cache", "fresh cache entry is empty"),
                Err(e) => tracing::error!(year, path = "cache", error = %e, "failed to read cached acts"),
            }
        }

        self.metrics.record_cache_miss();
        let acts = match self.bounded(self.source.fetch_acts(year)).await {
            Ok(acts) => acts,
            Err(e) => {
                if e.is_deadline() {
                    tracing::warn!(year, path = "origin", timeout = ?self.settings.api_timeout, "registry call timed out");
                } else {
                    tracing::error!(year, path = "origin", error = %e, "failed to fetch acts from registry");
                }
                return Err(e);
            }
        };
        self.metrics.record_sejm_call();

        if let Err(e) = self.store.replace_acts(year, &acts).await {
            tracing::error!(year, path = "origin", error = %e, "failed to cache acts");
        }

        tracing::debug!(year, path = "origin", count = acts.len(), "resolved acts");
        Ok(acts)
    }

    /// Years from 2021 through the current UTC year that have at least one act.
    pub async fn available_years(&self) -> Result<Vec<i32>, Error> {
        self.available_years_in(FIRST_YEAR..=Utc::now().year()).await
    }

    /// Years in `years` that have at least one act, scanned in ascending order.
    ///
    /// A failing year is skipped. If no year qualifies, the last failure is
    /// returned, or [`Error::NoData`] when nothing failed.
    pub async fn available_years_in(&self, years: RangeInclusive<i32>) -> Result<Vec<i32>, Error> {
        self.metrics.record_api_call();

        let mut found = Vec::new();
        let mut last_error = None;
        for year in years {
            match self.acts_for_year(year).await {
                Ok(acts) if !acts.is_empty() => found.push(year),
                Ok(_) => {}
                Err(e) => last_error = Some(e),
            }
        }

        if found.is_empty() {
            return Err(match last_error {
                Some(e) => e.context("failed to fetch any years"),
                None => Error::NoData("no data available for any year".into()),
            });
        }

        Ok(found)
    }

    /// Acts for `year` grouped by status.
    pub async fn board_for_year(&self, year: i32) -> Result<Board, Error> {
        self.metrics.record_api_call();

        let acts = self.acts_for_year(year).await.map_err(|e| e.context("failed to fetch acts"))?;
        if acts.is_empty() {
            return Err(Error::NoData(format!("no data available for year {year}")));
        }

        Ok(organize_by_status(acts))
    }

    /// Full record for one act, from the cache when present.
    pub async fn act_details(&self, id: &ActId) -> Result<ActDetails, Error> {
        self.metrics.record_api_call();

        match self.store.get_act_details(id).await {
            Ok(Some(details)) => {
                self.metrics.record_cache_hit();
                tracing::debug!(id = %id, path = "cache", "resolved act details");
                return Ok(details);
            }
            Ok(None) => {}
            Err(e) => tracing::error!(id = %id, path = "cache", error = %e, "failed to read cached act details"),
        }

        self.metrics.record_cache_miss();
        let details = self
            .bounded(self.source.fetch_act_details(id))
            .await
            .map_err(|e| e.context("failed to fetch act details"))?;
        self.metrics.record_sejm_call();

        if let Err(e) = self.store.upsert_act_details(&details).await {
            tracing::error!(id = %id, path = "origin", error = %e, "failed to cache act details");
        }

        tracing::debug!(id = %id, path = "origin", "resolved act details");
        Ok(details)
    }

    /// Run a registry call under the configured deadline.
    async fn bounded<T>(&self, call: impl Future<Output = Result<T, Error>>) -> Result<T, Error> {
        let limit = self.settings.api_timeout;
        tokio::time::timeout(limit, call)
            .await
            .unwrap_or_else(|_| Err(Error::DeadlineExceeded(format!("registry call exceeded {limit:?}"))))
    }
}
