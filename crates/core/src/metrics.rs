//! Request and cache counters.
//!
//! A single `Metrics` value is shared (behind an `Arc`) by the service and the
//! server so tests can inject a fresh one instead of relying on process state.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for service activity since startup.
#[derive(Debug, Default)]
pub struct Metrics {
    api_calls: AtomicU64,
    sejm_api_calls: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, schemars::JsonSchema)]
pub struct MetricsSnapshot {
    pub api_calls: u64,
    pub sejm_api_calls: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service-level operation was requested.
    pub fn record_api_call(&self) {
        self.api_calls.fetch_add(1, Ordering::Relaxed);
    }

    /// The registry answered successfully.
    pub fn record_sejm_call(&self) {
        self.sejm_api_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            api_calls: self.api_calls.load(Ordering::Relaxed),
            sejm_api_calls: self.sejm_api_calls.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counters_start_at_zero() {
        assert_eq!(Metrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_snapshot_serializes_counter_names() {
        let metrics = Metrics::new();
        metrics.record_api_call();
        metrics.record_cache_miss();
        metrics.record_sejm_call();

        let value = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(value["api_calls"], 1);
        assert_eq!(value["sejm_api_calls"], 1);
        assert_eq!(value["cache_hits"], 0);
        assert_eq!(value["cache_misses"], 1);
    }

    #[test]
    fn test_concurrent_increments() {
        let metrics = Arc::new(Metrics::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        metrics.record_cache_hit();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.snapshot().cache_hits, 1000);
    }
}
