//! In-memory key/value cache with per-entry TTL.
//!
//! Expired entries read as absent and are dropped on access; a background
//! sweeper clears the rest periodically. Last writer wins on a shared key.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::metrics::Metrics;
use crate::models::analysis::{Analysis, Quote};
use crate::models::indicators::IndicatorOutput;
use crate::models::series::{Series, TimeRange};

/// Values stored by the engine. Each is an immutable shared snapshot.
#[derive(Debug, Clone)]
pub enum CachedValue {
    Series(Arc<Series>),
    Quote(Arc<Quote>),
    Indicator(Arc<IndicatorOutput>),
    Analysis(Arc<Analysis>),
}

pub type MarketCache = TtlCache<CachedValue>;

/// Cache keys, deterministic in (operation, symbol, range, indicator).
pub mod keys {
    use crate::models::series::TimeRange;

    pub fn series(symbol: &str, range: TimeRange) -> String {
        format!("series:{}:{}", symbol, range)
    }

    pub fn quote(symbol: &str) -> String {
        format!("quote:{}", symbol)
    }

    pub fn indicator(symbol: &str, range: TimeRange, indicator: &str) -> String {
        format!("indicator:{}:{}:{}", symbol, range, indicator)
    }

    pub fn analysis(symbol: &str, range: TimeRange) -> String {
        format!("analysis:{}:{}", symbol, range)
    }
}

/// Time-to-live per kind of data, chosen by volatility.
pub mod ttl {
    use std::time::Duration;

    pub const QUOTE: Duration = Duration::from_secs(30);
    pub const SHORT_RANGE_SERIES: Duration = Duration::from_secs(60);
    pub const LONG_RANGE_SERIES: Duration = Duration::from_secs(300);
    pub const SYNTHETIC_SERIES: Duration = Duration::from_secs(300);
    pub const INDICATOR: Duration = Duration::from_secs(300);
    pub const ANALYSIS: Duration = Duration::from_secs(600);
}

pub fn series_ttl(range: TimeRange, synthetic: bool) -> Duration {
    if synthetic {
        ttl::SYNTHETIC_SERIES
    } else if range.is_short() {
        ttl::SHORT_RANGE_SERIES
    } else {
        ttl::LONG_RANGE_SERIES
    }
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    metrics: Option<Arc<Metrics>>,
}

impl<V: Clone + Send + Sync + 'static> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            metrics: None,
        }
    }

    pub fn with_metrics(metrics: Arc<Metrics>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            metrics: Some(metrics),
        }
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        let expired = {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_live(Instant::now()) => {
                    self.record(true);
                    return Some(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            let mut entries = self.entries.write().await;
            // Re-check: a writer may have refreshed the key in between.
            if entries
                .get(key)
                .is_some_and(|entry| !entry.is_live(Instant::now()))
            {
                entries.remove(key);
            }
        }

        self.record(false);
        None
    }

    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Returns whether a live entry was removed.
    pub async fn delete(&self, key: &str) -> bool {
        self.entries
            .write()
            .await
            .remove(key)
            .is_some_and(|entry| entry.is_live(Instant::now()))
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.is_live(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }

    /// Periodic purge. The task only holds a weak reference and exits once
    /// the cache is dropped; abort the handle for an earlier stop.
    pub fn spawn_sweeper(self: &Arc<Self>, interval: Duration) -> JoinHandle<()> {
        let cache = Arc::downgrade(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(cache) = cache.upgrade() else {
                    break;
                };
                let removed = cache.purge_expired().await;
                if removed > 0 {
                    debug!(removed = removed, "cache sweep removed expired entries");
                }
            }
        })
    }

    fn record(&self, hit: bool) {
        if let Some(ref metrics) = self.metrics {
            if hit {
                metrics.cache_hits_total.inc();
            } else {
                metrics.cache_misses_total.inc();
            }
        }
    }
}

impl<V: Clone + Send + Sync + 'static> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
