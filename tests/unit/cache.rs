//! Unit tests for the TTL cache

use std::sync::Arc;
use std::time::Duration;

use tickerscope::cache::{keys, TtlCache};
use tickerscope::metrics::Metrics;
use tickerscope::models::series::TimeRange;

#[tokio::test]
async fn test_set_then_get() {
    let cache: TtlCache<String> = TtlCache::new();
    cache.set("quote:AAPL", "190.1".to_string(), Duration::from_secs(30)).await;
    assert_eq!(cache.get("quote:AAPL").await, Some("190.1".to_string()));
    assert_eq!(cache.get("quote:MSFT").await, None);
}

#[tokio::test]
async fn test_entry_expires_after_ttl() {
    let cache: TtlCache<u32> = TtlCache::new();
    cache.set("k", 7, Duration::from_secs(1)).await;
    assert_eq!(cache.get("k").await, Some(7));

    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(cache.get("k").await, None);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_last_writer_wins() {
    let cache: TtlCache<u32> = TtlCache::new();
    cache.set("k", 1, Duration::from_secs(60)).await;
    cache.set("k", 2, Duration::from_secs(60)).await;
    assert_eq!(cache.get("k").await, Some(2));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_delete_and_clear() {
    let cache: TtlCache<u32> = TtlCache::new();
    cache.set("a", 1, Duration::from_secs(60)).await;
    cache.set("b", 2, Duration::from_secs(60)).await;

    assert!(cache.delete("a").await);
    assert!(!cache.delete("a").await);
    assert_eq!(cache.len().await, 1);

    cache.clear().await;
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_purge_expired_only_drops_dead_entries() {
    let cache: TtlCache<u32> = TtlCache::new();
    cache.set("dead", 1, Duration::ZERO).await;
    cache.set("live", 2, Duration::from_secs(60)).await;

    assert_eq!(cache.purge_expired().await, 1);
    assert_eq!(cache.get("live").await, Some(2));
}

#[tokio::test]
async fn test_sweeper_removes_expired_entries() {
    let cache: Arc<TtlCache<u32>> = Arc::new(TtlCache::new());
    cache.set("short", 1, Duration::from_millis(50)).await;
    let handle = cache.spawn_sweeper(Duration::from_millis(100));

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert_eq!(cache.purge_expired().await, 0);

    handle.abort();
}

#[tokio::test]
async fn test_sweeper_stops_when_cache_dropped() {
    let cache: Arc<TtlCache<u32>> = Arc::new(TtlCache::new());
    let handle = cache.spawn_sweeper(Duration::from_millis(20));
    drop(cache);

    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("sweeper exits")
        .expect("sweeper did not panic");
}

#[tokio::test]
async fn test_hits_and_misses_are_counted() {
    let metrics = Arc::new(Metrics::new().unwrap());
    let cache: TtlCache<u32> = TtlCache::with_metrics(Arc::clone(&metrics));
    cache.set(keys::series("AAPL", TimeRange::OneMonth), 1, Duration::from_secs(60)).await;

    cache.get("series:AAPL:1m").await;
    cache.get("series:AAPL:1y").await;
    cache.get("series:AAPL:1y").await;

    assert_eq!(metrics.cache_hits_total.get(), 1);
    assert_eq!(metrics.cache_misses_total.get(), 2);
}
