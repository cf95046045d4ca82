//! Unit tests for the synthetic series generator

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tickerscope::models::series::TimeRange;
use tickerscope::services::market_data::MarketDataProvider;
use tickerscope::services::synthetic::{base_price, generate_series, SyntheticProvider, SYNTHETIC_SOURCE};
use tokio_test::{assert_ok, block_on};

fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

#[test]
fn test_one_month_has_thirty_one_bars() {
    let series = generate_series("AAPL", TimeRange::OneMonth, end_date(), &mut StdRng::seed_from_u64(1));
    assert_eq!(series.len(), 31);
    assert_eq!(series.source, SYNTHETIC_SOURCE);
    assert_eq!(series.symbol, "AAPL");
}

#[test]
fn test_bars_are_consecutive_days_ending_today() {
    let series = generate_series("MSFT", TimeRange::OneWeek, end_date(), &mut StdRng::seed_from_u64(2));
    let dates = series.dates();
    assert_eq!(dates.len(), 8);
    assert_eq!(*dates.last().unwrap(), end_date());
    for pair in dates.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::days(1));
    }
}

#[test]
fn test_walk_shape() {
    let series = generate_series("NVDA", TimeRange::OneYear, end_date(), &mut StdRng::seed_from_u64(3));
    let bars = series.bars();
    assert_eq!(bars[0].open, base_price("NVDA"));

    for (i, bar) in bars.iter().enumerate() {
        assert!(bar.is_finite());
        assert!(bar.high >= bar.open.max(bar.close));
        assert!(bar.low <= bar.open.min(bar.close));
        assert!(bar.low > 0.0);
        assert!((1_000_000..=10_000_000).contains(&bar.volume));
        let step = (bar.close - bar.open) / bar.open;
        assert!(step.abs() <= 0.02 + 1e-12);
        if i > 0 {
            assert_eq!(bar.open, bars[i - 1].close);
        }
    }
}

#[test]
fn test_different_seeds_diverge() {
    let a = generate_series("IBM", TimeRange::OneMonth, end_date(), &mut StdRng::seed_from_u64(10));
    let b = generate_series("IBM", TimeRange::OneMonth, end_date(), &mut StdRng::seed_from_u64(11));
    assert_ne!(a.closes(), b.closes());
}

#[test]
fn test_provider_never_fails() {
    let provider = SyntheticProvider::with_seed(42);
    assert!(provider.is_synthetic());
    assert_eq!(provider.name(), "synthetic");

    let series = assert_ok!(block_on(provider.try_fetch("TSLA", TimeRange::FiveDays)));
    assert_eq!(series.len(), 6);
    assert!(series.latest_price().is_some());
}
