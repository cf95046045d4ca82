//! Unit tests for the Stochastic oscillator

use chrono::{Duration, NaiveDate};
use tickerscope::indicators::momentum::{calculate_stochastic_default, stochastic_values, FLAT_RANGE_K};
use tickerscope::models::series::{Bar, Series, TimeRange};

fn create_test_series(count: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = (0..count)
        .map(|i| {
            let close = 50.0 + (i as f64 * 0.4).cos() * 4.0;
            Bar::new(start + Duration::days(i as i64), close, close + 1.5, close - 2.0, close, 500)
        })
        .collect();
    Series::new("TEST", TimeRange::OneMonth, "test", bars)
}

#[test]
fn test_stochastic_known_values() {
    let closes = [10.0, 11.0, 12.0, 13.0];
    let highs: Vec<f64> = closes.iter().map(|c| c + 1.0).collect();
    let lows: Vec<f64> = closes.iter().map(|c| c - 1.0).collect();
    let (k, d) = stochastic_values(&highs, &lows, &closes, 3, 2);
    assert_eq!(k, vec![None, None, Some(75.0), Some(75.0)]);
    assert_eq!(d, vec![None, None, None, Some(75.0)]);
}

#[test]
fn test_stochastic_warm_up() {
    let points = calculate_stochastic_default(&create_test_series(30)).unwrap();
    assert!(points[..13].iter().all(|p| p.k.is_none()));
    assert!(points[13].k.is_some());
    assert!(points[..15].iter().all(|p| p.d.is_none()));
    assert!(points[15].d.is_some());
}

#[test]
fn test_stochastic_bounds() {
    let points = calculate_stochastic_default(&create_test_series(60)).unwrap();
    for k in points.iter().filter_map(|p| p.k) {
        assert!((0.0..=100.0).contains(&k));
    }
}

#[test]
fn test_stochastic_flat_range() {
    let flat = [7.0; 5];
    let (k, _) = stochastic_values(&flat, &flat, &flat, 3, 3);
    assert_eq!(k[4], Some(FLAT_RANGE_K));
}
