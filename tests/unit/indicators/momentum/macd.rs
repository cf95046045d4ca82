//! Unit tests for MACD indicator

use chrono::{Duration, NaiveDate};
use tickerscope::indicators::momentum::{calculate_macd, calculate_macd_default, macd_values};
use tickerscope::indicators::trend::ema_values;
use tickerscope::models::series::{Bar, Series, TimeRange};

fn create_test_series(count: usize) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = (0..count)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.25).sin() * 3.0 + i as f64 * 0.1;
            Bar::new(start + Duration::days(i as i64), price, price + 0.5, price - 0.5, price, 1000)
        })
        .collect();
    Series::new("TEST", TimeRange::ThreeMonths, "test", bars)
}

#[test]
fn test_macd_warm_up() {
    let points = calculate_macd_default(&create_test_series(60)).unwrap();
    assert!(points[..25].iter().all(|p| p.macd.is_none()));
    assert!(points[25].macd.is_some());
    assert!(points[..33].iter().all(|p| p.signal.is_none() && p.histogram.is_none()));
    assert!(points[33].signal.is_some());
    assert!(points[33].histogram.is_some());
}

#[test]
fn test_macd_line_is_fast_minus_slow() {
    let series = create_test_series(60);
    let closes = series.closes();
    let fast = ema_values(&closes, 12);
    let slow = ema_values(&closes, 26);
    let values = macd_values(&closes, 12, 26, 9);
    for i in 25..60 {
        let expected = fast[i].unwrap() - slow[i].unwrap();
        assert!((values.macd[i].unwrap() - expected).abs() < 1e-9);
    }
}

#[test]
fn test_macd_histogram_is_macd_minus_signal() {
    let points = calculate_macd_default(&create_test_series(80)).unwrap();
    for point in points.iter().skip(33) {
        let (m, s, h) = (point.macd.unwrap(), point.signal.unwrap(), point.histogram.unwrap());
        assert!((h - (m - s)).abs() < 1e-9);
    }
}

#[test]
fn test_macd_short_series_is_all_null() {
    let points = calculate_macd_default(&create_test_series(20)).unwrap();
    assert_eq!(points.len(), 20);
    assert!(points.iter().all(|p| p.macd.is_none() && p.signal.is_none()));
}

#[test]
fn test_macd_custom_periods() {
    let points = calculate_macd(&create_test_series(30), 3, 6, 4).unwrap();
    assert!(points[4].macd.is_none());
    assert!(points[5].macd.is_some());
    assert!(points[7].signal.is_none());
    assert!(points[8].signal.is_some());
}
