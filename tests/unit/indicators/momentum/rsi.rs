//! Unit tests for RSI indicator

use chrono::{Duration, NaiveDate};
use tickerscope::indicators::momentum::{calculate_rsi_default, rsi_from_averages, rsi_values};
use tickerscope::models::series::{Bar, Series, TimeRange};

fn create_test_series(closes: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 1000))
        .collect();
    Series::new("TEST", TimeRange::ThreeMonths, "test", bars)
}

#[test]
fn test_rsi_warm_up_is_period() {
    let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0).collect();
    let points = calculate_rsi_default(&create_test_series(&closes)).unwrap();
    assert_eq!(points.len(), 40);
    assert!(points[..14].iter().all(|p| p.value.is_none()));
    assert!(points[14..].iter().all(|p| p.value.is_some()));
}

#[test]
fn test_rsi_stays_in_bounds() {
    let closes: Vec<f64> = (0..120)
        .map(|i| 50.0 + (i as f64 * 0.3).sin() * 10.0 + (i % 7) as f64)
        .collect();
    for value in rsi_values(&closes, 14).into_iter().flatten() {
        assert!((0.0..=100.0).contains(&value), "RSI out of range: {}", value);
    }
}

#[test]
fn test_rsi_wilder_smoothing() {
    let values = rsi_values(&[1.0, 2.0, 1.0, 2.0, 1.0], 2);
    assert!(values[..2].iter().all(Option::is_none));
    assert_eq!(values[2], Some(50.0));
    assert!((values[3].unwrap() - 75.0).abs() < 1e-9);
    assert!((values[4].unwrap() - 37.5).abs() < 1e-9);
}

#[test]
fn test_rsi_only_gains_saturates_at_100() {
    let closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
    let values = rsi_values(&closes, 14);
    assert_eq!(values[19], Some(100.0));
}

#[test]
fn test_rsi_only_losses_is_zero() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    let values = rsi_values(&closes, 14);
    assert_eq!(values[19], Some(0.0));
}

#[test]
fn test_rsi_flat_window_is_neutral() {
    let values = rsi_values(&[5.0; 20], 14);
    assert_eq!(values[14], Some(50.0));
    assert_eq!(rsi_from_averages(0.0, 0.0), 50.0);
}

#[test]
fn test_rsi_insufficient_data() {
    assert!(rsi_values(&[1.0; 14], 14).iter().all(Option::is_none));
}

#[test]
fn test_rsi_malformed_point_is_null_and_state_held() {
    let mut closes: Vec<f64> = (0..20).map(|i| 10.0 + i as f64).collect();
    closes[17] = f64::NAN;
    let values = rsi_values(&closes, 14);
    assert_eq!(values[16], Some(100.0));
    assert_eq!(values[17], None);
    assert_eq!(values[18], None);
    assert_eq!(values[19], Some(100.0));
}
