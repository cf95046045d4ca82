//! Unit tests for EMA indicator

use chrono::{Duration, NaiveDate};
use tickerscope::indicators::trend::{calculate_ema, ema_values};
use tickerscope::models::series::{Bar, Series, TimeRange};

fn create_test_series(count: usize, base_price: f64) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = (0..count)
        .map(|i| {
            let price = base_price + (i as f64 * 0.1);
            Bar::new(start + Duration::days(i as i64), price, price + 0.05, price - 0.05, price, 1000)
        })
        .collect();
    Series::new("TEST", TimeRange::ThreeMonths, "test", bars)
}

#[test]
fn test_ema_first_value_is_sma_seed() {
    let closes = [2.0, 4.0, 6.0, 8.0, 10.0];
    let values = ema_values(&closes, 3);
    assert_eq!(values[0], None);
    assert_eq!(values[1], None);
    assert_eq!(values[2], Some(4.0));
}

#[test]
fn test_ema_recurrence() {
    let closes = [2.0, 4.0, 6.0, 8.0, 10.0];
    let values = ema_values(&closes, 3);
    // k = 2 / (3 + 1) = 0.5
    assert_eq!(values[3], Some(6.0));
    assert_eq!(values[4], Some(8.0));
}

#[test]
fn test_ema_defined_after_warm_up() {
    let series = create_test_series(50, 100.0);
    let points = calculate_ema(&series, 12).unwrap();
    assert_eq!(points.len(), 50);
    assert!(points[..11].iter().all(|p| p.value.is_none()));
    assert!(points[11..].iter().all(|p| p.value.is_some_and(f64::is_finite)));
}

#[test]
fn test_ema_insufficient_data() {
    let series = create_test_series(10, 100.0);
    let points = calculate_ema(&series, 20).unwrap();
    assert!(points.iter().all(|p| p.value.is_none()));
}

#[test]
fn test_ema_tracks_rising_prices_from_below() {
    let series = create_test_series(40, 100.0);
    let points = calculate_ema(&series, 12).unwrap();
    let last = points.last().unwrap();
    assert!(last.value.unwrap() < last.price);
}
