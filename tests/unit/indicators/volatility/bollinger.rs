//! Unit tests for Bollinger Bands

use chrono::{Duration, NaiveDate};
use tickerscope::indicators::volatility::{calculate_bollinger_bands, calculate_bollinger_bands_default};
use tickerscope::models::series::{Bar, Series, TimeRange};

fn create_test_series(closes: &[f64]) -> Series {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 1000))
        .collect();
    Series::new("TEST", TimeRange::OneMonth, "test", bars)
}

#[test]
fn test_bollinger_known_values() {
    let points = calculate_bollinger_bands(&create_test_series(&[1.0, 2.0, 3.0]), 3, 2.0).unwrap();
    let last = &points[2];
    let sd = (2.0f64 / 3.0).sqrt();
    assert_eq!(last.middle, Some(2.0));
    assert!((last.upper.unwrap() - (2.0 + 2.0 * sd)).abs() < 1e-9);
    assert!((last.lower.unwrap() - (2.0 - 2.0 * sd)).abs() < 1e-9);
    assert_eq!(last.price, 3.0);
}

#[test]
fn test_bollinger_band_ordering() {
    let closes: Vec<f64> = (0..80).map(|i| 20.0 + (i as f64 * 0.5).sin() * 2.0).collect();
    let points = calculate_bollinger_bands_default(&create_test_series(&closes)).unwrap();
    assert!(points[..19].iter().all(|p| p.middle.is_none() && p.upper.is_none()));
    for point in &points[19..] {
        let (upper, middle, lower) = (point.upper.unwrap(), point.middle.unwrap(), point.lower.unwrap());
        assert!(lower <= middle && middle <= upper);
    }
}

#[test]
fn test_bollinger_constant_prices_collapse() {
    let points = calculate_bollinger_bands_default(&create_test_series(&[42.0; 25])).unwrap();
    let last = points.last().unwrap();
    assert_eq!(last.upper, Some(42.0));
    assert_eq!(last.middle, Some(42.0));
    assert_eq!(last.lower, Some(42.0));
}

#[test]
fn test_bollinger_negative_multiplier_uses_magnitude() {
    let series = create_test_series(&[1.0, 2.0, 3.0, 4.0]);
    let positive = calculate_bollinger_bands(&series, 3, 2.0).unwrap();
    let negative = calculate_bollinger_bands(&series, 3, -2.0).unwrap();
    assert_eq!(positive, negative);
}
