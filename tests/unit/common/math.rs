//! Unit tests for the shared numeric helpers

use tickerscope::common::math::{
    ema_multiplier, ema_series, first_finite_window, mean, population_std_dev, rolling_mean,
    rolling_std_dev, true_range,
};

#[test]
fn test_mean_and_population_std_dev() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_eq!(mean(&values), 5.0);
    assert_eq!(population_std_dev(&values), 2.0);
}

#[test]
fn test_std_dev_of_constant_window_is_zero() {
    assert_eq!(population_std_dev(&[4.0, 4.0, 4.0]), 0.0);
}

#[test]
fn test_rolling_mean_nulls_window_with_nan() {
    let values = [1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0];
    let out = rolling_mean(&values, 3);
    assert_eq!(out, vec![None, None, None, None, None, Some(5.0)]);
}

#[test]
fn test_rolling_std_dev_warm_up() {
    let out = rolling_std_dev(&[1.0, 1.0, 1.0, 1.0], 3);
    assert_eq!(out, vec![None, None, Some(0.0), Some(0.0)]);
}

#[test]
fn test_ema_multiplier() {
    assert!((ema_multiplier(9) - 0.2).abs() < 1e-12);
}

#[test]
fn test_first_finite_window_skips_nan() {
    let values = [f64::NAN, 1.0, 2.0, 3.0];
    assert_eq!(first_finite_window(&values, 3), Some(3));
    assert_eq!(first_finite_window(&values, 5), None);
}

#[test]
fn test_ema_series_holds_state_across_nan() {
    let values = [1.0, 2.0, 3.0, f64::NAN, 5.0];
    let out = ema_series(&values, 3);
    assert!(out[..2].iter().all(Option::is_none));
    assert_eq!(out[2], Some(2.0));
    assert_eq!(out[3], None);
    // k = 0.5, previous EMA 2.0 carried over the gap
    assert_eq!(out[4], Some(3.5));
}

#[test]
fn test_true_range_uses_previous_close() {
    assert_eq!(true_range(12.0, 10.0, 11.0), 2.0);
    assert_eq!(true_range(12.0, 10.0, 15.0), 5.0);
    assert_eq!(true_range(12.0, 10.0, 7.0), 5.0);
    assert!(true_range(12.0, f64::NAN, 7.0).is_nan());
}
