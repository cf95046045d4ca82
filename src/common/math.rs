//! Rolling-window numerics shared by the indicators.
//!
//! Inputs use `f64::NAN` (or any non-finite value) for a missing reading.
//! Outputs are index-aligned with the input; `None` marks an undefined value.

/// `Some(value)` when the value is finite.
pub fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn window_is_finite(window: &[f64]) -> bool {
    window.iter().all(|v| v.is_finite())
}

/// Arithmetic mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation of a slice.
pub fn population_std_dev(values: &[f64]) -> f64 {
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.max(0.0).sqrt()
}

/// Trailing simple moving average. Undefined for the first `period - 1`
/// entries and for any window holding a non-finite value.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, mean)
}

/// Trailing population standard deviation, aligned like [`rolling_mean`].
pub fn rolling_std_dev(values: &[f64], period: usize) -> Vec<Option<f64>> {
    rolling(values, period, population_std_dev)
}

fn rolling(values: &[f64], period: usize, f: impl Fn(&[f64]) -> f64) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            if window_is_finite(window) {
                Some(f(window))
            } else {
                None
            }
        })
        .collect()
}

/// Smoothing factor `2 / (period + 1)`.
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// One EMA step from the previous value.
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    let k = ema_multiplier(period);
    value * k + previous * (1.0 - k)
}

/// Index of the first full window of `period` finite values, if any.
pub fn first_finite_window(values: &[f64], period: usize) -> Option<usize> {
    if period == 0 || values.len() < period {
        return None;
    }
    (period - 1..values.len()).find(|&i| window_is_finite(&values[i + 1 - period..=i]))
}

/// Exponential moving average seeded with the SMA of the first full window.
///
/// A non-finite value after the seed yields `None` at that index and leaves
/// the running average untouched.
pub fn ema_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    let Some(seed_idx) = first_finite_window(values, period) else {
        return out;
    };

    let mut ema = mean(&values[seed_idx + 1 - period..=seed_idx]);
    out[seed_idx] = Some(ema);

    for i in seed_idx + 1..values.len() {
        if let Some(value) = finite(values[i]) {
            ema = ema_from_previous(value, ema, period);
            out[i] = Some(ema);
        }
    }
    out
}

/// True range against the previous close. Non-finite when any input is.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    if !(high.is_finite() && low.is_finite() && prev_close.is_finite()) {
        return f64::NAN;
    }
    let hl = high - low;
    let hc = (high - prev_close).abs();
    let lc = (low - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Converts an optional series back to the NaN-as-missing representation.
pub fn to_nan_series(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}
