//! Stochastic Oscillator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::models::indicators::StochasticPoint;
use crate::models::series::Series;

pub const DEFAULT_STOCHASTIC_PERIOD: usize = 14;
pub const DEFAULT_STOCHASTIC_SMOOTHING: usize = 3;

/// %K reported when the lookback high equals the lookback low.
pub const FLAT_RANGE_K: f64 = 50.0;

/// Returns (%K, %D).
///
/// %K = (close - lowest low) / (highest high - lowest low) * 100
/// %D = SMA(smoothing) of %K
pub fn stochastic_values(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    period: usize,
    smoothing: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let len = closes.len().min(highs.len()).min(lows.len());
    let mut k = vec![None; len];

    if period > 0 {
        for i in period.saturating_sub(1)..len {
            let window = i + 1 - period..=i;
            let high_window = &highs[window.clone()];
            let low_window = &lows[window];
            let close = closes[i];
            if !close.is_finite()
                || !high_window.iter().chain(low_window).all(|v| v.is_finite())
            {
                continue;
            }

            let highest = high_window.iter().copied().fold(f64::MIN, f64::max);
            let lowest = low_window.iter().copied().fold(f64::MAX, f64::min);
            let range = highest - lowest;
            k[i] = Some(if range == 0.0 {
                FLAT_RANGE_K
            } else {
                (close - lowest) / range * 100.0
            });
        }
    }

    let d = math::rolling_mean(&math::to_nan_series(&k), smoothing);
    (k, d)
}

pub fn calculate_stochastic(
    series: &Series,
    period: usize,
    smoothing: usize,
) -> Result<Vec<StochasticPoint>, IndicatorError> {
    validate_period("stochastic", period)?;
    validate_period("stochastic", smoothing)?;
    validate_series(series)?;

    let (k, d) = stochastic_values(
        &series.highs(),
        &series.lows(),
        &series.closes(),
        period,
        smoothing,
    );
    Ok(series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| StochasticPoint {
            date: bar.date,
            k: k[i],
            d: d[i],
        })
        .collect())
}

/// Calculate Stochastic with default parameters (14, 3)
pub fn calculate_stochastic_default(series: &Series) -> Result<Vec<StochasticPoint>, IndicatorError> {
    calculate_stochastic(
        series,
        DEFAULT_STOCHASTIC_PERIOD,
        DEFAULT_STOCHASTIC_SMOOTHING,
    )
}
