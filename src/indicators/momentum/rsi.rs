//! RSI (Relative Strength Index) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::indicators::zip_line;
use crate::models::indicators::IndicatorPoint;
use crate::models::series::Series;

pub const DEFAULT_RSI_PERIOD: usize = 14;

/// RSI for one pair of averages.
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss.
/// No losses saturates at 100; a flat window (no gains either) reads 50.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { 50.0 } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Wilder RSI. Averages are seeded over the first `period` deltas, so the
/// first defined value sits at index `period`.
pub fn rsi_values(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    // deltas[i] is the change into closes[i + 1]
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let Some(seed_idx) = math::first_finite_window(&deltas, period) else {
        return out;
    };

    let seed = &deltas[seed_idx + 1 - period..=seed_idx];
    let mut avg_gain = seed.iter().map(|d| d.max(0.0)).sum::<f64>() / period as f64;
    let mut avg_loss = seed.iter().map(|d| (-d).max(0.0)).sum::<f64>() / period as f64;
    out[seed_idx + 1] = Some(rsi_from_averages(avg_gain, avg_loss));

    let p = period as f64;
    for (i, delta) in deltas.iter().enumerate().skip(seed_idx + 1) {
        let Some(delta) = math::finite(*delta) else {
            continue;
        };
        avg_gain = (avg_gain * (p - 1.0) + delta.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-delta).max(0.0)) / p;
        out[i + 1] = Some(rsi_from_averages(avg_gain, avg_loss));
    }
    out
}

/// Calculate RSI indicator
pub fn calculate_rsi(series: &Series, period: usize) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period("rsi", period)?;
    validate_series(series)?;
    Ok(zip_line(series, rsi_values(&series.closes(), period)))
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(series: &Series) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    calculate_rsi(series, DEFAULT_RSI_PERIOD)
}
