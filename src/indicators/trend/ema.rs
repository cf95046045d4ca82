//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::indicators::zip_line;
use crate::models::indicators::IndicatorPoint;
use crate::models::series::Series;

/// EMA seeded with the SMA of the first `period` closes.
///
/// `ema[i] = close[i] * k + ema[i-1] * (1 - k)`, `k = 2 / (period + 1)`
pub fn ema_values(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::ema_series(closes, period)
}

/// Calculate EMA for a specific period
pub fn calculate_ema(series: &Series, period: usize) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period("ema", period)?;
    validate_series(series)?;
    Ok(zip_line(series, ema_values(&series.closes(), period)))
}
