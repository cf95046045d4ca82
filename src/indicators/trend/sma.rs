//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::indicators::zip_line;
use crate::models::indicators::IndicatorPoint;
use crate::models::series::Series;

/// Mean of the last `period` closes; the first `period - 1` points are null.
pub fn sma_values(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    math::rolling_mean(closes, period)
}

pub fn calculate_sma(series: &Series, period: usize) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period("sma", period)?;
    validate_series(series)?;
    Ok(zip_line(series, sma_values(&series.closes(), period)))
}
