//! ATR (Average True Range) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::indicators::zip_line;
use crate::models::indicators::IndicatorPoint;
use crate::models::series::Series;

pub const DEFAULT_ATR_PERIOD: usize = 14;

/// Simple average of the true range. The first bar has no previous close,
/// so the first defined value sits at index `period`.
pub fn atr_values(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let len = closes.len().min(highs.len()).min(lows.len());
    let true_ranges: Vec<f64> = (0..len)
        .map(|i| {
            if i == 0 {
                f64::NAN
            } else {
                math::true_range(highs[i], lows[i], closes[i - 1])
            }
        })
        .collect();

    math::rolling_mean(&true_ranges, period)
}

/// Calculate ATR (Average True Range)
pub fn calculate_atr(series: &Series, period: usize) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    validate_period("atr", period)?;
    validate_series(series)?;

    let values = atr_values(&series.highs(), &series.lows(), &series.closes(), period);
    Ok(zip_line(series, values))
}

/// Calculate ATR with default period (14)
pub fn calculate_atr_default(series: &Series) -> Result<Vec<IndicatorPoint>, IndicatorError> {
    calculate_atr(series, DEFAULT_ATR_PERIOD)
}
