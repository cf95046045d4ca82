//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::models::indicators::BollingerPoint;
use crate::models::series::Series;

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_STD_DEV: f64 = 2.0;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
pub fn calculate_bollinger_bands(
    series: &Series,
    period: usize,
    std_dev: f64,
) -> Result<Vec<BollingerPoint>, IndicatorError> {
    validate_period("bollinger", period)?;
    validate_series(series)?;

    let closes = series.closes();
    let middle = math::rolling_mean(&closes, period);
    let deviation = math::rolling_std_dev(&closes, period);
    let width = std_dev.abs();

    Ok(series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let bands = middle[i].zip(deviation[i]);
            BollingerPoint {
                date: bar.date,
                upper: bands.map(|(m, sd)| m + width * sd),
                middle: middle[i],
                lower: bands.map(|(m, sd)| m - width * sd),
                price: bar.close,
            }
        })
        .collect())
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(series: &Series) -> Result<Vec<BollingerPoint>, IndicatorError> {
    calculate_bollinger_bands(series, DEFAULT_BOLLINGER_PERIOD, DEFAULT_BOLLINGER_STD_DEV)
}
