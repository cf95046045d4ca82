//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::error::IndicatorError;
use crate::indicators::validation::{validate_period, validate_series};
use crate::models::indicators::MacdPoint;
use crate::models::series::Series;

pub const DEFAULT_FAST_PERIOD: usize = 12;
pub const DEFAULT_SLOW_PERIOD: usize = 26;
pub const DEFAULT_SIGNAL_PERIOD: usize = 9;

/// Index-aligned MACD components.
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// The MACD line starts where the slow EMA does; the signal line needs a
/// further `signal_period - 1` MACD values on top of that.
pub fn macd_values(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdSeries {
    let fast = math::ema_series(closes, fast_period);
    let slow = math::ema_series(closes, slow_period);

    let macd: Vec<Option<f64>> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| match (f, s) {
            (Some(f), Some(s)) => Some(f - s),
            _ => None,
        })
        .collect();

    let signal = math::ema_series(&math::to_nan_series(&macd), signal_period);

    let histogram = macd
        .iter()
        .zip(&signal)
        .map(|(m, s)| match (m, s) {
            (Some(m), Some(s)) => Some(m - s),
            _ => None,
        })
        .collect();

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

/// Calculate MACD indicator
pub fn calculate_macd(
    series: &Series,
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<Vec<MacdPoint>, IndicatorError> {
    validate_period("macd", fast_period)?;
    validate_period("macd", slow_period)?;
    validate_period("macd", signal_period)?;
    validate_series(series)?;

    let values = macd_values(&series.closes(), fast_period, slow_period, signal_period);
    Ok(series
        .bars()
        .iter()
        .enumerate()
        .map(|(i, bar)| MacdPoint {
            date: bar.date,
            macd: values.macd[i],
            signal: values.signal[i],
            histogram: values.histogram[i],
        })
        .collect())
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(series: &Series) -> Result<Vec<MacdPoint>, IndicatorError> {
    calculate_macd(
        series,
        DEFAULT_FAST_PERIOD,
        DEFAULT_SLOW_PERIOD,
        DEFAULT_SIGNAL_PERIOD,
    )
}
