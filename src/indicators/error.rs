//! Indicator error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// Requested name is not in the indicator table
    #[error("unsupported indicator: {0}")]
    Unsupported(String),

    #[error("invalid period for {indicator}: {period}")]
    InvalidPeriod { indicator: &'static str, period: usize },

    /// Series has bars but none with a usable close
    #[error("series for {symbol} has no finite closing prices")]
    MalformedSeries { symbol: String },
}
