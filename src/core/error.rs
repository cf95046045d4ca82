use thiserror::Error;

use crate::indicators::IndicatorError;
use crate::models::series::TimeRange;

/// Failures surfaced to callers of the analysis engine.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Every provider in the chain came back without usable bars.
    #[error("no data available for {symbol} over {range}")]
    EmptySeries { symbol: String, range: TimeRange },

    #[error("unsupported indicator '{indicator}' requested for {symbol}")]
    UnsupportedIndicator { symbol: String, indicator: String },

    #[error("failed to compute {indicator} for {symbol}: {source}")]
    Indicator {
        symbol: String,
        indicator: String,
        #[source]
        source: IndicatorError,
    },

    #[error("analysis worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
