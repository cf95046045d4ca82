use crate::indicators::error::IndicatorError;
use crate::models::series::Series;

pub fn validate_period(indicator: &'static str, period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator, period });
    }
    Ok(())
}

/// A series with bars but no finite close cannot produce anything useful.
pub fn validate_series(series: &Series) -> Result<(), IndicatorError> {
    if !series.is_empty() && series.latest_price().is_none() {
        return Err(IndicatorError::MalformedSeries {
            symbol: series.symbol.clone(),
        });
    }
    Ok(())
}
