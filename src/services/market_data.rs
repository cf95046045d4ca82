//! Market data provider interface.

use async_trait::async_trait;
use url::Url;

use crate::models::series::{Series, TimeRange};
use crate::services::error::ProviderError;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Short identifier used in logs, metrics and `Series::source`.
    fn name(&self) -> &'static str;

    /// One attempt at a daily series for `symbol` covering `range`.
    async fn try_fetch(&self, symbol: &str, range: TimeRange) -> Result<Series, ProviderError>;

    /// Synthetic data is cached on its own TTL.
    fn is_synthetic(&self) -> bool {
        false
    }
}

/// Appends path segments to a base URL, percent-encoding each one.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|_| ProviderError::Malformed(format!("{} cannot be a base URL", base_url)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Rejects series a caller could do nothing with.
pub(crate) fn ensure_usable(series: Series) -> Result<Series, ProviderError> {
    if series.is_empty() {
        return Err(ProviderError::EmptySeries {
            symbol: series.symbol,
        });
    }
    if series.latest_price().is_none() {
        return Err(ProviderError::Malformed(format!(
            "no finite closing prices for {}",
            series.symbol
        )));
    }
    Ok(series)
}
