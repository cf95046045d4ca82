//! Alpha Vantage daily provider (secondary live source)

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use reqwest::Client;
use tracing::{debug, warn};

use super::response::{DailyBar, DailyResponse};
use crate::models::series::{Bar, Series, TimeRange};
use crate::services::error::ProviderError;
use crate::services::market_data::{endpoint, ensure_usable, MarketDataProvider};

pub const ALPHA_VANTAGE_SOURCE: &str = "alpha_vantage";

/// `compact` returns the latest 100 trading days.
const COMPACT_DAYS: u32 = 100;

pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(base_url, api_key, client))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

pub fn output_size(range: TimeRange) -> &'static str {
    if range.days() > COMPACT_DAYS {
        "full"
    } else {
        "compact"
    }
}

fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_bar(date: &str, raw: &DailyBar) -> Option<Bar> {
    let date = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            warn!(date = %date, error = %e, "Alpha Vantage: skipping bar with bad date");
            return None;
        }
    };
    let volume = raw.volume.trim().parse::<u64>().unwrap_or(0);
    Some(Bar::new(
        date,
        parse_price(&raw.open),
        parse_price(&raw.high),
        parse_price(&raw.low),
        parse_price(&raw.close),
        volume,
    ))
}

/// Keeps the bars within `range` calendar days of the most recent one.
pub(crate) fn trim_to_range(mut bars: Vec<Bar>, range: TimeRange) -> Vec<Bar> {
    let Some(latest) = bars.iter().map(|b| b.date).max() else {
        return bars;
    };
    let cutoff = latest - Duration::days(i64::from(range.days()));
    bars.retain(|b| b.date >= cutoff);
    bars
}

#[async_trait]
impl MarketDataProvider for AlphaVantageProvider {
    fn name(&self) -> &'static str {
        ALPHA_VANTAGE_SOURCE
    }

    async fn try_fetch(&self, symbol: &str, range: TimeRange) -> Result<Series, ProviderError> {
        let url = endpoint(&self.base_url, &["query"])?;
        debug!(symbol = %symbol, range = %range, "Alpha Vantage: requesting daily series");

        let response = self
            .client
            .get(url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", output_size(range)),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable body".to_string());
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: DailyResponse = response.json().await?;
        if let Some(message) = payload.api_message() {
            return Err(ProviderError::Api(message.to_string()));
        }

        let raw = payload.time_series.ok_or_else(|| ProviderError::EmptySeries {
            symbol: symbol.to_string(),
        })?;

        let bars: Vec<Bar> = raw
            .iter()
            .filter_map(|(date, bar)| parse_bar(date, bar))
            .collect();
        let bars = trim_to_range(bars, range);
        debug!(symbol = %symbol, count = bars.len(), "Alpha Vantage: parsed bars");

        ensure_usable(Series::new(symbol, range, ALPHA_VANTAGE_SOURCE, bars))
    }
}
