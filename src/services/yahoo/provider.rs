//! Yahoo Finance chart provider (primary live source)

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use tracing::debug;

use super::response::{ChartResponse, ChartResult};
use crate::models::series::{Bar, Series, TimeRange};
use crate::services::error::ProviderError;
use crate::services::market_data::{endpoint, ensure_usable, MarketDataProvider};

pub const YAHOO_SOURCE: &str = "yahoo";

const USER_AGENT: &str = "Mozilla/5.0 (compatible; tickerscope/0.1)";

pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// Yahoo's own range vocabulary. A week is served from the 5-day window.
pub fn yahoo_range(range: TimeRange) -> &'static str {
    match range {
        TimeRange::OneDay => "1d",
        TimeRange::FiveDays | TimeRange::OneWeek => "5d",
        TimeRange::OneMonth => "1mo",
        TimeRange::ThreeMonths => "3mo",
        TimeRange::SixMonths => "6mo",
        TimeRange::OneYear => "1y",
        TimeRange::FiveYears => "5y",
        TimeRange::Max => "max",
    }
}

fn reading(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

fn price(column: &[Option<f64>], i: usize) -> f64 {
    reading(column, i).unwrap_or(f64::NAN)
}

/// Bars with no price at all (or no usable timestamp) are dropped. A partly
/// missing bar is kept with NaN fields and treated as malformed downstream.
fn bars_from_chart(result: &ChartResult) -> Vec<Bar> {
    let Some(quote) = result.indicators.quote.first() else {
        return Vec::new();
    };
    result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let columns = [&quote.open, &quote.high, &quote.low, &quote.close];
            if columns.iter().all(|column| reading(column, i).is_none()) {
                return None;
            }
            let date = DateTime::from_timestamp(*ts, 0)?.date_naive();
            let volume = reading(&quote.volume, i)
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u64)
                .unwrap_or(0);
            Some(Bar::new(
                date,
                price(&quote.open, i),
                price(&quote.high, i),
                price(&quote.low, i),
                price(&quote.close, i),
                volume,
            ))
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &'static str {
        YAHOO_SOURCE
    }

    async fn try_fetch(&self, symbol: &str, range: TimeRange) -> Result<Series, ProviderError> {
        let url = endpoint(&self.base_url, &["v8", "finance", "chart", symbol])?;
        debug!(symbol = %symbol, range = %range, url = %url, "Yahoo: requesting chart");

        let response = self
            .client
            .get(url)
            .query(&[("range", yahoo_range(range)), ("interval", "1d")])
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

        let payload: ChartResponse = response.json().await?;
        if let Some(err) = payload.chart.error {
            return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)));
        }

        let result = payload
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::EmptySeries {
                symbol: symbol.to_string(),
            })?;

        let bars = bars_from_chart(&result);
        debug!(symbol = %symbol, count = bars.len(), "Yahoo: parsed bars");
        ensure_usable(Series::new(symbol, range, YAHOO_SOURCE, bars))
    }
}
