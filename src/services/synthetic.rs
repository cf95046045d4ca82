//! Deterministic-shape synthetic series, the last link of the provider chain.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::models::series::{Bar, Series, TimeRange};
use crate::services::error::ProviderError;
use crate::services::market_data::MarketDataProvider;

pub const SYNTHETIC_SOURCE: &str = "synthetic";

const MAX_DAILY_STEP: f64 = 0.02;
const MAX_WICK: f64 = 0.01;
const MIN_VOLUME: u64 = 1_000_000;
const MAX_VOLUME: u64 = 10_000_000;

/// `10 + (sum of the symbol's character codes) mod 490`
pub fn base_price(symbol: &str) -> f64 {
    let code_sum: u64 = symbol.chars().map(|c| c as u64).sum();
    10.0 + (code_sum % 490) as f64
}

/// Random walk of `days(range) + 1` daily bars ending on `end`.
///
/// Each close moves by a uniform step in ±2% from the previous one; opens
/// continue from the previous close and wicks reach up to 1% past the body.
pub fn generate_series<R: Rng>(
    symbol: &str,
    range: TimeRange,
    end: NaiveDate,
    rng: &mut R,
) -> Series {
    let days = i64::from(range.days());
    let start = end - Duration::days(days);

    let mut price = base_price(symbol);
    let bars = (0..=days)
        .map(|offset| {
            let open = price;
            let close = open * (1.0 + rng.random_range(-MAX_DAILY_STEP..=MAX_DAILY_STEP));
            let high = open.max(close) * (1.0 + rng.random_range(0.0..MAX_WICK));
            let low = open.min(close) * (1.0 - rng.random_range(0.0..MAX_WICK));
            let volume = rng.random_range(MIN_VOLUME..=MAX_VOLUME);
            price = close;
            Bar::new(start + Duration::days(offset), open, high, low, close, volume)
        })
        .collect();

    Series::new(symbol, range, SYNTHETIC_SOURCE, bars)
}

/// Never fails. The random source is injected so tests can pin it.
pub struct SyntheticProvider {
    rng: Mutex<StdRng>,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub async fn generate(&self, symbol: &str, range: TimeRange) -> Series {
        let mut rng = self.rng.lock().await;
        generate_series(symbol, range, Utc::now().date_naive(), &mut *rng)
    }
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &'static str {
        SYNTHETIC_SOURCE
    }

    async fn try_fetch(&self, symbol: &str, range: TimeRange) -> Result<Series, ProviderError> {
        Ok(self.generate(symbol, range).await)
    }

    fn is_synthetic(&self) -> bool {
        true
    }
}
