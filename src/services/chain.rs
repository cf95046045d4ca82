//! Ordered provider fallback with series caching.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cache::{keys, series_ttl, CachedValue, MarketCache};
use crate::config::Config;
use crate::core::error::AnalysisError;
use crate::metrics::Metrics;
use crate::models::series::{Series, TimeRange};
use crate::services::alpha_vantage::AlphaVantageProvider;
use crate::services::error::ProviderError;
use crate::services::market_data::{ensure_usable, MarketDataProvider};
use crate::services::synthetic::SyntheticProvider;
use crate::services::yahoo::YahooProvider;

/// Tries each provider in order until one yields a usable series.
pub struct ProviderChain {
    providers: Vec<Arc<dyn MarketDataProvider>>,
    cache: Arc<MarketCache>,
    timeout: Duration,
    metrics: Option<Arc<Metrics>>,
}

impl ProviderChain {
    pub fn new(
        providers: Vec<Arc<dyn MarketDataProvider>>,
        cache: Arc<MarketCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            providers,
            cache,
            timeout,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Live providers only when enabled, Alpha Vantage only with a key,
    /// synthetic always last.
    pub fn from_config(config: &Config, cache: Arc<MarketCache>) -> Result<Self, ProviderError> {
        let mut providers: Vec<Arc<dyn MarketDataProvider>> = Vec::new();

        if config.use_live_data {
            providers.push(Arc::new(YahooProvider::new(config.yahoo_base_url.clone())?));
            match &config.alpha_vantage_api_key {
                Some(key) => providers.push(Arc::new(AlphaVantageProvider::new(
                    config.alpha_vantage_base_url.clone(),
                    key.clone(),
                )?)),
                None => info!("ALPHA_VANTAGE_API_KEY not set, skipping Alpha Vantage provider"),
            }
        }
        providers.push(Arc::new(SyntheticProvider::new()));

        Ok(Self::new(providers, cache, config.provider_timeout))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Cached series if present, otherwise the first provider success.
    pub async fn fetch_series(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Arc<Series>, AnalysisError> {
        let key = keys::series(symbol, range);
        if let Some(CachedValue::Series(series)) = self.cache.get(&key).await {
            debug!(symbol = %symbol, range = %range, "Series cache hit");
            return Ok(series);
        }

        for (position, provider) in self.providers.iter().enumerate() {
            match self.attempt(provider.as_ref(), symbol, range).await {
                Ok(series) => {
                    self.record(provider.name(), "success");
                    if position > 0 {
                        if let Some(metrics) = &self.metrics {
                            metrics.provider_fallbacks_total.inc();
                        }
                    }
                    let series = Arc::new(series);
                    self.cache
                        .set(
                            key,
                            CachedValue::Series(Arc::clone(&series)),
                            series_ttl(range, provider.is_synthetic()),
                        )
                        .await;
                    info!(
                        symbol = %symbol,
                        range = %range,
                        provider = provider.name(),
                        bars = series.len(),
                        "Fetched series"
                    );
                    return Ok(series);
                }
                Err(e) => {
                    let outcome = match e {
                        ProviderError::Timeout { .. } => "timeout",
                        _ => "failure",
                    };
                    self.record(provider.name(), outcome);
                    warn!(
                        symbol = %symbol,
                        range = %range,
                        provider = provider.name(),
                        error = %e,
                        "Provider failed, falling back"
                    );
                }
            }
        }

        Err(AnalysisError::EmptySeries {
            symbol: symbol.to_string(),
            range,
        })
    }

    async fn attempt(
        &self,
        provider: &dyn MarketDataProvider,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Series, ProviderError> {
        match tokio::time::timeout(self.timeout, provider.try_fetch(symbol, range)).await {
            Ok(result) => result.and_then(ensure_usable),
            Err(_) => Err(ProviderError::Timeout {
                provider: provider.name().to_string(),
                after: self.timeout,
            }),
        }
    }

    fn record(&self, provider: &str, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_provider(provider, outcome);
        }
    }
}
