//! Analysis orchestrator: cache, provider chain, indicators, signals.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::cache::{keys, ttl, CachedValue, MarketCache};
use crate::core::error::AnalysisError;
use crate::indicators::{IndicatorError, IndicatorKind};
use crate::metrics::Metrics;
use crate::models::analysis::{Analysis, Comparison, Quote};
use crate::models::indicators::{IndicatorBundle, IndicatorOutput};
use crate::models::series::{Series, TimeRange};
use crate::models::signal::SignalDirection;
use crate::services::chain::ProviderChain;
use crate::services::synthetic::SyntheticProvider;
use crate::signals::aggregation::sentiment;
use crate::signals::signal_generator::SignalGenerator;

/// Quotes are derived from the most recent trading week.
const QUOTE_RANGE: TimeRange = TimeRange::FiveDays;

pub struct AnalysisOrchestrator {
    chain: ProviderChain,
    cache: Arc<MarketCache>,
    fallback: SyntheticProvider,
    signals: SignalGenerator,
    metrics: Option<Arc<Metrics>>,
}

pub fn normalize_symbol(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}

impl AnalysisOrchestrator {
    pub fn new(chain: ProviderChain, cache: Arc<MarketCache>) -> Self {
        Self {
            chain,
            cache,
            fallback: SyntheticProvider::new(),
            signals: SignalGenerator::default(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Replaces the generator used when an indicator cannot be computed over
    /// provider data.
    pub fn with_fallback(mut self, fallback: SyntheticProvider) -> Self {
        self.fallback = fallback;
        self
    }

    /// One indicator over `range`. Unknown names fail before any fetch.
    pub async fn get_indicator(
        &self,
        symbol: &str,
        name: &str,
        range: TimeRange,
    ) -> Result<Arc<IndicatorOutput>, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        let kind: IndicatorKind = name.parse().map_err(|_| AnalysisError::UnsupportedIndicator {
            symbol: symbol.clone(),
            indicator: name.to_string(),
        })?;

        let key = keys::indicator(&symbol, range, kind.name());
        if let Some(CachedValue::Indicator(output)) = self.cache.get(&key).await {
            debug!(symbol = %symbol, indicator = %kind, "Indicator cache hit");
            return Ok(output);
        }

        let series = self.chain.fetch_series(&symbol, range).await?;
        let output = match kind.compute(&series) {
            Ok(output) => output,
            Err(e) => {
                warn!(
                    symbol = %symbol,
                    range = %range,
                    indicator = %kind,
                    error = %e,
                    "Indicator failed on provider data, recomputing on synthetic series"
                );
                let synthetic = self.fallback.generate(&symbol, range).await;
                kind.compute(&synthetic)
                    .map_err(|source| indicator_error(&symbol, kind.name(), source))?
            }
        };

        let output = Arc::new(output);
        self.cache
            .set(key, CachedValue::Indicator(Arc::clone(&output)), ttl::INDICATOR)
            .await;
        Ok(output)
    }

    /// Every indicator plus signals and sentiment.
    pub async fn get_full_analysis(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<Arc<Analysis>, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        let key = keys::analysis(&symbol, range);
        if let Some(CachedValue::Analysis(analysis)) = self.cache.get(&key).await {
            debug!(symbol = %symbol, range = %range, "Analysis cache hit");
            return Ok(analysis);
        }

        let started = Instant::now();
        let series = self.chain.fetch_series(&symbol, range).await?;
        let (series, indicators) = match compute_bundle(Arc::clone(&series)).await? {
            Ok(bundle) => (series, bundle),
            Err(e) => {
                warn!(
                    symbol = %symbol,
                    range = %range,
                    error = %e,
                    "Analysis failed on provider data, recomputing on synthetic series"
                );
                let synthetic = Arc::new(self.fallback.generate(&symbol, range).await);
                let bundle = compute_bundle(Arc::clone(&synthetic))
                    .await?
                    .map_err(|source| indicator_error(&symbol, "analysis", source))?;
                (synthetic, bundle)
            }
        };

        let signals = self.signals.generate_signals(&series, &indicators);
        let analysis = Arc::new(Analysis {
            symbol: symbol.clone(),
            time_range: range,
            sentiment: sentiment(&signals),
            signals,
            indicators,
            source: series.source.clone(),
            timestamp: Utc::now(),
        });

        let elapsed = started.elapsed();
        if let Some(metrics) = &self.metrics {
            metrics.analysis_duration_seconds.observe(elapsed.as_secs_f64());
            for signal in &analysis.signals {
                let direction = match signal.direction {
                    SignalDirection::Buy => "BUY",
                    SignalDirection::Sell => "SELL",
                };
                metrics.signals_generated_total.with_label_values(&[direction]).inc();
            }
        }
        info!(
            symbol = %symbol,
            range = %range,
            source = %analysis.source,
            signals = analysis.signals.len(),
            sentiment = ?analysis.sentiment,
            duration_ms = elapsed.as_millis(),
            "Analysis complete"
        );

        self.cache
            .set(key, CachedValue::Analysis(Arc::clone(&analysis)), ttl::ANALYSIS)
            .await;
        Ok(analysis)
    }

    /// Latest close against the previous one.
    pub async fn get_quote(&self, symbol: &str) -> Result<Arc<Quote>, AnalysisError> {
        let symbol = normalize_symbol(symbol);
        let key = keys::quote(&symbol);
        if let Some(CachedValue::Quote(quote)) = self.cache.get(&key).await {
            return Ok(quote);
        }

        let series = self.chain.fetch_series(&symbol, QUOTE_RANGE).await?;
        let quote = Arc::new(quote_from_series(&series).ok_or_else(|| {
            AnalysisError::EmptySeries {
                symbol: symbol.clone(),
                range: QUOTE_RANGE,
            }
        })?);

        self.cache
            .set(key, CachedValue::Quote(Arc::clone(&quote)), ttl::QUOTE)
            .await;
        Ok(quote)
    }

    /// Analyses each symbol concurrently. Failing symbols are left out.
    pub async fn compare(&self, symbols: &[String], range: TimeRange) -> Vec<Comparison> {
        let tasks = symbols.iter().map(|symbol| self.compare_one(symbol, range));

        join_all(tasks)
            .await
            .into_iter()
            .zip(symbols)
            .filter_map(|(result, symbol)| match result {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(symbol = %symbol, range = %range, error = %e, "Skipping symbol in comparison");
                    None
                }
            })
            .collect()
    }

    async fn compare_one(&self, symbol: &str, range: TimeRange) -> Result<Comparison, AnalysisError> {
        let analysis = self.get_full_analysis(symbol, range).await?;
        Ok(comparison_from(&analysis))
    }
}

/// Runs the nine indicators off the async executor.
async fn compute_bundle(
    series: Arc<Series>,
) -> Result<Result<IndicatorBundle, IndicatorError>, AnalysisError> {
    Ok(tokio::task::spawn_blocking(move || IndicatorBundle::compute(&series)).await?)
}

fn indicator_error(symbol: &str, indicator: &str, source: IndicatorError) -> AnalysisError {
    AnalysisError::Indicator {
        symbol: symbol.to_string(),
        indicator: indicator.to_string(),
        source,
    }
}

/// `None` when the series has no finite close.
pub fn quote_from_series(series: &Series) -> Option<Quote> {
    let mut finite = series.bars().iter().rev().filter(|b| b.close.is_finite());
    let latest = finite.next()?;
    let previous_close = finite.next().map(|b| b.close);
    let change = previous_close.map(|prev| latest.close - prev);
    let change_percent = previous_close
        .zip(change)
        .filter(|(prev, _)| *prev != 0.0)
        .map(|(prev, change)| change / prev * 100.0);

    Some(Quote {
        symbol: series.symbol.clone(),
        price: latest.close,
        previous_close,
        change,
        change_percent,
        volume: latest.volume,
        date: latest.date,
        source: series.source.clone(),
    })
}

/// Prices come from the bars the analysis was computed over, so they agree
/// with its signals even when the analysis came from a fallback series.
pub fn comparison_from(analysis: &Analysis) -> Comparison {
    let start_price = analysis.indicators.finite_closes().next();
    let end_price = analysis.indicators.finite_closes().next_back();
    let change_percent = start_price
        .zip(end_price)
        .filter(|(start, _)| *start != 0.0)
        .map(|(start, end)| (end - start) / start * 100.0);

    Comparison {
        symbol: analysis.symbol.clone(),
        start_price,
        end_price,
        change_percent,
        sentiment: analysis.sentiment,
        signals: analysis.signals.clone(),
    }
}
