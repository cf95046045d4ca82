//! Prometheus metrics for the engine and its HTTP surface

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_requests_in_flight: IntGauge,
    pub http_request_duration_seconds: Histogram,
    pub cache_hits_total: IntCounter,
    pub cache_misses_total: IntCounter,
    /// Labelled by provider and outcome (`success`, `failure`, `timeout`).
    pub provider_requests_total: IntCounterVec,
    pub provider_fallbacks_total: IntCounter,
    pub analysis_duration_seconds: Histogram,
    /// Labelled by direction (`BUY`, `SELL`).
    pub signals_generated_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let cache_hits_total = IntCounter::new("cache_hits_total", "Cache lookups that found a live entry")?;
        let cache_misses_total =
            IntCounter::new("cache_misses_total", "Cache lookups that found nothing or an expired entry")?;
        let provider_requests_total = IntCounterVec::new(
            Opts::new("provider_requests_total", "Market data provider attempts"),
            &["provider", "outcome"],
        )?;
        let provider_fallbacks_total = IntCounter::new(
            "provider_fallbacks_total",
            "Times the provider chain moved on to the next provider",
        )?;
        let analysis_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "analysis_duration_seconds",
                "Time to compute a full analysis, including data fetch",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]),
        )?;
        let signals_generated_total = IntCounterVec::new(
            Opts::new("signals_generated_total", "Trading signals emitted by analyses"),
            &["direction"],
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(cache_hits_total.clone()))?;
        registry.register(Box::new(cache_misses_total.clone()))?;
        registry.register(Box::new(provider_requests_total.clone()))?;
        registry.register(Box::new(provider_fallbacks_total.clone()))?;
        registry.register(Box::new(analysis_duration_seconds.clone()))?;
        registry.register(Box::new(signals_generated_total.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_requests_in_flight,
            http_request_duration_seconds,
            cache_hits_total,
            cache_misses_total,
            provider_requests_total,
            provider_fallbacks_total,
            analysis_duration_seconds,
            signals_generated_total,
        })
    }

    /// Prometheus text exposition of every registered metric.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    pub fn record_provider(&self, provider: &str, outcome: &str) {
        self.provider_requests_total
            .with_label_values(&[provider, outcome])
            .inc();
    }
}
