//! HTTP endpoint server using Axum

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::cache::MarketCache;
use crate::config::Config;
use crate::core::error::AnalysisError;
use crate::core::orchestrator::{normalize_symbol, AnalysisOrchestrator};
use crate::indicators::{IndicatorCategory, IndicatorKind};
use crate::metrics::Metrics;
use crate::models::series::TimeRange;
use crate::services::chain::ProviderChain;

const MAX_SYMBOL_LEN: usize = 5;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<AnalysisOrchestrator>, metrics: Arc<Metrics>) -> Self {
        Self {
            health: Arc::new(RwLock::new(HealthStatus::default())),
            metrics,
            start_time: Arc::new(Instant::now()),
            orchestrator,
        }
    }

    /// Reported by `/health` while in-flight requests drain.
    pub async fn mark_shutting_down(&self) {
        self.health.write().await.status = "shutting_down".to_string();
    }
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Error response with a JSON body of `{error, symbol, ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn invalid_symbol(symbol: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({
                "error": "invalid symbol, expected 1-5 characters of A-Z, 0-9 or '.'",
                "symbol": symbol,
            }),
        }
    }

    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message }),
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let message = err.to_string();
        match err {
            AnalysisError::EmptySeries { symbol, range } => Self {
                status: StatusCode::NOT_FOUND,
                body: json!({ "error": message, "symbol": symbol, "range": range }),
            },
            AnalysisError::UnsupportedIndicator { symbol, indicator } => Self {
                status: StatusCode::BAD_REQUEST,
                body: json!({
                    "error": message,
                    "symbol": symbol,
                    "indicator": indicator,
                    "supported": IndicatorKind::ALL.iter().map(|k| k.name()).collect::<Vec<_>>(),
                }),
            },
            AnalysisError::Indicator {
                symbol, indicator, ..
            } => {
                error!(symbol = %symbol, indicator = %indicator, error = %message, "Indicator computation failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({ "error": message, "symbol": symbol, "indicator": indicator }),
                }
            }
            AnalysisError::Worker(_) => {
                error!(error = %message, "Analysis worker failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: json!({ "error": message }),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Upper-cases and checks `^[A-Z0-9.]{1,5}$`.
pub fn validate_symbol(raw: &str) -> Result<String, ApiError> {
    let symbol = normalize_symbol(raw);
    let valid = (1..=MAX_SYMBOL_LEN).contains(&symbol.len())
        && symbol
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '.');
    if valid {
        Ok(symbol)
    } else {
        Err(ApiError::invalid_symbol(raw))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    range: Option<String>,
}

impl RangeQuery {
    fn time_range(&self) -> TimeRange {
        self.range
            .as_deref()
            .map(TimeRange::parse_or_default)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    symbols: Option<String>,
    range: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IndicatorInfo {
    name: &'static str,
    aliases: Vec<&'static str>,
    category: IndicatorCategory,
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "tickerscope-analysis-engine"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

/// Supported indicators with their accepted names
async fn list_indicators() -> Json<Value> {
    let indicators: Vec<IndicatorInfo> = IndicatorKind::ALL
        .iter()
        .map(|kind| IndicatorInfo {
            name: kind.name(),
            aliases: kind.aliases(),
            category: kind.category(),
        })
        .collect();
    Json(json!({ "indicators": indicators }))
}

/// One indicator over the requested range
async fn get_indicator(
    State(state): State<AppState>,
    Path((symbol, indicator)): Path<(String, String)>,
    Query(params): Query<RangeQuery>,
) -> Result<Json<Value>, ApiError> {
    let symbol = validate_symbol(&symbol)?;
    let range = params.time_range();
    let data = state
        .orchestrator
        .get_indicator(&symbol, &indicator, range)
        .await?;

    Ok(Json(json!({
        "symbol": symbol,
        "indicator": indicator.to_ascii_lowercase(),
        "timeRange": range,
        "data": data,
    })))
}

/// Full analysis: indicators, signals and sentiment
async fn get_analysis(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<RangeQuery>,
) -> Result<Response, ApiError> {
    let symbol = validate_symbol(&symbol)?;
    let analysis = state
        .orchestrator
        .get_full_analysis(&symbol, params.time_range())
        .await?;
    Ok(Json(analysis).into_response())
}

async fn get_quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Response, ApiError> {
    let symbol = validate_symbol(&symbol)?;
    let quote = state.orchestrator.get_quote(&symbol).await?;
    Ok(Json(quote).into_response())
}

/// Side-by-side analysis of several symbols
async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<Value>, ApiError> {
    let raw = params
        .symbols
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("missing 'symbols' query parameter"))?;
    let symbols = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(validate_symbol)
        .collect::<Result<Vec<_>, _>>()?;
    if symbols.is_empty() {
        return Err(ApiError::bad_request("no symbols to compare"));
    }

    let range = params
        .range
        .as_deref()
        .map(TimeRange::parse_or_default)
        .unwrap_or_default();
    let results = state.orchestrator.compare(&symbols, range).await;

    Ok(Json(json!({
        "timeRange": range,
        "results": results,
    })))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/indicators", get(list_indicators))
        .route(
            "/api/stocks/{symbol}/indicators/{indicator}",
            get(get_indicator),
        )
        .route("/api/stocks/{symbol}/analysis", get(get_analysis))
        .route("/api/stocks/{symbol}/quote", get(get_quote))
        .route("/api/compare", get(compare))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Wires metrics, cache, provider chain and orchestrator, then serves until
/// ctrl-c.
pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let cache = Arc::new(MarketCache::with_metrics(Arc::clone(&metrics)));
    let sweeper = cache.spawn_sweeper(config.cache_sweep_interval);

    let chain = ProviderChain::from_config(&config, Arc::clone(&cache))?
        .with_metrics(Arc::clone(&metrics));
    info!(providers = ?chain.provider_names(), "Provider chain ready");

    let orchestrator = Arc::new(
        AnalysisOrchestrator::new(chain, Arc::clone(&cache)).with_metrics(Arc::clone(&metrics)),
    );
    let state = AppState::new(orchestrator, metrics);
    let app = create_router(state.clone());
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
            state.mark_shutting_down().await;
        })
        .await?;

    sweeper.abort();
    info!("HTTP server stopped");
    Ok(())
}
