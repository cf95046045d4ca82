//! Tickerscope API Server
//!
//! HTTP API over the analysis engine, with health check and metrics.
//! Cache state is per process; instances do not share it.

use dotenvy::dotenv;
use tickerscope::config::Config;
use tickerscope::core::http::start_server;
use tickerscope::logging;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let config = Config::from_env();
    logging::init_logging(&config.environment);

    info!("Starting Tickerscope API Server");
    info!(environment = %config.environment, "Environment");
    info!(
        port = config.port,
        live_data = config.use_live_data,
        alpha_vantage = config.alpha_vantage_api_key.is_some(),
        "HTTP Server: http://0.0.0.0:{}",
        config.port
    );

    start_server(config).await?;

    info!("API server stopped");
    Ok(())
}
