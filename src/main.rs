use std::env;
use std::sync::Arc;

use tickerscope::cache::MarketCache;
use tickerscope::config::Config;
use tickerscope::core::AnalysisOrchestrator;
use tickerscope::logging;
use tickerscope::models::analysis::Analysis;
use tickerscope::models::series::TimeRange;
use tickerscope::services::ProviderChain;

const USAGE: &str = "usage: tickerscope [--range <1d|5d|1w|1m|3m|6m|1y|5y|max>] SYMBOL...";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    logging::init_logging(&config.environment);

    let mut range = TimeRange::default();
    let mut symbols = Vec::new();
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--range" | "-r" => {
                let value = args.next().ok_or(USAGE)?;
                range = value.parse()?;
            }
            "--help" | "-h" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => symbols.push(arg),
        }
    }
    if symbols.is_empty() {
        return Err(USAGE.into());
    }

    let cache = Arc::new(MarketCache::new());
    let chain = ProviderChain::from_config(&config, Arc::clone(&cache))?;
    let orchestrator = AnalysisOrchestrator::new(chain, cache);

    for symbol in &symbols {
        match orchestrator.get_full_analysis(symbol, range).await {
            Ok(analysis) => print_analysis(&analysis),
            Err(e) => eprintln!("{}: {}", symbol, e),
        }
        println!();
    }

    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    let latest = |values: Option<f64>| match values {
        Some(v) => format!("{:.2}", v),
        None => "n/a".to_string(),
    };
    let bundle = &analysis.indicators;

    println!(
        "{} ({}, source: {})",
        analysis.symbol, analysis.time_range, analysis.source
    );
    println!("  Price:  {}", latest(bundle.sma20.last().map(|p| p.price)));
    println!("  SMA20:  {}", latest(bundle.sma20.last().and_then(|p| p.value)));
    println!("  SMA50:  {}", latest(bundle.sma50.last().and_then(|p| p.value)));
    println!("  RSI:    {}", latest(bundle.rsi.last().and_then(|p| p.value)));
    println!("  MACD:   {}", latest(bundle.macd.last().and_then(|p| p.macd)));
    println!("  ATR:    {}", latest(bundle.atr.last().and_then(|p| p.value)));
    println!("  Sentiment: {:?}", analysis.sentiment);
    if analysis.signals.is_empty() {
        println!("  Signals: none");
    }
    for (i, signal) in analysis.signals.iter().enumerate() {
        println!(
            "    {}. {} {} ({:?}): {}",
            i + 1,
            signal.direction,
            signal.name,
            signal.strength,
            signal.rationale
        );
    }
}
