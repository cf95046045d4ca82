//! Tickerscope: technical indicator and signal engine over daily OHLCV series.
//!
//! Series come from a provider chain (live sources with a synthetic
//! fallback) behind a TTL cache; the orchestrator computes indicators and
//! trading signals on top.

pub mod cache;
pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
