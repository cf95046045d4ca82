//! Response envelopes produced by the orchestrator

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::indicators::IndicatorBundle;
use crate::models::series::TimeRange;
use crate::models::signal::{Sentiment, Signal};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub symbol: String,
    pub time_range: TimeRange,
    pub indicators: IndicatorBundle,
    pub signals: Vec<Signal>,
    pub sentiment: Sentiment,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub previous_close: Option<f64>,
    pub change: Option<f64>,
    pub change_percent: Option<f64>,
    pub volume: u64,
    pub date: NaiveDate,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub symbol: String,
    pub start_price: Option<f64>,
    pub end_price: Option<f64>,
    pub change_percent: Option<f64>,
    pub sentiment: Sentiment,
    pub signals: Vec<Signal>,
}
