//! Alpha Vantage TIME_SERIES_DAILY payloads

use std::collections::BTreeMap;

use serde::Deserialize;

/// Alpha Vantage answers 200 for throttling and bad symbols too; those
/// bodies carry one of the message fields instead of the series.
#[derive(Debug, Deserialize)]
pub struct DailyResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: Option<BTreeMap<String, DailyBar>>,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(rename = "Information", default)]
    pub information: Option<String>,
    #[serde(rename = "Error Message", default)]
    pub error_message: Option<String>,
}

impl DailyResponse {
    pub fn api_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .or(self.note.as_deref())
            .or(self.information.as_deref())
    }
}

/// Prices arrive as decimal strings.
#[derive(Debug, Deserialize)]
pub struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}
