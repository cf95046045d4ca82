use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Single-valued indicator reading (SMA, EMA, RSI, ATR).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<f64>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub date: NaiveDate,
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerPoint {
    pub date: NaiveDate,
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StochasticPoint {
    pub date: NaiveDate,
    pub k: Option<f64>,
    pub d: Option<f64>,
}

/// Output of one indicator over a series. Serialized as the bare point list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorOutput {
    Line(Vec<IndicatorPoint>),
    Macd(Vec<MacdPoint>),
    Bollinger(Vec<BollingerPoint>),
    Stochastic(Vec<StochasticPoint>),
}

impl IndicatorOutput {
    pub fn len(&self) -> usize {
        match self {
            IndicatorOutput::Line(points) => points.len(),
            IndicatorOutput::Macd(points) => points.len(),
            IndicatorOutput::Bollinger(points) => points.len(),
            IndicatorOutput::Stochastic(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every indicator computed for a full analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorBundle {
    pub sma20: Vec<IndicatorPoint>,
    pub sma50: Vec<IndicatorPoint>,
    pub ema12: Vec<IndicatorPoint>,
    pub ema26: Vec<IndicatorPoint>,
    pub rsi: Vec<IndicatorPoint>,
    pub macd: Vec<MacdPoint>,
    pub bollinger: Vec<BollingerPoint>,
    pub stochastic: Vec<StochasticPoint>,
    pub atr: Vec<IndicatorPoint>,
}

impl IndicatorBundle {
    /// Finite closes of the series the bundle was computed over, in order.
    pub fn finite_closes(&self) -> impl DoubleEndedIterator<Item = f64> + '_ {
        self.sma20.iter().map(|p| p.price).filter(|c| c.is_finite())
    }
}

/// Latest readings that feed the signal rules. `None` means the indicator
/// had no defined value at the most recent bar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestValues {
    pub price: Option<f64>,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_histogram: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
}

impl LatestValues {
    pub fn new(price: f64) -> Self {
        Self {
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_moving_averages(mut self, sma20: f64, sma50: f64) -> Self {
        self.sma20 = Some(sma20);
        self.sma50 = Some(sma50);
        self
    }

    pub fn with_rsi(mut self, rsi: f64) -> Self {
        self.rsi = Some(rsi);
        self
    }

    pub fn with_macd(mut self, macd: f64, signal: f64, histogram: f64) -> Self {
        self.macd = Some(macd);
        self.macd_signal = Some(signal);
        self.macd_histogram = Some(histogram);
        self
    }

    pub fn with_bollinger(mut self, upper: f64, lower: f64) -> Self {
        self.bollinger_upper = Some(upper);
        self.bollinger_lower = Some(lower);
        self
    }
}
