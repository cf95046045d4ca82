use crate::models::indicators::{IndicatorBundle, IndicatorPoint, LatestValues};
use crate::models::series::Series;
use crate::models::signal::{Signal, SignalStrength};

/// RSI levels that trigger the overbought / oversold rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsiThresholds {
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiThresholds {
    fn default() -> Self {
        Self {
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

/// Rule engine over the latest indicator readings.
///
/// Rules are independent and evaluated in a fixed order (moving averages,
/// RSI, MACD, Bollinger), so the output order is deterministic. A rule whose
/// inputs are missing is skipped.
#[derive(Debug, Clone, Default)]
pub struct SignalGenerator {
    rsi: RsiThresholds,
}

impl SignalGenerator {
    pub fn new(rsi: RsiThresholds) -> Self {
        Self { rsi }
    }

    pub fn generate(&self, values: &LatestValues) -> Vec<Signal> {
        let mut signals = Vec::new();
        signals.extend(self.analyze_moving_averages(values));
        signals.extend(self.analyze_rsi(values));
        signals.extend(self.analyze_macd(values));
        signals.extend(self.analyze_bollinger(values));
        signals
    }

    pub fn generate_signals(&self, series: &Series, bundle: &IndicatorBundle) -> Vec<Signal> {
        self.generate(&latest_values(series, bundle))
    }

    fn analyze_moving_averages(&self, values: &LatestValues) -> Option<Signal> {
        let (price, sma20, sma50) = (values.price?, values.sma20?, values.sma50?);

        if price > sma20 && sma20 > sma50 {
            Some(Signal::buy(
                "Golden Cross",
                SignalStrength::Strong,
                format!(
                    "Price {:.2} above SMA20 {:.2}, which is above SMA50 {:.2}",
                    price, sma20, sma50
                ),
            ))
        } else if price < sma20 && sma20 < sma50 {
            Some(Signal::sell(
                "Death Cross",
                SignalStrength::Strong,
                format!(
                    "Price {:.2} below SMA20 {:.2}, which is below SMA50 {:.2}",
                    price, sma20, sma50
                ),
            ))
        } else {
            None
        }
    }

    fn analyze_rsi(&self, values: &LatestValues) -> Option<Signal> {
        let rsi = values.rsi?;

        if rsi > self.rsi.overbought {
            Some(Signal::sell(
                "Overbought",
                SignalStrength::Medium,
                format!("RSI {:.2} above {:.0}", rsi, self.rsi.overbought),
            ))
        } else if rsi < self.rsi.oversold {
            Some(Signal::buy(
                "Oversold",
                SignalStrength::Medium,
                format!("RSI {:.2} below {:.0}", rsi, self.rsi.oversold),
            ))
        } else {
            None
        }
    }

    fn analyze_macd(&self, values: &LatestValues) -> Option<Signal> {
        let (macd, signal, histogram) = (values.macd?, values.macd_signal?, values.macd_histogram?);

        if macd > signal && histogram > 0.0 {
            Some(Signal::buy(
                "MACD Bullish",
                SignalStrength::Medium,
                format!(
                    "MACD {:.4} above signal {:.4}, histogram {:.4}",
                    macd, signal, histogram
                ),
            ))
        } else if macd < signal && histogram < 0.0 {
            Some(Signal::sell(
                "MACD Bearish",
                SignalStrength::Medium,
                format!(
                    "MACD {:.4} below signal {:.4}, histogram {:.4}",
                    macd, signal, histogram
                ),
            ))
        } else {
            None
        }
    }

    fn analyze_bollinger(&self, values: &LatestValues) -> Option<Signal> {
        let price = values.price?;
        let (upper, lower) = (values.bollinger_upper?, values.bollinger_lower?);

        if price > upper {
            Some(Signal::sell(
                "Upper Breach",
                SignalStrength::Medium,
                format!("Price {:.2} above upper band {:.2}", price, upper),
            ))
        } else if price < lower {
            Some(Signal::buy(
                "Lower Breach",
                SignalStrength::Medium,
                format!("Price {:.2} below lower band {:.2}", price, lower),
            ))
        } else {
            None
        }
    }
}

/// Evaluates the rules with default thresholds.
pub fn generate_signals(series: &Series, bundle: &IndicatorBundle) -> Vec<Signal> {
    SignalGenerator::default().generate_signals(series, bundle)
}

fn last_value(points: &[IndicatorPoint]) -> Option<f64> {
    points.last().and_then(|p| p.value)
}

/// Readings at the most recent bar, aligned across all indicators.
pub fn latest_values(series: &Series, bundle: &IndicatorBundle) -> LatestValues {
    let macd = bundle.macd.last();
    let bollinger = bundle.bollinger.last();

    LatestValues {
        price: series.last().map(|b| b.close).filter(|c| c.is_finite()),
        sma20: last_value(&bundle.sma20),
        sma50: last_value(&bundle.sma50),
        rsi: last_value(&bundle.rsi),
        macd: macd.and_then(|m| m.macd),
        macd_signal: macd.and_then(|m| m.signal),
        macd_histogram: macd.and_then(|m| m.histogram),
        bollinger_upper: bollinger.and_then(|b| b.upper),
        bollinger_lower: bollinger.and_then(|b| b.lower),
    }
}
