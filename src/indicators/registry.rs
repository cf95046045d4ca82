//! Indicator registry: the finite set of supported indicators, the name
//! table callers use to select them, and dispatch to the pure functions.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::indicators::error::IndicatorError;
use crate::indicators::momentum::{calculate_macd_default, calculate_rsi_default, calculate_stochastic_default};
use crate::indicators::trend::{calculate_ema, calculate_sma};
use crate::indicators::volatility::{calculate_atr_default, calculate_bollinger_bands_default};
use crate::models::indicators::{IndicatorBundle, IndicatorOutput};
use crate::models::series::Series;

/// Indicator category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndicatorCategory {
    Momentum,
    Trend,
    Volatility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma20,
    Sma50,
    Ema12,
    Ema26,
    Rsi,
    Macd,
    Bollinger,
    Stochastic,
    Atr,
}

/// Accepted request names, matched case-insensitively.
const NAME_TABLE: &[(&str, IndicatorKind)] = &[
    ("sma", IndicatorKind::Sma20),
    ("sma20", IndicatorKind::Sma20),
    ("sma50", IndicatorKind::Sma50),
    ("ema", IndicatorKind::Ema12),
    ("ema12", IndicatorKind::Ema12),
    ("ema26", IndicatorKind::Ema26),
    ("macd", IndicatorKind::Macd),
    ("rsi", IndicatorKind::Rsi),
    ("bollinger", IndicatorKind::Bollinger),
    ("bb", IndicatorKind::Bollinger),
    ("stochastic", IndicatorKind::Stochastic),
    ("atr", IndicatorKind::Atr),
];

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 9] = [
        IndicatorKind::Sma20,
        IndicatorKind::Sma50,
        IndicatorKind::Ema12,
        IndicatorKind::Ema26,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::Bollinger,
        IndicatorKind::Stochastic,
        IndicatorKind::Atr,
    ];

    /// Canonical name, also used in cache keys.
    pub fn name(&self) -> &'static str {
        match self {
            IndicatorKind::Sma20 => "sma20",
            IndicatorKind::Sma50 => "sma50",
            IndicatorKind::Ema12 => "ema12",
            IndicatorKind::Ema26 => "ema26",
            IndicatorKind::Rsi => "rsi",
            IndicatorKind::Macd => "macd",
            IndicatorKind::Bollinger => "bollinger",
            IndicatorKind::Stochastic => "stochastic",
            IndicatorKind::Atr => "atr",
        }
    }

    pub fn aliases(&self) -> Vec<&'static str> {
        NAME_TABLE
            .iter()
            .filter(|(_, kind)| kind == self)
            .map(|(name, _)| *name)
            .collect()
    }

    pub fn category(&self) -> IndicatorCategory {
        match self {
            IndicatorKind::Sma20 | IndicatorKind::Sma50 | IndicatorKind::Ema12 | IndicatorKind::Ema26 => {
                IndicatorCategory::Trend
            }
            IndicatorKind::Rsi | IndicatorKind::Macd | IndicatorKind::Stochastic => IndicatorCategory::Momentum,
            IndicatorKind::Bollinger | IndicatorKind::Atr => IndicatorCategory::Volatility,
        }
    }

    pub fn compute(&self, series: &Series) -> Result<IndicatorOutput, IndicatorError> {
        let output = match self {
            IndicatorKind::Sma20 => IndicatorOutput::Line(calculate_sma(series, 20)?),
            IndicatorKind::Sma50 => IndicatorOutput::Line(calculate_sma(series, 50)?),
            IndicatorKind::Ema12 => IndicatorOutput::Line(calculate_ema(series, 12)?),
            IndicatorKind::Ema26 => IndicatorOutput::Line(calculate_ema(series, 26)?),
            IndicatorKind::Rsi => IndicatorOutput::Line(calculate_rsi_default(series)?),
            IndicatorKind::Macd => IndicatorOutput::Macd(calculate_macd_default(series)?),
            IndicatorKind::Bollinger => IndicatorOutput::Bollinger(calculate_bollinger_bands_default(series)?),
            IndicatorKind::Stochastic => IndicatorOutput::Stochastic(calculate_stochastic_default(series)?),
            IndicatorKind::Atr => IndicatorOutput::Line(calculate_atr_default(series)?),
        };
        Ok(output)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        NAME_TABLE
            .iter()
            .find(|(name, _)| *name == normalized)
            .map(|(_, kind)| *kind)
            .ok_or_else(|| IndicatorError::Unsupported(s.to_string()))
    }
}

impl IndicatorBundle {
    /// Computes every indicator. The members are independent of each other.
    pub fn compute(series: &Series) -> Result<Self, IndicatorError> {
        Ok(Self {
            sma20: calculate_sma(series, 20)?,
            sma50: calculate_sma(series, 50)?,
            ema12: calculate_ema(series, 12)?,
            ema26: calculate_ema(series, 26)?,
            rsi: calculate_rsi_default(series)?,
            macd: calculate_macd_default(series)?,
            bollinger: calculate_bollinger_bands_default(series)?,
            stochastic: calculate_stochastic_default(series)?,
            atr: calculate_atr_default(series)?,
        })
    }
}
