use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalDirection::Buy => f.write_str("BUY"),
            SignalDirection::Sell => f.write_str("SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalStrength {
    Weak,
    Medium,
    Strong,
}

/// A discrete trading inference. Produced fresh per analysis, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub direction: SignalDirection,
    pub name: String,
    pub strength: SignalStrength,
    pub rationale: String,
}

impl Signal {
    pub fn buy(name: &str, strength: SignalStrength, rationale: String) -> Self {
        Self {
            direction: SignalDirection::Buy,
            name: name.to_string(),
            strength,
            rationale,
        }
    }

    pub fn sell(name: &str, strength: SignalStrength, rationale: String) -> Self {
        Self {
            direction: SignalDirection::Sell,
            name: name.to_string(),
            strength,
            rationale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}
