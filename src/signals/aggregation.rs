//! Overall sentiment from a list of signals

use crate::models::signal::{Sentiment, Signal, SignalDirection};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalTally {
    pub buy: usize,
    pub sell: usize,
}

impl SignalTally {
    pub fn from_signals(signals: &[Signal]) -> Self {
        signals.iter().fold(Self::default(), |mut tally, signal| {
            match signal.direction {
                SignalDirection::Buy => tally.buy += 1,
                SignalDirection::Sell => tally.sell += 1,
            }
            tally
        })
    }

    pub fn sentiment(&self) -> Sentiment {
        match self.buy.cmp(&self.sell) {
            std::cmp::Ordering::Greater => Sentiment::Bullish,
            std::cmp::Ordering::Less => Sentiment::Bearish,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

/// Majority vote of BUY vs SELL; ties are neutral.
pub fn sentiment(signals: &[Signal]) -> Sentiment {
    SignalTally::from_signals(signals).sentiment()
}
