//! Shared data models spanning the engine layers.

pub mod analysis;
pub mod indicators;
pub mod series;
pub mod signal;

pub use analysis::{Analysis, Comparison, Quote};
pub use indicators::{
    BollingerPoint, IndicatorBundle, IndicatorOutput, IndicatorPoint, LatestValues, MacdPoint,
    StochasticPoint,
};
pub use series::{Bar, Series, TimeRange};
pub use signal::{Sentiment, Signal, SignalDirection, SignalStrength};
