//! Volatility indicators: band width and true range

pub mod atr;
pub mod bollinger;

pub use atr::*;
pub use bollinger::*;
