pub mod alpha_vantage;
pub mod chain;
pub mod error;
pub mod market_data;
pub mod synthetic;
pub mod yahoo;

pub use chain::ProviderChain;
pub use error::ProviderError;
pub use market_data::MarketDataProvider;
pub use synthetic::SyntheticProvider;
