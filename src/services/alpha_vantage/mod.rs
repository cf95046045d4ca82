pub mod provider;
pub mod response;

pub use provider::{output_size, AlphaVantageProvider, ALPHA_VANTAGE_SOURCE};
