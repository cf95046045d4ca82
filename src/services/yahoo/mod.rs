pub mod provider;
pub mod response;

pub use provider::{yahoo_range, YahooProvider, YAHOO_SOURCE};
