//! Signal evaluation interfaces.

pub mod aggregation;
pub mod signal_generator;

pub use aggregation::*;
pub use signal_generator::*;
