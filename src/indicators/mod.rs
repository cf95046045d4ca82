pub mod error;
pub mod registry;
pub mod validation;

pub mod momentum;
pub mod trend;
pub mod volatility;

pub use error::IndicatorError;
pub use registry::*;

use crate::models::indicators::IndicatorPoint;
use crate::models::series::Series;

/// Pairs single-valued readings with their bar's date and close.
pub(crate) fn zip_line(series: &Series, values: Vec<Option<f64>>) -> Vec<IndicatorPoint> {
    series
        .bars()
        .iter()
        .zip(values)
        .map(|(bar, value)| IndicatorPoint {
            date: bar.date,
            value,
            price: bar.close,
        })
        .collect()
}
