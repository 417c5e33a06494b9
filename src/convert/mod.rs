//! Unit conversion for the ask box.

mod query;
mod units;

pub use query::{ConversionQuery, parse_conversion};
pub use units::{Dimension, Unit, convert, find_unit, units};
