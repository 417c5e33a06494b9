//! Recognizing "convert X unit to unit" sentences.

use lazy_static::lazy_static;
use regex::Regex;

use super::units::convert;
use crate::calculator::{format, shortest_decimal};

lazy_static! {
    /// `convert <number> <unit> (to|in) <unit>`, anywhere in the text.
    static ref CONVERSION: Regex = Regex::new(
        r"(?i)convert\s+([0-9]+(?:\.[0-9]*)?|\.[0-9]+)\s*([a-z0-9_]+)\s+(?:to|in)\s+([a-z0-9_]+)"
    ).unwrap();
}

/// The parts of a conversion request.
#[derive(Clone, Debug, PartialEq)]
pub struct ConversionQuery {
    pub value: f64,
    /// Lowercased source symbol.
    pub from: String,
    /// Lowercased destination symbol.
    pub to: String,
}

impl ConversionQuery {
    /// Extract a conversion request from free text.
    ///
    /// Only the sentence shape is checked here; the unit symbols may still
    /// be unknown.
    pub fn parse(text: &str) -> Option<Self> {
        let captures = CONVERSION.captures(text)?;
        let value = captures.get(1)?.as_str().parse::<f64>().ok()?;
        let from = captures.get(2)?.as_str().to_lowercase();
        let to = captures.get(3)?.as_str().to_lowercase();

        Some(Self { value, from, to })
    }

    /// Converted value, if both symbols are in the unit table.
    pub fn result(&self) -> Option<f64> {
        convert(self.value, &self.from, &self.to)
    }

    /// Answer line in the form `"12 cm = 0.12 m"`.
    pub fn answer(&self) -> Option<String> {
        let Some(result) = self.result() else {
            tracing::debug!(from = %self.from, to = %self.to, "unknown unit in conversion");
            return None;
        };
        Some(format!(
            "{} {} = {} {}",
            shortest_decimal(self.value),
            self.from,
            format(result),
            self.to
        ))
    }
}

/// Answer a conversion sentence, or `None` if the text is not one.
pub fn parse_conversion(text: &str) -> Option<String> {
    ConversionQuery::parse(text)?.answer()
}
