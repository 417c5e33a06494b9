//! The fixed table of linear units.

use std::fmt;

/// Physical quantity a unit measures. Used for listing only, conversions
/// do not check it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Mass,
    Volume,
}

impl Dimension {
    /// Name of the base unit factors are relative to.
    pub fn base_unit(&self) -> &'static str {
        match self {
            Self::Length => "m",
            Self::Mass => "kg",
            Self::Volume => "l",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Volume => "volume",
        };
        f.pad(name)
    }
}

/// A unit symbol and its scale relative to the base unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Unit {
    pub symbol: &'static str,
    pub factor: f64,
    pub dimension: Dimension,
}

const fn unit(symbol: &'static str, factor: f64, dimension: Dimension) -> Unit {
    Unit {
        symbol,
        factor,
        dimension,
    }
}

static UNITS: &[Unit] = &[
    unit("mm", 0.001, Dimension::Length),
    unit("cm", 0.01, Dimension::Length),
    unit("m", 1.0, Dimension::Length),
    unit("km", 1000.0, Dimension::Length),
    unit("in", 0.0254, Dimension::Length),
    unit("ft", 0.3048, Dimension::Length),
    unit("yd", 0.9144, Dimension::Length),
    unit("mi", 1609.344, Dimension::Length),
    unit("g", 0.001, Dimension::Mass),
    unit("kg", 1.0, Dimension::Mass),
    unit("oz", 0.028349523125, Dimension::Mass),
    unit("lb", 0.45359237, Dimension::Mass),
    unit("ml", 0.001, Dimension::Volume),
    unit("l", 1.0, Dimension::Volume),
];

/// All known units, in table order.
pub fn units() -> impl Iterator<Item = &'static Unit> {
    UNITS.iter()
}

/// Look up a unit by its lowercase symbol.
pub fn find_unit(symbol: &str) -> Option<&'static Unit> {
    UNITS.iter().find(|unit| unit.symbol == symbol)
}

/// Convert `value` between two symbols through the shared base unit.
///
/// Units of different dimensions still convert; the factors are simply
/// multiplied through.
pub fn convert(value: f64, from: &str, to: &str) -> Option<f64> {
    let from = find_unit(from)?;
    let to = find_unit(to)?;
    Some(value * from.factor / to.factor)
}
