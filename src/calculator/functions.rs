//! The fixed table of identifiers an expression may refer to.

/// A resolvable identifier.
#[derive(Clone, Copy, Debug)]
pub enum Symbol {
    Constant(f64),
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

/// Every name in the function table, in table order.
pub const FUNCTION_NAMES: &[&str] = &[
    "sin", "cos", "tan", "asin", "acos", "atan", "sqrt", "abs", "log", "ln", "pow", "pi", "e",
];

/// Resolve an identifier against the function table.
///
/// Lookup is case-sensitive: `Sin` is not `sin`.
pub fn lookup(name: &str) -> Option<Symbol> {
    let symbol = match name {
        "sin" => Symbol::Unary(f64::sin),
        "cos" => Symbol::Unary(f64::cos),
        "tan" => Symbol::Unary(f64::tan),
        "asin" => Symbol::Unary(f64::asin),
        "acos" => Symbol::Unary(f64::acos),
        "atan" => Symbol::Unary(f64::atan),
        "sqrt" => Symbol::Unary(f64::sqrt),
        "abs" => Symbol::Unary(f64::abs),
        "log" => Symbol::Unary(f64::log10),
        "ln" => Symbol::Unary(f64::ln),
        "pow" => Symbol::Binary(pow),
        "pi" => Symbol::Constant(std::f64::consts::PI),
        "e" => Symbol::Constant(std::f64::consts::E),
        _ => return None,
    };
    Some(symbol)
}

/// `base` raised to `exponent`.
///
/// Unlike `f64::powf`, a NaN exponent always gives NaN and `±1` raised to
/// an infinite exponent is NaN rather than 1.
pub fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.is_nan() || (exponent.is_infinite() && base.abs() == 1.0) {
        return f64::NAN;
    }
    base.powf(exponent)
}
