//! Input normalization and the character gate in front of the evaluator.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::CalcError;

/// Token the `^` shorthand is rewritten to.
pub const POWER_TOKEN: &str = "**";

lazy_static! {
    /// Characters the evaluator will look at. Anything else is rejected
    /// before tokenizing.
    static ref ALLOWED_CHARS: Regex = Regex::new(
        r"^[0-9+\-*/().,%\s^a-zA-Z]+$"
    ).unwrap();
}

/// Rewrite user-facing notation into evaluator tokens.
///
/// `^` becomes the power operator and the `π` glyph becomes `pi`.
pub fn normalize(raw: &str) -> String {
    raw.replace('^', POWER_TOKEN).replace('π', "pi")
}

/// Reject input containing characters outside the allow-list.
pub fn validate(text: &str) -> Result<(), CalcError> {
    if text.trim().is_empty() {
        return Err(CalcError::Empty);
    }
    if !ALLOWED_CHARS.is_match(text) {
        return Err(CalcError::InvalidCharacters);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_rewrites_power_and_pi() {
        assert_eq!(normalize("2^10"), "2**10");
        assert_eq!(normalize("π/2"), "pi/2");
        assert_eq!(normalize("2^π^2"), "2**pi**2");
        assert_eq!(normalize("1+1"), "1+1");
    }

    #[test]
    fn test_validate_accepts_calculator_alphabet() {
        assert!(validate("2 + 3 * (4 - 1) / 5 % 2").is_ok());
        assert!(validate("pow(2, 3)").is_ok());
        assert!(validate("2**3").is_ok());
        assert!(validate("+*1").is_ok());
    }

    #[test]
    fn test_validate_rejects_escape_characters() {
        assert_eq!(validate("1;2"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate("a[0]"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate("x = 1"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate("`1`"), Err(CalcError::InvalidCharacters));
        assert_eq!(validate("π"), Err(CalcError::InvalidCharacters));
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert_eq!(validate(""), Err(CalcError::Empty));
        assert_eq!(validate("   "), Err(CalcError::Empty));
    }
}
