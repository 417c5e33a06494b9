//! Number formatting for calculator output.

/// Decimal places results are rounded to before display.
pub const DECIMAL_PLACES: i32 = 10;

/// Text shown in place of a non-finite value.
pub const ERROR_TEXT: &str = "Error";

/// Magnitude past which every f64 is already an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Format a value for display.
///
/// Rounds to ten decimals to hide floating-point noise (`0.1 + 0.2`
/// shows `0.3`), then prints the shortest decimal that reads back as the
/// rounded value. Non-finite values print as `"Error"`.
pub fn format(value: f64) -> String {
    if !value.is_finite() {
        return ERROR_TEXT.to_string();
    }
    shortest_decimal(round_decimals(value, DECIMAL_PLACES))
}

/// Round to `places` decimals, halves toward positive infinity.
pub fn round_decimals(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    let floor = scaled.floor();
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / scale
}

/// Shortest round-trippable rendering of a finite value.
///
/// Plain notation is used while the decimal exponent stays within
/// `1e-7 < |v| < 1e21`; outside that range the value is written as
/// `d.ddde+x`. Negative zero prints as `"0"`.
pub fn shortest_decimal(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value < 0.0 {
        return format!("-{}", shortest_decimal(-value));
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. "1.25e-3".
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    let n = exponent + 1;

    if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let sign = if n - 1 >= 0 { '+' } else { '-' };
        let magnitude = (n - 1).abs();
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{magnitude}")
        } else {
            format!("{first}.{rest}e{sign}{magnitude}")
        }
    }
}

/// Add thousands separators to the integer part of a formatted value.
///
/// Display only: the grouped text is not valid calculator input.
/// Exponential output is returned unchanged.
pub fn group_thousands(formatted: &str) -> String {
    if formatted.contains('e') || formatted == ERROR_TEXT {
        return formatted.to_string();
    }

    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let int_grouped: String = grouped.chars().rev().collect();
    format!("{sign}{int_grouped}{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format(14.0), "14");
        assert_eq!(format(1024.0), "1024");
        assert_eq!(format(-3.0), "-3");
        assert_eq!(format(-0.0), "0");
    }

    #[test]
    fn test_floating_noise_is_hidden() {
        assert_eq!(format(0.1 + 0.2), "0.3");
        assert_eq!(format(12.0 * 0.01), "0.12");
        assert_eq!(format(1.0 / 3.0), "0.3333333333");
        assert_eq!(format(2.0 / 3.0), "0.6666666667");
    }

    #[test]
    fn test_tiny_values_round_away() {
        assert_eq!(format(1e-11), "0");
        assert_eq!(format(1e-10), "1e-10");
        assert_eq!(format(0.000001), "0.000001");
        assert_eq!(format(0.0000005), "5e-7");
    }

    #[test]
    fn test_large_values() {
        assert_eq!(format(1e20), "100000000000000000000");
        assert_eq!(format(1e21), "1e+21");
        assert_eq!(format(1.5e300), "1.5e+300");
        assert_eq!(format(123456789012.5), "123456789012.5");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format(f64::NAN), "Error");
        assert_eq!(format(f64::INFINITY), "Error");
        assert_eq!(format(f64::NEG_INFINITY), "Error");
    }

    #[test]
    fn test_halves_round_up() {
        assert_eq!(round_decimals(0.5, 0), 1.0);
        assert_eq!(round_decimals(-2.5, 0), -2.0);
        assert_eq!(round_decimals(2.4, 0), 2.0);
    }

    #[test]
    fn test_format_is_idempotent() {
        for value in [
            0.1 + 0.2,
            1.0 / 3.0,
            -7.123456789051,
            std::f64::consts::PI,
            1e-10,
            6.02e23,
            -1e-9,
        ] {
            let once = format(value);
            let reparsed: f64 = once.parse().unwrap();
            assert_eq!(format(reparsed), once, "value {value}");
        }
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1000000"), "1,000,000");
        assert_eq!(group_thousands("-1234.5678"), "-1,234.5678");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1e+21"), "1e+21");
        assert_eq!(group_thousands("Error"), "Error");
    }
}
