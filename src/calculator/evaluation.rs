//! Expression evaluation.
//!
//! Normalizes and gates the raw input, parses it and walks the tree with
//! the function table as the only scope.

use serde::Serialize;

use super::error::CalcError;
use super::format::format;
use super::functions::{Symbol, lookup, pow};
use super::normalize::{normalize, validate};
use super::parser::{BinOp, Expr, parse};

/// Outcome of evaluating a calculator expression, ready for display.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CalcResult {
    /// Successful calculation with a finite result.
    Success {
        /// The expression as entered.
        expression: String,
        /// The numeric value.
        value: f64,
        /// The formatted value.
        display: String,
    },
    /// The expression could not be evaluated.
    Error {
        /// The expression as entered.
        expression: String,
        /// Why evaluation failed.
        message: String,
    },
}

impl CalcResult {
    /// Get the expression that was evaluated.
    pub fn expression(&self) -> &str {
        match self {
            Self::Success { expression, .. } => expression,
            Self::Error { expression, .. } => expression,
        }
    }

    /// Check if this is a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Get the display string (result or error message).
    pub fn display(&self) -> &str {
        match self {
            Self::Success { display, .. } => display,
            Self::Error { message, .. } => message,
        }
    }
}

/// Evaluate a raw calculator expression to a finite number.
pub fn evaluate(raw: &str) -> Result<f64, CalcError> {
    let normalized = normalize(raw);
    validate(&normalized)?;

    let tree = parse(&normalized)?;
    let value = eval(&tree)?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite)
    }
}

/// Evaluate and package the outcome for display.
pub fn evaluate_expression(input: &str) -> CalcResult {
    let expression = input.trim().to_string();

    match evaluate(&expression) {
        Ok(value) => CalcResult::Success {
            display: format(value),
            expression,
            value,
        },
        Err(err) => {
            tracing::debug!(%expression, error = %err, "evaluation failed");
            CalcResult::Error {
                expression,
                message: err.to_string(),
            }
        }
    }
}

fn eval(expr: &Expr) -> Result<f64, CalcError> {
    match expr {
        Expr::Num(num) => Ok(*num),
        Expr::Neg(inner) => Ok(-eval(inner)?),
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs)?;
            let rhs = eval(rhs)?;
            Ok(match op {
                BinOp::Add => lhs + rhs,
                BinOp::Sub => lhs - rhs,
                BinOp::Mul => lhs * rhs,
                BinOp::Div => lhs / rhs,
                BinOp::Rem => lhs % rhs,
                BinOp::Pow => pow(lhs, rhs),
            })
        }
        Expr::Ident(name) => match lookup(name) {
            Some(Symbol::Constant(value)) => Ok(value),
            Some(_) => Err(CalcError::FunctionNotCalled(name.clone())),
            None => Err(CalcError::UndefinedIdentifier(name.clone())),
        },
        Expr::Call { name, args } => {
            let symbol = lookup(name).ok_or_else(|| CalcError::UndefinedIdentifier(name.clone()))?;
            if let Symbol::Constant(_) = symbol {
                return Err(CalcError::NotAFunction(name.clone()));
            }

            // Every argument is evaluated; missing ones read as NaN and
            // extras are ignored.
            let values = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            let arg = |i: usize| values.get(i).copied().unwrap_or(f64::NAN);
            Ok(match symbol {
                Symbol::Unary(f) => f(arg(0)),
                Symbol::Binary(f) => f(arg(0), arg(1)),
                Symbol::Constant(value) => value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_basic_evaluation() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("10%3"), Ok(1.0));
        assert_eq!(evaluate("-7%3"), Ok(-1.0));
        assert_eq!(evaluate("  8 / 2 / 2 "), Ok(2.0));
    }

    #[test]
    fn test_power_shorthand() {
        assert_eq!(evaluate("2^10"), Ok(1024.0));
        assert_eq!(evaluate("2**10"), Ok(1024.0));
        assert_eq!(evaluate("2^3^2"), Ok(512.0));
        assert_eq!(evaluate("2^-1"), Ok(0.5));
    }

    #[test]
    fn test_functions_and_constants() {
        assert!(close(evaluate("sin(pi/2)").unwrap(), 1.0));
        assert!(close(evaluate("cos(0)").unwrap(), 1.0));
        assert!(close(evaluate("sqrt(16)").unwrap(), 4.0));
        assert!(close(evaluate("log(100)").unwrap(), 2.0));
        assert!(close(evaluate("ln(e)").unwrap(), 1.0));
        assert!(close(evaluate("pow(2, 8)").unwrap(), 256.0));
        assert!(close(evaluate("abs(-3.5)").unwrap(), 3.5));
        assert!(close(evaluate("2*π").unwrap(), std::f64::consts::TAU));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(evaluate("1;2"), Err(CalcError::InvalidCharacters));
        assert_eq!(evaluate("alert`1`"), Err(CalcError::InvalidCharacters));
    }

    #[test]
    fn test_unknown_identifiers() {
        assert_eq!(
            evaluate("foo + 1"),
            Err(CalcError::UndefinedIdentifier("foo".to_string()))
        );
        assert!(evaluate("foo bar").is_err());
        assert_eq!(
            evaluate("exp(1)"),
            Err(CalcError::UndefinedIdentifier("exp".to_string()))
        );
    }

    #[test]
    fn test_call_shape_errors() {
        assert_eq!(
            evaluate("pi(2)"),
            Err(CalcError::NotAFunction("pi".to_string()))
        );
        assert_eq!(
            evaluate("sin"),
            Err(CalcError::FunctionNotCalled("sin".to_string()))
        );
    }

    #[test]
    fn test_call_arguments_are_lenient() {
        assert!(close(evaluate("sin(1,2)").unwrap(), 1f64.sin()));
        assert_eq!(evaluate("pow(2,3,)"), Ok(8.0));
        assert_eq!(evaluate("pow(2)"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("pow(1)"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("sin()"), Err(CalcError::NonFinite));
        assert_eq!(
            evaluate("sin(1, foo)"),
            Err(CalcError::UndefinedIdentifier("foo".to_string()))
        );
    }

    #[test]
    fn test_rejected_sign_and_literal_shapes() {
        for input in ["-2^2", "--5", "2--3", "2++3", "012", "08"] {
            assert!(evaluate(input).is_err(), "{input}");
        }
        assert_eq!(evaluate("(-2)^2"), Ok(4.0));
        assert_eq!(evaluate("-(2^2)"), Ok(-4.0));
        assert_eq!(evaluate("2- -3"), Ok(5.0));
        assert_eq!(evaluate("2+-3"), Ok(-1.0));
        assert_eq!(evaluate("0x10 + 0b1"), Ok(17.0));
    }

    #[test]
    fn test_non_finite_results_fail() {
        assert_eq!(evaluate("1/0"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("0/0"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("sqrt(-1)"), Err(CalcError::NonFinite));
        assert_eq!(evaluate("10^400"), Err(CalcError::NonFinite));
    }

    #[test]
    fn test_evaluate_expression_result() {
        let result = evaluate_expression(" 0.1 + 0.2 ");
        assert!(result.is_success());
        assert_eq!(result.expression(), "0.1 + 0.2");
        assert_eq!(result.display(), "0.3");

        let result = evaluate_expression("2 +* 2");
        assert!(!result.is_success());
        assert_eq!(result.display(), "Unexpected '*' at position 3");
    }
}
