//! Errors raised while evaluating a calculator expression.

/// Every way an expression can fail to produce a finite number.
///
/// All variants are the same user-facing kind (an invalid expression);
/// the split exists so callers can log what went wrong.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("Empty expression")]
    Empty,

    #[error("Invalid characters")]
    InvalidCharacters,

    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("Malformed number '{literal}'")]
    MalformedNumber { literal: String },

    #[error("Unexpected {found} at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("Unexpected end of expression")]
    UnexpectedEnd,

    #[error("'{0}' is not defined")]
    UndefinedIdentifier(String),

    #[error("'{0}' is not a function")]
    NotAFunction(String),

    #[error("'{0}' is a function and must be called")]
    FunctionNotCalled(String),

    #[error("Result is not a finite number")]
    NonFinite,
}
