//! Calculator module for evaluating mathematical expressions.
//!
//! This module provides functionality to:
//! - Normalize and gate raw input
//! - Parse and evaluate expressions against a fixed function table
//! - Format results for display

mod error;
mod evaluation;
mod format;
mod functions;
mod lexer;
mod normalize;
mod parser;

pub use error::CalcError;
pub use evaluation::{CalcResult, evaluate, evaluate_expression};
pub use format::{ERROR_TEXT, format, group_thousands, round_decimals, shortest_decimal};
pub use functions::FUNCTION_NAMES;
pub use normalize::{POWER_TOKEN, normalize, validate};
