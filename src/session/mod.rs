//! Line editor and live preview for the calculator keypad.
//!
//! A [`Session`] owns the in-progress expression and the last finite
//! result. Every edit re-evaluates the expression for a live preview.

mod key;

pub use key::Key;

use crate::calculator::{ERROR_TEXT, evaluate, format};

/// Shown in the result line while the expression does not evaluate.
pub const PREVIEW_PLACEHOLDER: &str = "…";

/// What the two display lines currently show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Display {
    pub expression: String,
    pub result: String,
}

/// Keypad state: the expression being edited and the last finite result.
#[derive(Clone, Debug)]
pub struct Session {
    expression: String,
    last_result: String,
    result_line: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty session showing `0` on both lines.
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            last_result: "0".to_string(),
            result_line: "0".to_string(),
        }
    }

    /// The raw expression text (empty when nothing is entered).
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Formatted value of the most recent finite evaluation.
    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    /// Current contents of the expression and result lines.
    pub fn display(&self) -> Display {
        Display {
            expression: self.expression_line(),
            result: self.result_line.clone(),
        }
    }

    fn expression_line(&self) -> String {
        if self.expression.is_empty() {
            "0".to_string()
        } else {
            self.expression.clone()
        }
    }

    /// Apply one key.
    pub fn press(&mut self, key: &Key) {
        match key {
            Key::Token(token) => self.append(token),
            Key::Delete => self.delete_last(),
            Key::Commit => self.commit(),
            Key::ClearLine => self.clear_line(),
            Key::AllClear => self.all_clear(),
        }
    }

    /// Append a token. A lone `"0"` is replaced by a token with a digit.
    pub fn append(&mut self, token: &str) {
        if self.expression == "0" && token.chars().any(|c| c.is_ascii_digit()) {
            self.expression.clear();
        }
        self.expression.push_str(token);
        self.preview();
    }

    /// Remove the last character of the expression.
    pub fn delete_last(&mut self) {
        self.expression.pop();
        self.preview();
    }

    /// Clear the expression; the last result survives.
    pub fn clear_line(&mut self) {
        self.expression.clear();
        self.preview();
    }

    /// Reset the expression and the last result.
    pub fn all_clear(&mut self) {
        self.expression.clear();
        self.last_result = "0".to_string();
        self.result_line = "0".to_string();
    }

    /// Evaluate the expression and replace it with the result.
    ///
    /// On failure the expression is kept and the result line shows
    /// `"Error"`.
    pub fn commit(&mut self) {
        if self.expression.is_empty() {
            return;
        }
        match evaluate(&self.expression) {
            Ok(value) => {
                let formatted = format(value);
                self.expression = formatted.clone();
                self.last_result = formatted.clone();
                self.result_line = formatted;
            }
            Err(err) => {
                tracing::debug!(expression = %self.expression, error = %err, "commit failed");
                self.result_line = ERROR_TEXT.to_string();
            }
        }
    }

    /// Speculatively evaluate the expression for the result line.
    pub fn preview(&mut self) {
        if self.expression.is_empty() {
            self.result_line = "0".to_string();
            return;
        }
        match evaluate(&self.expression) {
            Ok(value) => {
                let formatted = format(value);
                self.last_result = formatted.clone();
                self.result_line = formatted;
            }
            Err(err) => {
                tracing::trace!(expression = %self.expression, error = %err, "preview unavailable");
                self.result_line = PREVIEW_PLACEHOLDER.to_string();
            }
        }
    }
}
