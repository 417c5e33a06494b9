//! Keys that drive a calculator session.

/// One input to the line editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// Text appended to the expression (digit, operator or identifier).
    Token(String),
    /// Remove the last character.
    Delete,
    /// Evaluate and replace the expression with the result.
    Commit,
    /// Clear the expression, keep the last result.
    ClearLine,
    /// Clear the expression and the last result.
    AllClear,
}

impl Key {
    pub fn token(text: impl Into<String>) -> Self {
        Self::Token(text.into())
    }

    /// Key for a keypad action name (`del`, `equals`, `clear`, `ac`).
    pub fn from_action(action: &str) -> Option<Self> {
        match action {
            "del" => Some(Self::Delete),
            "equals" => Some(Self::Commit),
            "clear" => Some(Self::ClearLine),
            "ac" => Some(Self::AllClear),
            _ => None,
        }
    }

    /// Key for a function or constant chip, which appends its name.
    pub fn chip(name: &str) -> Self {
        Self::token(name)
    }

    /// Key for a keyboard key name as reported by the UI layer.
    ///
    /// Single digits and operator characters append, `Enter` commits,
    /// `Backspace` deletes and `Escape` clears the line. Everything else is
    /// ignored.
    pub fn from_keyboard(name: &str) -> Option<Self> {
        match name {
            "Enter" => return Some(Self::Commit),
            "Backspace" => return Some(Self::Delete),
            "Escape" => return Some(Self::ClearLine),
            _ => {}
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() || "+-*/().%".contains(c) => {
                Some(Self::token(c.to_string()))
            }
            _ => None,
        }
    }
}
