//! The ask box: free-text queries answered by the converter or calculator.

use std::collections::VecDeque;

use crate::calculator::{evaluate, format};
use crate::convert::parse_conversion;

/// Answer given when a query is neither a conversion nor an expression.
pub const HELP_MESSAGE: &str =
    "I can solve math expressions or convert units like: convert 12 cm to m.";

/// Answer a free-text query. Never fails; unanswerable queries get the
/// help message.
pub fn solve(query: &str) -> String {
    let trimmed = query.trim();

    if let Some(conversion) = parse_conversion(trimmed) {
        return conversion;
    }

    match evaluate(trimmed) {
        Ok(value) => format!("{trimmed} = {}", format(value)),
        Err(err) => {
            tracing::debug!(query = %trimmed, error = %err, "query not understood");
            HELP_MESSAGE.to_string()
        }
    }
}

/// Who a chat entry came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    User,
    Answer,
}

/// One chat entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    pub speaker: Speaker,
    pub text: String,
}

/// Chat history of the ask box, oldest first.
#[derive(Clone, Debug)]
pub struct Transcript {
    bubbles: VecDeque<Bubble>,
    limit: usize,
}

impl Transcript {
    /// A transcript keeping at most `limit` bubbles.
    pub fn new(limit: usize) -> Self {
        Self {
            bubbles: VecDeque::new(),
            limit: limit.max(2),
        }
    }

    /// Record a query and its answer. Blank queries are ignored.
    ///
    /// Returns the answer when one was produced.
    pub fn ask(&mut self, query: &str) -> Option<&Bubble> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let answer = solve(query);
        self.push(Speaker::User, query.to_string());
        self.push(Speaker::Answer, answer);
        self.bubbles.back()
    }

    fn push(&mut self, speaker: Speaker, text: String) {
        self.bubbles.push_back(Bubble { speaker, text });
        while self.bubbles.len() > self.limit {
            self.bubbles.pop_front();
        }
    }

    /// Bubbles in the order they were added.
    pub fn bubbles(&self) -> impl Iterator<Item = &Bubble> {
        self.bubbles.iter()
    }

    /// Number of bubbles currently kept.
    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    /// Whether nothing has been asked yet.
    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }
}
