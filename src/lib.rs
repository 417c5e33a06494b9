//! A calculator core with a natural-language ask box.
//!
//! The four entry points are [`evaluate`], [`format`], [`parse_conversion`]
//! and [`solve`]. [`Session`] drives a keypad with live preview.

pub mod ask;
pub mod calculator;
pub mod config;
pub mod convert;
pub mod session;

pub use ask::{HELP_MESSAGE, Transcript, solve};
pub use calculator::{CalcError, evaluate, format};
pub use config::Config;
pub use convert::parse_conversion;
pub use session::{Key, Session};
