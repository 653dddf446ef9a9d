//! Access log records.
//!
//! One line of the access log becomes one [`LogRecord`], or nothing at all.
//! The grammar is a single anchored regular expression; see [`parse`] for the
//! exact shape it accepts.

mod error;
mod parse;
mod types;

pub use error::ParseError;
pub use parse::{TIMESTAMP_FORMAT, parse_line};
pub use types::LogRecord;
