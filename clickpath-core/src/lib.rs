pub mod aggregate;
pub mod cli;
pub mod conf;
pub mod correlate;
pub mod error;
pub mod filter;
pub mod logging;
pub mod path;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod source;

#[cfg(test)]
mod test_utils;

pub use error::RunError;
pub use record::{LogRecord, parse_line};
