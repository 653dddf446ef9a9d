use crate::record::{LogRecord, ParseError};
use chrono::DateTime;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::str::FromStr;

/// `16/Jan/2024:10:00:00 +0000`
pub const TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

// <addr> - - [<ts>] <status> "<method> <path> HTTP/x.y" <size> "<referrer>" "<agent>"
static LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?P<ip>[\d\.:a-fA-F]+)\s+-\s+-\s+\[(?P<timestamp>.+?)\]\s+(?P<status>\d+)\s+"(?P<method>\w+)\s+(?P<path>.+?)\s+HTTP/\d\.\d"\s+(?P<size>\d+)\s+".+?"\s+"(?P<user_agent>.*?)""#,
    )
    .expect("access log pattern must compile")
});

/// Parses one access log line, dropping it silently when it does not fit.
///
/// Use [`LogRecord::from_str`] when the reason for a rejection matters.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    line.parse().ok()
}

impl FromStr for LogRecord {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let caps = LINE_PATTERN.captures(line).ok_or(ParseError::NoMatch)?;

        let timestamp = group(&caps, "timestamp");
        let timestamp = DateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).map_err(|e| {
            ParseError::Timestamp {
                value: timestamp.to_string(),
                source: e,
            }
        })?;

        let status = group(&caps, "status");
        let status_code = status.parse::<u16>().map_err(|_| ParseError::Status {
            value: status.to_string(),
        })?;

        let size = group(&caps, "size");
        let response_size = size.parse::<u64>().map_err(|_| ParseError::Size {
            value: size.to_string(),
        })?;

        Ok(LogRecord {
            client_address: group(&caps, "ip").to_string(),
            timestamp,
            status_code,
            method: group(&caps, "method").to_string(),
            request_path: group(&caps, "path").to_string(),
            response_size,
            user_agent: group(&caps, "user_agent").to_string(),
        })
    }
}

// Every named group in LINE_PATTERN is mandatory, so a successful match always has it.
fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map(|m| m.as_str()).unwrap_or_default()
}
