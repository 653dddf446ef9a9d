use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A successfully parsed access log line.
///
/// Fields hold the matched text verbatim, except for the timestamp and the two
/// integer fields which are coerced while parsing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// IPv4/IPv6 literal as written in the log. Never validated as an address.
    pub client_address: String,
    pub timestamp: DateTime<FixedOffset>,
    pub status_code: u16,
    pub method: String,
    /// Request target as sent on the wire, query string included, not decoded.
    pub request_path: String,
    pub response_size: u64,
    /// May be empty.
    pub user_agent: String,
}
