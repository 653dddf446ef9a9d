use crate::record::LogRecord;
use tracing::dispatcher::DefaultGuard;
use tracing::subscriber;
use tracing_subscriber::fmt;

/// Enable tracing output for tests.
///
/// The tracing test output is only enabled as long as the returned guard
/// is not dropped.
pub fn enable_tracing_output() -> DefaultGuard {
    subscriber::set_default(fmt().compact().with_test_writer().finish())
}

pub const BROWSER_UA: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:64.0) Gecko/20100101 Firefox/64.0";

/// Builds an access log line in the layout the parser expects.
pub fn access_line(ip: &str, minute: u32, status: u16, method: &str, path: &str, ua: &str) -> String {
    format!(
        "{ip} - - [16/Jan/2024:10:{minute:02}:00 +0000] {status} \"{method} {path} HTTP/1.1\" 512 \"-\" \"{ua}\""
    )
}

/// A GET/200 record from a regular browser.
pub fn get(ip: &str, path: &str) -> LogRecord {
    record(ip, 0, 200, "GET", path, BROWSER_UA)
}

pub fn record(ip: &str, minute: u32, status: u16, method: &str, path: &str, ua: &str) -> LogRecord {
    access_line(ip, minute, status, method, path, ua)
        .parse()
        .expect("test line must parse")
}
