mod fixtures;
pub mod tracing;

pub use fixtures::{FIREFOX, GOOGLEBOT, LogFixture, line, visit};
pub use tracing::{CapturedEvent, events_mentioning, init_test_tracing};
