use crate::record::LogRecord;
use crate::report::format_timestamp;
use crate::source::{Line, SourceError};
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use tracing::warn;

/// Detects sources that start before the previous ones ended.
///
/// Only the first parsed record of each source is compared; lines within a
/// file are assumed to be in write order.
pub struct OrderCheck {
    strict: bool,
    current_source: Option<usize>,
    latest: Option<(DateTime<FixedOffset>, PathBuf)>,
    violations: u64,
}

impl OrderCheck {
    pub fn new(strict: bool) -> Self {
        Self {
            strict,
            current_source: None,
            latest: None,
            violations: 0,
        }
    }

    pub fn observe(&mut self, line: &Line<'_>, record: &LogRecord) -> Result<(), SourceError> {
        let ts = record.timestamp;

        if self.current_source != Some(line.source_index) {
            self.current_source = Some(line.source_index);

            let regressed = self.latest.as_ref().filter(|(latest, _)| ts < *latest).cloned();
            if let Some((latest, previous)) = regressed {
                self.violations += 1;
                let ended = format_timestamp(&latest);
                let starts = format_timestamp(&ts);

                if self.strict {
                    return Err(SourceError::OutOfOrder {
                        previous,
                        current: line.source.path.clone(),
                        ended,
                        starts,
                    });
                }
                warn!(
                    previous = %previous.display(),
                    current = %line.source.path.display(),
                    %ended,
                    %starts,
                    "input source starts before the previous one ended"
                );
            }
        }

        if self.latest.as_ref().is_none_or(|(latest, _)| ts > *latest) {
            self.latest = Some((ts, line.source.path.clone()));
        }
        Ok(())
    }

    pub fn violations(&self) -> u64 {
        self.violations
    }
}
