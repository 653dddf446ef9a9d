use crate::correlate::CorrelationStats;
use crate::filter::Gate;
use serde::Serialize;
use tracing::info;

/// Records rejected by each classifier gate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rejections {
    pub status: u64,
    pub method: u64,
    pub bot: u64,
    pub excluded_url: u64,
}

impl Rejections {
    pub fn count(&mut self, gate: Gate) {
        match gate {
            Gate::Status => self.status += 1,
            Gate::Method => self.method += 1,
            Gate::Bot => self.bot += 1,
            Gate::ExcludedUrl => self.excluded_url += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.status + self.method + self.bot + self.excluded_url
    }
}

/// Counters for one run over the input.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub sources: usize,
    pub lines: u64,
    pub parsed: u64,
    pub unparseable: u64,
    pub accepted: u64,
    pub rejected: Rejections,
    /// Sources whose first record predates the latest record already read.
    pub out_of_order: u64,
    /// Number of rows in the written report.
    pub rows: u64,
    #[serde(skip)]
    pub correlation: Option<CorrelationStats>,
}

impl RunStats {
    pub fn log(&self, report: &'static str) {
        info!(
            report,
            sources = self.sources,
            lines = self.lines,
            parsed = self.parsed,
            unparseable = self.unparseable,
            accepted = self.accepted,
            rejected_status = self.rejected.status,
            rejected_method = self.rejected.method,
            rejected_bot = self.rejected.bot,
            rejected_url = self.rejected.excluded_url,
            out_of_order = self.out_of_order,
            rows = self.rows,
            "Run complete"
        );

        if let Some(c) = self.correlation {
            info!(
                report,
                armed = c.armed,
                resolved = c.resolved,
                superseded = c.superseded,
                unresolved = c.unresolved,
                "Correlation summary"
            );
        }
    }
}
