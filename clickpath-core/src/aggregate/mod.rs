//! Accumulators behind each report.

mod folder;
mod frequency;
mod next_url;
#[cfg(test)]
mod tests;

pub use folder::{FolderAggregator, FolderRow};
pub use frequency::FrequencyTable;
pub use next_url::{NextUrlRow, NextUrlSummary};
