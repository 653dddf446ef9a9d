use crate::aggregate::FrequencyTable;
use crate::correlate::ResolvedPair;
use chrono::{DateTime, FixedOffset};

/// Click-through estimate: how often each next URL followed an anchor.
#[derive(Debug, Default, Clone)]
pub struct NextUrlSummary {
    next_urls: FrequencyTable,
    earliest: Option<DateTime<FixedOffset>>,
    latest: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NextUrlRow {
    pub next_url: String,
    pub count: u64,
    pub percent_of_total: f64,
}

impl NextUrlSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pair: &ResolvedPair) {
        self.next_urls.add(&pair.next_path);

        let ts = pair.anchor.timestamp;
        if self.earliest.is_none_or(|earliest| ts < earliest) {
            self.earliest = Some(ts);
        }
        if self.latest.is_none_or(|latest| ts > latest) {
            self.latest = Some(ts);
        }
    }

    /// Number of resolved pairs.
    pub fn total_hits(&self) -> u64 {
        self.next_urls.total()
    }

    /// Earliest and latest anchor timestamps, if any pair was recorded.
    pub fn date_range(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        self.earliest.zip(self.latest)
    }

    pub fn rows(&self) -> Vec<NextUrlRow> {
        let total = self.total_hits();

        self.next_urls
            .sorted()
            .into_iter()
            .map(|(next_url, count)| NextUrlRow {
                next_url,
                count,
                percent_of_total: (count as f64 / total as f64) * 100.0,
            })
            .collect()
    }
}
