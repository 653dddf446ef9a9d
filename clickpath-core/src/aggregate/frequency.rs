use indexmap::IndexMap;

/// Occurrence counts per value, remembering first-seen order.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_string(), 1);
            }
        }
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Rows by descending count. Ties keep first-seen order.
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut rows: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(value, count)| (value.clone(), *count))
            .collect();

        // sort_by is stable
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows
    }
}
