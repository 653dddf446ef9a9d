use indexmap::IndexMap;
use std::collections::HashSet;

#[derive(Debug, Default)]
struct FolderStats {
    hits: u64,
    subpages: HashSet<String>,
}

/// Hit counts and distinct subpages per folder, in first-seen folder order.
#[derive(Debug, Default)]
pub struct FolderAggregator {
    folders: IndexMap<String, FolderStats>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRow {
    pub folder: String,
    pub total_subpages: usize,
    pub total_hits: u64,
}

impl FolderAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one hit on `folder`. `subpage` is the query-stripped path;
    /// repeats do not grow the distinct count.
    pub fn record(&mut self, folder: String, subpage: &str) {
        let stats = self.folders.entry(folder).or_default();
        stats.hits += 1;
        if !stats.subpages.contains(subpage) {
            stats.subpages.insert(subpage.to_string());
        }
    }

    pub fn total_hits(&self) -> u64 {
        self.folders.values().map(|s| s.hits).sum()
    }

    pub fn rows(&self) -> Vec<FolderRow> {
        self.folders
            .iter()
            .map(|(folder, stats)| FolderRow {
                folder: folder.clone(),
                total_subpages: stats.subpages.len(),
                total_hits: stats.hits,
            })
            .collect()
    }
}
