//! Per-client navigation correlation.
//!
//! Each client address is either idle or holds one pending anchor (a homepage
//! or search hit, say). The next qualifying record from the same client
//! resolves the anchor into a [`ResolvedPair`], approximating the page the
//! visitor clicked through to. Correlation is keyed on the bare client address
//! and has no timeout: anchors still pending when input ends are dropped.
//!
//! Resolution depends on input order, so callers must feed records oldest
//! first.


use crate::record::LogRecord;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Which request paths start a tracked navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorRule {
    Exact(String),
    Prefix(String),
}

impl AnchorRule {
    pub fn matches(&self, request_path: &str) -> bool {
        match self {
            AnchorRule::Exact(path) => request_path == path,
            AnchorRule::Prefix(prefix) => request_path.starts_with(prefix.as_str()),
        }
    }
}

/// What an anchor-qualifying record does to a client that already has a
/// pending anchor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// The record resolves the pending anchor, then becomes the new anchor.
    #[default]
    ResolveThenRearm,
    /// The record replaces the pending anchor, which is dropped unresolved.
    ResetOnAnchor,
}

#[derive(Debug, Clone)]
pub struct PendingAnchor {
    pub anchor: LogRecord,
}

impl PendingAnchor {
    fn resolve(self, next_path: &str) -> ResolvedPair {
        ResolvedPair {
            anchor: self.anchor,
            next_path: next_path.to_string(),
        }
    }
}

/// An anchor together with the path its client requested next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPair {
    pub anchor: LogRecord,
    pub next_path: String,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationStats {
    pub armed: u64,
    pub resolved: u64,
    /// Pending anchors replaced under [`AnchorPolicy::ResetOnAnchor`].
    pub superseded: u64,
    /// Pending anchors discarded at end of input.
    pub unresolved: u64,
}

pub struct SessionCorrelator {
    rule: AnchorRule,
    policy: AnchorPolicy,
    pending: HashMap<String, PendingAnchor>,
    stats: CorrelationStats,
}

impl SessionCorrelator {
    pub fn new(rule: AnchorRule, policy: AnchorPolicy) -> Self {
        Self {
            rule,
            policy,
            pending: HashMap::new(),
            stats: CorrelationStats::default(),
        }
    }

    /// Feeds one qualifying record, returning the pair it completes, if any.
    pub fn observe(&mut self, record: LogRecord) -> Option<ResolvedPair> {
        let is_anchor = self.rule.matches(&record.request_path);

        match self.policy {
            AnchorPolicy::ResolveThenRearm => {
                let resolved = self
                    .pending
                    .remove(&record.client_address)
                    .map(|p| p.resolve(&record.request_path));

                if resolved.is_some() {
                    self.stats.resolved += 1;
                }
                if is_anchor {
                    self.arm(record);
                }
                resolved
            }
            AnchorPolicy::ResetOnAnchor => {
                if is_anchor {
                    if self.arm(record).is_some() {
                        self.stats.superseded += 1;
                    }
                    return None;
                }

                let resolved = self
                    .pending
                    .remove(&record.client_address)
                    .map(|p| p.resolve(&record.request_path));

                if resolved.is_some() {
                    self.stats.resolved += 1;
                }
                resolved
            }
        }
    }

    /// Number of clients currently holding a pending anchor.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, client_address: &str) -> bool {
        self.pending.contains_key(client_address)
    }

    /// Ends the run. Pending anchors are discarded, never emitted.
    pub fn finish(mut self) -> CorrelationStats {
        self.stats.unresolved = self.pending.len() as u64;
        if self.stats.unresolved > 0 {
            debug!(
                unresolved = self.stats.unresolved,
                "discarding anchors without a follow-up request"
            );
        }
        self.pending.clear();
        self.stats
    }

    fn arm(&mut self, record: LogRecord) -> Option<PendingAnchor> {
        self.stats.armed += 1;
        self.pending
            .insert(record.client_address.clone(), PendingAnchor { anchor: record })
    }
}
