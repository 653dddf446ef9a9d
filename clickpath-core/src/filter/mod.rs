//! Record classification.
//!
//! A record takes part in aggregation only when it passes every gate:
//! status, method, bot identity and URL exclusion. Gates are independent
//! substring/membership tests, evaluated cheapest first.

mod crawler;

use crate::conf::types::FilterConfig;
use crate::record::LogRecord;
pub use crawler::CrawlerDetector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    Status,
    Method,
    Bot,
    ExcludedUrl,
}

impl Gate {
    pub fn as_str(self) -> &'static str {
        match self {
            Gate::Status => "status",
            Gate::Method => "method",
            Gate::Bot => "bot",
            Gate::ExcludedUrl => "excluded_url",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected(Gate),
}

pub struct Classifier {
    /// Empty means any status is accepted.
    statuses: Vec<u16>,
    /// Empty means any method is accepted.
    methods: Vec<String>,
    /// Stored lowercase; matched against the lowercased user agent.
    bot_tokens: Vec<String>,
    url_exclusions: Vec<String>,
    crawlers: Option<CrawlerDetector>,
}

impl Classifier {
    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self {
            statuses: cfg.statuses.clone(),
            methods: cfg.methods.clone(),
            bot_tokens: cfg
                .bot_tokens
                .iter()
                .filter(|t| !t.is_empty())
                .map(|t| t.to_lowercase())
                .collect(),
            url_exclusions: cfg.url_exclusions.clone(),
            crawlers: cfg.detect_crawlers.then(CrawlerDetector::new),
        }
    }

    pub fn classify(&self, record: &LogRecord) -> Verdict {
        if !self.status_allowed(record.status_code) {
            return Verdict::Rejected(Gate::Status);
        }
        if !self.method_allowed(&record.method) {
            return Verdict::Rejected(Gate::Method);
        }
        if self.is_bot(&record.user_agent) {
            return Verdict::Rejected(Gate::Bot);
        }
        if self.is_excluded_url(&record.request_path) {
            return Verdict::Rejected(Gate::ExcludedUrl);
        }
        Verdict::Accepted
    }

    pub fn accepts(&self, record: &LogRecord) -> bool {
        self.classify(record) == Verdict::Accepted
    }

    pub fn status_allowed(&self, status: u16) -> bool {
        self.statuses.is_empty() || self.statuses.contains(&status)
    }

    pub fn method_allowed(&self, method: &str) -> bool {
        self.methods.is_empty() || self.methods.iter().any(|m| m == method)
    }

    /// Case-insensitive token match, optionally backed by crawler detection.
    /// An empty user agent is never a bot.
    pub fn is_bot(&self, user_agent: &str) -> bool {
        if user_agent.is_empty() {
            return false;
        }

        let lowered = user_agent.to_lowercase();
        if self.bot_tokens.iter().any(|t| lowered.contains(t.as_str())) {
            return true;
        }

        self.crawlers
            .as_ref()
            .is_some_and(|detector| detector.is_crawler(user_agent))
    }

    /// Case-sensitive fragment match against the raw request target.
    pub fn is_excluded_url(&self, request_path: &str) -> bool {
        self.url_exclusions
            .iter()
            .any(|fragment| request_path.contains(fragment.as_str()))
    }
}
