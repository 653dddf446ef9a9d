//! Aggregation keys derived from request targets.
//!
//! Two reductions exist: truncating the path to its first N segments (folder
//! tiers), and pulling a single decoded parameter out of the query string
//! (site search terms). Both work on the query-stripped path, which doubles as
//! the "distinct subpage" dimension of folder reports.


use std::borrow::Cow;
use url::{Url, form_urlencoded};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reduction {
    /// Keep the first `tier` path segments.
    Folder { tier: usize },
    /// Extract `param` from requests whose path starts with `prefix`.
    QueryParam { prefix: String, param: String },
}

impl Reduction {
    pub fn reduce(&self, request_path: &str) -> Option<String> {
        match self {
            Reduction::Folder { tier } => folder_key(request_path, *tier),
            Reduction::QueryParam { prefix, param } => query_param(request_path, prefix, param),
        }
    }
}

/// Returns the path component of a request target, without query or fragment.
pub fn strip_query(request_path: &str) -> Cow<'_, str> {
    split_target(request_path).0
}

/// `/a/b/c/d` at tier 2 is `/a/b`. Paths with fewer than `tier` segments have no key.
///
/// The root path counts as a single empty segment, so it is its own tier 1 folder.
pub fn folder_key(request_path: &str, tier: usize) -> Option<String> {
    if tier == 0 {
        return None;
    }

    let path = strip_query(request_path);
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    if segments.len() < tier {
        return None;
    }

    Some(format!("/{}", segments[..tier].join("/")))
}

/// Decoded value of the first non-empty `param` in the query string, provided
/// the query-stripped path starts with `prefix`.
pub fn query_param(request_path: &str, prefix: &str, param: &str) -> Option<String> {
    let (path, query) = split_target(request_path);
    if !path.starts_with(prefix) {
        return None;
    }

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == param && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn split_target(target: &str) -> (Cow<'_, str>, Cow<'_, str>) {
    if let Some(url) = absolute_form(target) {
        return (
            Cow::Owned(url.path().to_string()),
            Cow::Owned(url.query().unwrap_or_default().to_string()),
        );
    }

    let target = target.split_once('#').map_or(target, |(head, _)| head);
    match target.split_once('?') {
        Some((path, query)) => (Cow::Borrowed(path), Cow::Borrowed(query)),
        None => (Cow::Borrowed(target), Cow::Borrowed("")),
    }
}

// Forward proxies log the absolute form: `GET http://example.com/a?b HTTP/1.1`.
fn absolute_form(target: &str) -> Option<Url> {
    if !(target.starts_with("http://") || target.starts_with("https://")) {
        return None;
    }
    Url::parse(target).ok()
}
