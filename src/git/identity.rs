//! Remote identity lookup
//!
//! Figures out which known repository a working copy's `origin` remote points
//! at, by inspecting the fetch URL reported by `git remote show origin`.

use crate::error::{Error, Result};
use crate::session::Session;
use crate::types::{RepositoryBinding, RepositoryKind};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static FETCH_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*Fetch URL:\s*(\S+)\s*$").expect("hardcoded fetch URL pattern is valid")
});

/// Repository names recognised when no collection is configured
const DEFAULT_COLLECTIONS: [&str; 2] = ["flow-development-collection", "neos-development-collection"];

/// Allow-list of repository names an `origin` remote may point at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMatcher {
    names: Vec<String>,
}

impl Default for RemoteMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_COLLECTIONS)
    }
}

impl RemoteMatcher {
    /// Matcher for the given repository names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Matcher for every configured collection, falling back to the defaults
    pub fn from_bindings(bindings: &[RepositoryBinding]) -> Self {
        let names: Vec<&str> = bindings
            .iter()
            .filter(|b| b.kind == RepositoryKind::Collection)
            .map(|b| b.origin_repository_name.as_str())
            .collect();

        if names.is_empty() {
            Self::default()
        } else {
            Self::new(names)
        }
    }

    /// Known repository names
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Repository named by the first recognised `Fetch URL:` line
    pub fn match_output(&self, output: &str) -> Result<String> {
        FETCH_URL
            .captures_iter(output)
            .filter_map(|c| c.get(1))
            .find_map(|url| self.match_url(url.as_str()))
            .map(str::to_string)
            .ok_or_else(|| Error::RemoteNotRecognized {
                output: output.to_string(),
            })
    }

    fn match_url(&self, url: &str) -> Option<&str> {
        let url = url.trim_end_matches('/');
        self.names
            .iter()
            .find(|name| url.contains(&format!("{name}.git")) || url.ends_with(name.as_str()))
            .map(String::as_str)
    }
}

/// Repository the `origin` remote of `dir` points at
pub async fn resolve_remote_repository(
    session: &Session<'_>,
    dir: &Path,
    matcher: &RemoteMatcher,
) -> Result<String> {
    let result = session.git(&["remote", "show", "origin"], dir).await?;
    matcher.match_output(&result.output)
}
