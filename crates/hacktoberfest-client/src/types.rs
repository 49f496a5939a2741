//! GitHub API data transfer objects
//!
//! These types carry only what the report needs from the search and
//! pull request endpoints. They are separate from octocrab's models so
//! tests can build them without touching the API.

use std::fmt;
use thiserror::Error;

/// Owner and name of a repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoRefError {
    #[error("repository url '{0}' does not end in owner/repo")]
    Malformed(String),
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Recover owner and repo from a repository API url
    ///
    /// Search results reference their repository as
    /// `https://api.github.com/repos/{owner}/{repo}`; the last two path
    /// segments are the owner and the repo.
    pub fn from_api_url(url: &str) -> Result<Self, RepoRefError> {
        let mut segments = url
            .trim_end_matches('/')
            .rsplit('/')
            .filter(|s| !s.is_empty());

        match (segments.next(), segments.next()) {
            (Some(name), Some(owner)) if !owner.ends_with(':') => Ok(Self::new(owner, name)),
            _ => Err(RepoRefError::Malformed(url.to_string())),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// An issue or pull request returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    /// Repository the item belongs to
    pub repository: RepoRef,

    /// Issue/PR number
    pub number: u64,

    /// Title
    pub title: String,

    /// URL for opening in browser
    pub html_url: String,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResults {
    /// Total matches as reported by GitHub (may exceed `items.len()`)
    pub total_count: u64,
    pub items: Vec<SearchItem>,
}

/// State of a pull request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrState {
    Open,
    Closed,
    /// Missing or not recognised
    #[default]
    Unknown,
}

/// Merge status of a single pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDetail {
    pub number: u64,
    pub merged: bool,
    pub state: PrState,
}
