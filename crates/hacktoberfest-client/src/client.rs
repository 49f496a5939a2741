//! GitHub client trait
//!
//! This module defines the `GitHubClient` trait the report runs against.
//! The octocrab-backed implementation lives in `octocrab_client`; tests
//! provide their own.

use crate::types::{PullRequestDetail, SearchResults};
use async_trait::async_trait;

/// GitHub API client trait
///
/// Covers the two read-only calls needed to list a user's pull requests:
/// one issue search and one pull request lookup per result.
///
/// # Example
///
/// ```rust,ignore
/// use hacktoberfest_client::GitHubClient;
///
/// async fn count(client: &dyn GitHubClient) -> anyhow::Result<u64> {
///     Ok(client.search_issues("author:octocat type:pr").await?.total_count)
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Run an issue/PR search and return the first page of results
    ///
    /// # Arguments
    ///
    /// * `query` - Search query in GitHub search syntax
    async fn search_issues(&self, query: &str) -> anyhow::Result<SearchResults>;

    /// Fetch a single pull request by number
    ///
    /// # Arguments
    ///
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    /// * `pr_number` - Pull request number
    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestDetail>;
}
