//! Octocrab-based GitHub API client
//!
//! Direct implementation of the `GitHubClient` trait using the octocrab library.

use crate::client::GitHubClient;
use crate::oauth::Credential;
use crate::types::{PrState, PullRequestDetail, RepoRef, SearchItem, SearchResults};
use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use octocrab::Octocrab;
use std::sync::Arc;

/// Direct GitHub API client using octocrab
#[derive(Debug, Clone)]
pub struct OctocrabClient {
    octocrab: Arc<Octocrab>,
}

impl OctocrabClient {
    /// Create a new client with the given octocrab instance
    pub fn new(octocrab: Arc<Octocrab>) -> Self {
        Self { octocrab }
    }

    /// Build a client authenticated with a cached OAuth credential
    pub fn from_credential(credential: &Credential) -> anyhow::Result<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(credential.access_token.clone())
            .build()
            .context("Failed to build Octocrab client")?;

        debug!("Octocrab client initialized successfully");
        Ok(Self::new(Arc::new(octocrab)))
    }
}

#[async_trait]
impl GitHubClient for OctocrabClient {
    async fn search_issues(&self, query: &str) -> anyhow::Result<SearchResults> {
        debug!("Searching issues: {}", query);

        let page = self
            .octocrab
            .search()
            .issues_and_pull_requests(query)
            .send()
            .await
            .context("Issue search failed")?;

        let items = page
            .items
            .iter()
            .map(convert_issue)
            .collect::<anyhow::Result<Vec<_>>>()?;

        let total_count = page.total_count.unwrap_or(items.len() as u64);
        debug!("Search returned {} of {} items", items.len(), total_count);

        Ok(SearchResults { total_count, items })
    }

    async fn fetch_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
    ) -> anyhow::Result<PullRequestDetail> {
        debug!("Fetching PR {}/{}#{}", owner, repo, pr_number);

        let pr = self
            .octocrab
            .pulls(owner, repo)
            .get(pr_number)
            .await
            .with_context(|| format!("Failed to fetch {}/{}#{}", owner, repo, pr_number))?;

        Ok(PullRequestDetail {
            number: pr.number,
            merged: pr.merged.unwrap_or(false) || pr.merged_at.is_some(),
            state: pr.state.as_ref().map(convert_issue_state).unwrap_or_default(),
        })
    }
}

/// Convert an octocrab search hit to our SearchItem type
fn convert_issue(issue: &octocrab::models::issues::Issue) -> anyhow::Result<SearchItem> {
    let repository = RepoRef::from_api_url(issue.repository_url.as_str())?;

    Ok(SearchItem {
        repository,
        number: issue.number,
        title: issue.title.clone(),
        html_url: issue.html_url.to_string(),
    })
}

/// Convert octocrab IssueState to our PrState
fn convert_issue_state(state: &octocrab::models::IssueState) -> PrState {
    use octocrab::models::IssueState;
    match state {
        IssueState::Open => PrState::Open,
        IssueState::Closed => PrState::Closed,
        _ => PrState::Unknown,
    }
}
