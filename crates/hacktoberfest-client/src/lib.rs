//! GitHub API access for hacktoberfest-cli
//!
//! This crate provides a trait-based GitHub client, the OAuth authorization
//! code flow, and the on-disk token cache that sits in front of it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  obtain()  ┌───────────────────┐
//! │  TokenCache  │───────────►│ Authorizer trait  │
//! │ (.token.json)│            │ BrowserAuthorizer │
//! └──────┬───────┘            └───────────────────┘
//!        │ Credential
//!        ▼
//! ┌─────────────────┐         ┌─────────────────────┐
//! │ OctocrabClient  │────────►│  GitHubClient trait │
//! │ (direct API)    │         │  - search_issues()  │
//! └─────────────────┘         │  - fetch_pull_request() │
//!                             └─────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use hacktoberfest_client::{
//!     BrowserAuthorizer, GitHubClient, OAuthConfig, OctocrabClient, TokenCache,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let authorizer = BrowserAuthorizer::new(OAuthConfig::new("client-id", "client-secret", 14565));
//! let cache = TokenCache::new("/home/octocat/.config/hacktoberfest-cli/.token.json");
//! let credential = cache.obtain(&authorizer).await?;
//!
//! let client = OctocrabClient::from_credential(&credential)?;
//! let results = client.search_issues("author:octocat type:pr").await?;
//! println!("Total: {}", results.total_count);
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod client;
pub mod oauth;
pub mod octocrab_client;
pub mod token_cache;
pub mod types;

pub use client::GitHubClient;
pub use oauth::{AuthError, Authorizer, BrowserAuthorizer, Credential, OAuthConfig};
pub use octocrab_client::OctocrabClient;
pub use token_cache::TokenCache;
pub use types::{PrState, PullRequestDetail, RepoRef, RepoRefError, SearchItem, SearchResults};
