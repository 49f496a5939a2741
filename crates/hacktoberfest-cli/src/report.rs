//! Pull request listing
//!
//! Runs the search once, then looks up each hit to color it by status.

use crate::query::SearchQuery;
use anyhow::Result;
use colored::{Color, Colorize};
use hacktoberfest_client::{GitHubClient, PrState, PullRequestDetail, RepoRef};
use log::debug;
use std::io::Write;

/// Width the `owner/repo` column is right-aligned to
const REPO_COLUMN_WIDTH: usize = 40;

/// Pick the display color for a pull request
///
/// Precedence: merged > closed > open > anything else.
pub fn status_color(detail: &PullRequestDetail) -> Color {
    if detail.merged {
        Color::BrightMagenta
    } else {
        match detail.state {
            PrState::Closed => Color::BrightRed,
            PrState::Open => Color::BrightGreen,
            PrState::Unknown => Color::BrightYellow,
        }
    }
}

pub fn format_line(repo: &RepoRef, title: &str, color: Color) -> String {
    format!(
        "\t{:>width$}: {}",
        repo.to_string().color(color),
        title,
        width = REPO_COLUMN_WIDTH
    )
}

/// Print the total and one colored line per pull request
///
/// A failed detail lookup aborts the listing. Returns the reported total.
pub async fn run_report<C, W>(client: &C, query: &SearchQuery, out: &mut W) -> Result<u64>
where
    C: GitHubClient + ?Sized,
    W: Write,
{
    let query = query.to_string();
    debug!("Running search: {}", query);

    let results = client.search_issues(&query).await?;
    writeln!(out, "Total: {}", results.total_count)?;

    for item in &results.items {
        let repo = &item.repository;
        let detail = client
            .fetch_pull_request(&repo.owner, &repo.name, item.number)
            .await?;

        let color = status_color(&detail);
        debug!("{}#{} -> {:?}", repo, item.number, color);
        writeln!(out, "{}", format_line(repo, &item.title, color))?;
    }

    Ok(results.total_count)
}
