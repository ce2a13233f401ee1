// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Contributor listing for the dashboard avatar table.
///
/// Fetches the first page of a repository's contributors and keeps the
/// leading human accounts, skipping bots and organizations.
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::Error,
    model::{Contributor, GithubLink},
};

/// Page size of the contributors request; also the cap of the total count.
pub const CONTRIBUTORS_PAGE_SIZE: u8 = 100;
/// Number of contributors shown per package.
pub const TOP_CONTRIBUTORS: usize = 3;

const HUMAN_ACCOUNT_TYPE: &str = "User";

/// Contributor entry returned by the GitHub API.
#[derive(Debug, Clone, Deserialize,)]
struct ContributorEntry
{
    #[serde(default)]
    pub login:        String,
    #[serde(default)]
    pub id:           u64,
    #[serde(default)]
    pub avatar_url:   String,
    #[serde(default)]
    pub html_url:     String,
    #[serde(rename = "type", default)]
    pub account_type: String,
}

#[derive(Debug, Serialize,)]
struct ContributorsQuery
{
    page:     u32,
    per_page: u8,
}

/// First page of contributors reduced to what the dashboard displays.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ContributorsPage
{
    /// Number of entries on the page, bots included.
    pub total: usize,
    /// Leading human contributors in API order.
    pub top:   Vec<Contributor,>,
}

/// Fetches the first page of contributors of `link`.
///
/// # Errors
///
/// Returns [`Error::GitHub`] when the request fails or the response cannot be
/// decoded.
pub async fn fetch_top_contributors(
    octocrab: &Octocrab,
    link: &GithubLink,
) -> Result<ContributorsPage, Error,>
{
    debug!("Fetching contributors for {}", link);

    let entries: Vec<ContributorEntry,> = octocrab
        .get(
            format!("/repos/{}/{}/contributors", link.owner, link.repo),
            Some(&ContributorsQuery {
                page: 1, per_page: CONTRIBUTORS_PAGE_SIZE,
            },),
        )
        .await?;

    Ok(summarize(entries,),)
}

fn summarize(entries: Vec<ContributorEntry,>,) -> ContributorsPage
{
    let total = entries.len();
    let top = entries
        .into_iter()
        .filter(|entry| entry.account_type == HUMAN_ACCOUNT_TYPE,)
        .take(TOP_CONTRIBUTORS,)
        .map(|entry| Contributor {
            login:       entry.login,
            id:          entry.id,
            avatar_url:  entry.avatar_url,
            profile_url: entry.html_url,
        },)
        .collect();

    ContributorsPage {
        total, top,
    }
}
