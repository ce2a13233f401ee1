// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! GitHub enrichment of resolved packages.
//!
//! Packages point at their sources through free-form homepage and
//! repository URLs. [`resolve_github_link`] extracts an `owner/repo` pair
//! from them, and [`GithubClient::enrich`] attaches repository statistics and
//! the leading human contributors. API failures never abort enrichment: they
//! are logged and the affected values stay at zero.

use std::sync::LazyLock;

use http::header::HeaderName;
use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    contributors::fetch_top_contributors,
    error::Error,
    model::{GithubEnrichment, GithubLink, GithubStats}
};

/// REST API version requested from GitHub.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

static GITHUB_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/.*").expect("valid regex"));

/// Extracts the owner and repository name from a GitHub URL.
///
/// Everything from `github.com/` onward is split on `/`; the first two
/// segments are the owner and the repository, with a trailing `.git`
/// removed. Returns `None` when either segment is missing or empty.
///
/// # Example
///
/// ```
/// use ohpm_dashboard::parse_github_link;
///
/// let link = parse_github_link("https://github.com/foo/bar.git").expect("github link");
/// assert_eq!((link.owner.as_str(), link.repo.as_str()), ("foo", "bar"));
/// assert!(parse_github_link("https://gitee.com/foo/bar").is_none());
/// ```
pub fn parse_github_link(url: &str) -> Option<GithubLink> {
    github_segments(url).and_then(|(owner, repo)| link_from(owner, repo))
}

/// Resolves the GitHub link of a package.
///
/// The first URL with a repository segment wins, checking the repository URL
/// before the homepage. If that URL has an empty owner, such as
/// `github.com//bar`, the package has no link; the homepage is not consulted.
pub fn resolve_github_link(repository_url: &str, homepage: &str) -> Option<GithubLink> {
    let (owner, repo) = github_segments(repository_url).or_else(|| github_segments(homepage))?;
    link_from(owner, repo)
}

/// Owner and repository segments of `url`, present when the repository
/// segment is non-empty. The owner may be empty.
fn github_segments(url: &str) -> Option<(&str, &str)> {
    let matched = GITHUB_PATH.find(url)?.as_str();
    let mut segments = matched.split('/').skip(1);

    let owner = segments.next()?;
    let repo = segments.next()?;
    let repo = repo.split(['#', '?']).next().unwrap_or_default();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    (!repo.is_empty()).then_some((owner, repo))
}

fn link_from(owner: &str, repo: &str) -> Option<GithubLink> {
    if owner.is_empty() {
        return None;
    }

    Some(GithubLink {
        owner: owner.to_owned(),
        repo:  repo.to_owned()
    })
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryMetadata {
    #[serde(default)]
    stargazers_count:  u64,
    #[serde(default)]
    forks_count:       u64,
    #[serde(default)]
    open_issues_count: u64,
    #[serde(default)]
    license:           Option<RepositoryLicense>
}

#[derive(Debug, Default, Deserialize)]
struct RepositoryLicense {
    #[serde(default)]
    name: Option<String>
}

/// Authenticated GitHub API client used for enrichment.
#[derive(Debug, Clone)]
pub struct GithubClient {
    octocrab: Octocrab
}

impl GithubClient {
    /// Builds a client against `base_url`.
    ///
    /// Requests carry a bearer token when `token` is provided and always
    /// request [`GITHUB_API_VERSION`]. Failed requests are not retried.
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GitHub`](Error::GitHub) when the base URL is invalid
    /// or the client cannot be initialized.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, Error> {
        let mut builder = Octocrab::builder()
            .base_uri(base_url)?
            .add_header(
                HeaderName::from_static("x-github-api-version"),
                GITHUB_API_VERSION.to_owned()
            )
            .add_retry_config(RetryConfig::None);

        if let Some(token) = token {
            builder = builder.personal_token(token.to_owned());
        }

        Ok(Self {
            octocrab: builder.build()?
        })
    }

    /// Collects GitHub statistics and top contributors for `link`.
    ///
    /// Failed requests are logged; the corresponding data stays empty.
    pub async fn enrich(&self, link: GithubLink) -> GithubEnrichment {
        let mut stats = match self.repository_stats(&link).await {
            Ok(stats) => stats,
            Err(error) => {
                warn!("GitHub repository metadata for {link} unavailable: {error}");
                GithubStats::default()
            }
        };

        let top_contributors = match fetch_top_contributors(&self.octocrab, &link).await {
            Ok(page) => {
                stats.contributors_total = page.total;
                page.top
            }
            Err(error) => {
                warn!("GitHub contributors for {link} unavailable: {error}");
                Vec::new()
            }
        };

        GithubEnrichment {
            link,
            stats,
            top_contributors
        }
    }

    async fn repository_stats(&self, link: &GithubLink) -> Result<GithubStats, Error> {
        debug!("Fetching repository metadata for {link}");
        let metadata: RepositoryMetadata = self
            .octocrab
            .get(format!("/repos/{}/{}", link.owner, link.repo), None::<&()>)
            .await?;

        Ok(GithubStats {
            stars:              metadata.stargazers_count,
            forks:              metadata.forks_count,
            open_issues:        metadata.open_issues_count,
            license_name:       metadata
                .license
                .and_then(|license| license.name)
                .unwrap_or_default(),
            contributors_total: 0
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path}
    };

    use super::*;

    fn link(owner: &str, repo: &str) -> GithubLink {
        GithubLink {
            owner: owner.to_owned(),
            repo:  repo.to_owned()
        }
    }

    #[test]
    fn parses_https_url_with_git_suffix() {
        assert_eq!(parse_github_link("https://github.com/foo/bar.git"), Some(link("foo", "bar")));
    }

    #[test]
    fn parses_scp_and_prefixed_urls() {
        assert_eq!(
            parse_github_link("git+https://github.com/foo/bar.git"),
            Some(link("foo", "bar"))
        );
        assert_eq!(
            parse_github_link("https://github.com/foo/bar/tree/main/packages/x"),
            Some(link("foo", "bar"))
        );
    }

    #[test]
    fn strips_fragments_and_queries() {
        assert_eq!(parse_github_link("https://github.com/foo/bar#readme"), Some(link("foo", "bar")));
        assert_eq!(parse_github_link("https://github.com/foo/bar?tab=1"), Some(link("foo", "bar")));
    }

    #[test]
    fn rejects_non_github_and_incomplete_urls() {
        assert_eq!(parse_github_link("https://gitee.com/foo/bar"), None);
        assert_eq!(parse_github_link("https://github.com/foo"), None);
        assert_eq!(parse_github_link("https://github.com/foo/"), None);
        assert_eq!(parse_github_link(""), None);
    }

    #[test]
    fn repository_url_takes_priority() {
        let resolved =
            resolve_github_link("https://github.com/repo/owner", "https://github.com/home/page");
        assert_eq!(resolved, Some(link("repo", "owner")));
    }

    #[test]
    fn homepage_used_when_repository_is_not_github() {
        let resolved =
            resolve_github_link("https://gitee.com/a/b", "https://github.com/home/page");
        assert_eq!(resolved, Some(link("home", "page")));
        assert_eq!(resolve_github_link("", ""), None);
    }

    #[test]
    fn empty_owner_stops_link_resolution() {
        assert_eq!(parse_github_link("https://github.com//bar"), None);
        assert_eq!(
            resolve_github_link("https://github.com//bar", "https://github.com/home/page"),
            None
        );
        assert_eq!(
            resolve_github_link("https://github.com/foo/", "https://github.com/home/page"),
            Some(link("home", "page"))
        );
    }

    #[tokio::test]
    async fn server_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = GithubClient::new(&server.uri(), None).expect("client should build");
        let enrichment = client.enrich(link("foo", "bar")).await;

        assert_eq!(enrichment.stats, GithubStats::default());
        let requests = server
            .received_requests()
            .await
            .expect("request recording enabled");
        assert_eq!(requests.len(), 2);
    }

    #[tokio::test]
    async fn enrich_collects_stats_and_contributors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/foo/bar"))
            .and(header("authorization", "Bearer secret"))
            .and(header("x-github-api-version", GITHUB_API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "stargazers_count": 12,
                "forks_count": 3,
                "open_issues_count": 4,
                "license": { "name": "MIT License" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/foo/bar/contributors"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "login": "bot", "id": 1, "avatar_url": "a1", "html_url": "h1", "type": "Bot" },
                { "login": "alice", "id": 2, "avatar_url": "a2", "html_url": "h2", "type": "User" }
            ])))
            .mount(&server)
            .await;

        let client = GithubClient::new(&server.uri(), Some("secret")).expect("client should build");
        let enrichment = client.enrich(link("foo", "bar")).await;

        assert_eq!(enrichment.stats.stars, 12);
        assert_eq!(enrichment.stats.forks, 3);
        assert_eq!(enrichment.stats.open_issues, 4);
        assert_eq!(enrichment.stats.license_name, "MIT License");
        assert_eq!(enrichment.stats.contributors_total, 2);
        assert_eq!(enrichment.top_contributors.len(), 1);
        assert_eq!(enrichment.top_contributors[0].login, "alice");
    }

    #[tokio::test]
    async fn enrich_keeps_zero_values_on_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Not Found",
                "documentation_url": "https://docs.github.com"
            })))
            .mount(&server)
            .await;

        let client = GithubClient::new(&server.uri(), None).expect("client should build");
        let enrichment = client.enrich(link("foo", "gone")).await;

        assert_eq!(enrichment.link, link("foo", "gone"));
        assert_eq!(enrichment.stats, GithubStats::default());
        assert!(enrichment.top_contributors.is_empty());
    }
}
