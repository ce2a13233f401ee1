// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! shields.io badge snippets used in dashboard cells.
//!
//! Every badge is a markdown image wrapped in a link. Registry badges link to
//! the package page on the OHPM web registry; GitHub badges link to the
//! repository and are rendered by shields.io from live GitHub data.

use crate::model::GithubLink;

const SHIELDS_BADGE_URL: &str = "https://img.shields.io/badge";
const SHIELDS_GITHUB_URL: &str = "https://img.shields.io/github";
const GITHUB_WEB_URL: &str = "https://github.com";
const REGISTRY_BADGE_COLOR: &str = "5EDE2E";

/// OHPM logo shown on the likes badge.
pub const OHPM_LOGO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAABQAAAAUCAMAAAC6V+0/AAAA6lBMVEUAAABswm92x09tw2pCq+xhvItMsM9Qs8FhvIxhvI9Bq+1mvn5rwm9OssdqwnFhvI1FreJTtLdowHdMsM1lvoJvxGJJr9hQssJ6yUNeupdXtq1auKJlvoNCq+tFrONJr9ZlvoJzxVlGreFwxGFQssNauKJMscxeuphErOVlvoN6yUNDq+lIrtpTtLdov3lLsM9hvIxAqvJhvI1ErOZwxGB6yUNTtLhAqvF6yUNwxGJ6yUNlvoJeupdzxVlwxGB6yUNHrt1swm1swm1swmxXtq1Xtq1yxVtpwHZvw2RwxGFnv3tnv3t6yUN6yUPKo5kKAAAATnRSTlMABRQL+Ho1JiMeGxoRCKL+/Pz8+PPz8fHx8Ovk4dPOzszGxcKsqqCYh4F/fXp3d2xoZ2VhWlZRR0dBNTEvLiUhFvy9taGgmI+Nf2loaGciFjA1AAAAo0lEQVQY02MgDfCy6bqqqhtxIIuxq4kLSklL8svo8cDF2OSFVczYOW0MFIT4mKBiXEpi+rxgFre7kwlUUFtAB6aHkZERqlBWzgHM4GDV5GbyNGGw0LJnMGfRgCpjFfFmVlZk9pEwZTBkMYZqZrbmZLCzZWSyYsIqiKLdC6TdV8IU1SJLUTeQRShO4nEWtcRwPJ+jByMWb/LgChBE0LmAg45kAADNURSuaNgr4QAAAABJRU5ErkJggg==";
/// Download arrow shown on the downloads badge.
pub const DOWNLOAD_ICON: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAyNCAyNCIgZmlsbD0icmdiYSgyNTUsMjU1LDI1NSwxKSI+PHBhdGggZD0iTTMgMTlIMjFWMjFIM1YxOVpNMTMgOUgyMEwxMiAxN0w0IDlIMTFWMUgxM1Y5WiI+PC9wYXRoPjwvc3ZnPg==";
/// Flame shown on the popularity badge.
pub const POPULARITY_ICON: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAyNCAyNCIgZmlsbD0icmdiYSgyNTUsMjU1LDI1NSwxKSI+PHBhdGggZmlsbD0ibm9uZSIgZD0iTTAgMGgyNHYyNEgweiI+PC9wYXRoPjxwYXRoIGQ9Ik0xMiAyM0M3Ljg1Nzg2IDIzIDQuNSAxOS42NDIxIDQuNSAxNS41QzQuNSAxMy4zNDYyIDUuNDA3ODYgMTEuNDA0NSA2Ljg2MTc5IDEwLjAzNjZDOC4yMDQwMyA4Ljc3Mzc1IDExLjUgNi40OTk1MSAxMSAxLjVDMTcgNS41IDIwIDkuNSAxNCAxNS41QzE1IDE1LjUgMTYuNSAxNS41IDE5IDEzLjAyOTZDMTkuMjY5NyAxMy44MDMyIDE5LjUgMTQuNjM0NSAxOS41IDE1LjVDMTkuNSAxOS42NDIxIDE2LjE0MjEgMjMgMTIgMjNaIj48L3BhdGg+PC9zdmc+";
/// Icon shown on the points badge.
pub const POINT_ICON: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAyNCAyNCIgZmlsbD0icmdiYSgyNTUsMjU1LDI1NSwxKSI+PHBhdGggZD0iTTEuOTQ2MDcgOS4zMTU0M0MxLjQyMzUzIDkuMTQxMjUgMS40MTk0IDguODYwMjIgMS45NTY4MiA4LjY4MTA4TDIxLjA0MyAyLjMxOTAxQzIxLjU3MTUgMi4xNDI4NSAyMS44NzQ2IDIuNDM4NjYgMjEuNzI2NSAyLjk1Njk0TDE2LjI3MzMgMjIuMDQzMkMxNi4xMjIzIDIyLjU3MTYgMTUuODE3NyAyMi41OSAxNS41OTQ0IDIyLjA4NzZMMTEuOTk5OSAxNEwxNy45OTk5IDYuMDAwMDVMOS45OTk5MiAxMkwxLjk0NjA3IDkuMzE1NDNaIj48L3BhdGg+PC9zdmc+";

/// Colour band of the points badge relative to the attainable maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsTier {
    /// Maximum reached.
    Full,
    /// Below the maximum.
    High,
    /// Below half of the maximum.
    Medium,
    /// Below a fifth of the maximum.
    Low,
    /// Below a tenth of the maximum.
    Critical
}

impl PointsTier {
    /// Classifies `points` against `max_points`; the lowest matching band
    /// wins.
    ///
    /// # Example
    ///
    /// ```
    /// use ohpm_dashboard::PointsTier;
    ///
    /// assert_eq!(PointsTier::from_points(110, 110), PointsTier::Full);
    /// assert_eq!(PointsTier::from_points(30, 110), PointsTier::Medium);
    /// assert_eq!(PointsTier::from_points(15, 110), PointsTier::Low);
    /// ```
    pub fn from_points(points: u64, max_points: u64) -> Self {
        let points = points as f64;
        let max = max_points as f64;

        if points < max * 0.1 {
            Self::Critical
        } else if points < max * 0.2 {
            Self::Low
        } else if points < max * 0.5 {
            Self::Medium
        } else if points < max {
            Self::High
        } else {
            Self::Full
        }
    }

    /// Hex colour without the leading `#`.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Full => REGISTRY_BADGE_COLOR,
            Self::High => "95C30D",
            Self::Medium => "9FA226",
            Self::Low => "D6AE22",
            Self::Critical => "D66049"
        }
    }
}

/// Registry web page of `name`, with the name escaped as a path segment.
pub fn registry_link(registry_web: &str, name: &str) -> String {
    format!("{registry_web}/{}", escape_path_segment(name))
}

/// Percent-encodes `segment` for use as one URL path segment.
///
/// Unreserved characters and the sub-delimiters `$&+:=@` stay literal;
/// `/`, `;`, `,`, `?`, spaces and non-ASCII characters are encoded.
pub(crate) fn escape_path_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    let mut buf = [0u8; 4];

    for ch in segment.chars() {
        if ch.is_ascii_alphanumeric() || "-_.~$&+:=@".contains(ch) {
            escaped.push(ch);
        } else {
            escaped.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }

    escaped
}

/// Social-style likes badge.
pub fn likes_badge(likes: u64, link: &str) -> String {
    format!(
        "[![OHPM likes]({SHIELDS_BADGE_URL}/{likes}-_?style=social&logo={OHPM_LOGO}&logoColor=168AFD&label=)]({link})"
    )
}

/// Downloads badge.
pub fn downloads_badge(downloads: u64, link: &str) -> String {
    registry_counter("OHPM downloads", downloads, DOWNLOAD_ICON, link)
}

/// Popularity badge.
pub fn popularity_badge(popularity: u64, link: &str) -> String {
    registry_counter("OHPM popularity", popularity, POPULARITY_ICON, link)
}

/// Points badge reading `points/max`, coloured by [`PointsTier`].
pub fn points_badge(points: u64, max_points: u64, link: &str) -> String {
    let color = PointsTier::from_points(points, max_points).color();
    format!(
        "[![OHPM points]({SHIELDS_BADGE_URL}/{points}%2F{max_points}-_?style=flat&logo={POINT_ICON}&logoColor=FFFFFF&labelColor={color}&color={color})]({link})"
    )
}

/// Star count badge of the repository.
pub fn github_stars_badge(link: &GithubLink) -> String {
    let repo = link.full_name();
    format!(
        "[![GitHub stars]({SHIELDS_GITHUB_URL}/stars/{repo}?style=social&logo=github&logoColor=1F2328&label=)]({GITHUB_WEB_URL}/{repo})"
    )
}

/// Open issues badge of the repository.
pub fn github_issues_badge(link: &GithubLink) -> String {
    let repo = link.full_name();
    format!("[![GitHub issues]({SHIELDS_GITHUB_URL}/issues/{repo}?label=)]({GITHUB_WEB_URL}/{repo}/issues)")
}

/// Open pull requests badge of the repository.
pub fn github_pull_requests_badge(link: &GithubLink) -> String {
    let repo = link.full_name();
    format!(
        "[![GitHub pull requests]({SHIELDS_GITHUB_URL}/issues-pr/{repo}?label=)]({GITHUB_WEB_URL}/{repo}/pulls)"
    )
}

fn registry_counter(alt: &str, value: u64, icon: &str, link: &str) -> String {
    format!(
        "[![{alt}]({SHIELDS_BADGE_URL}/{value}-_?style=flat&logo={icon}&logoColor=FFFFFF&labelColor={REGISTRY_BADGE_COLOR}&color={REGISTRY_BADGE_COLOR})]({link})"
    )
}
