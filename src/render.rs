// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Markdown dashboard rendering.
//!
//! Rendering is pure: records and the sort label go in, the markdown table
//! comes out. Every row has the same five cells; unresolved packages keep the
//! cell skeleton with empty contents so the table stays rectangular.

use chrono::{DateTime, SecondsFormat};

use crate::{
    badge::{
        downloads_badge, github_issues_badge, github_pull_requests_badge, github_stars_badge,
        likes_badge, points_badge, popularity_badge, registry_link
    },
    model::{Contributor, GithubEnrichment, PackageDetails, PackageRecord, PackageStatus}
};

/// Marker appended to the name of packages the registry could not resolve.
pub const UNRESOLVED_MARKER: &str = "⁉️";

const TABLE_HEADER: &str = "| <sub>Package</sub> | <sub>Stars/Likes</sub> | <sub>Downloads/Popularity / Points</sub> | <sub>Issues / Pull_requests</sub> | <sub>Contributors</sub> | \n";
const TABLE_ALIGNMENT: &str = "|--------------------|------------------------|------------------------------|-----------------------------------|:-----------------------:| \n";
const GITHUB_WEB_URL: &str = "https://github.com";
const PLACEHOLDER: &str = "-";
const CONTRIBUTORS_TOTAL_CAP: usize = 100;
const LEAD_AVATAR_WIDTH: &str = "36px";
const AVATAR_WIDTH: &str = "30px";

/// Renders the dashboard table for already sorted `records`.
///
/// `sort_label` is shown verbatim in the summary line and `registry_web` is
/// the base of the per-package registry links.
///
/// # Example
///
/// ```
/// use ohpm_dashboard::{PackageRecord, render_table};
///
/// let table = render_table(
///     &[PackageRecord::unresolved("missing")],
///     "name",
///     "https://ohpm.openharmony.cn/#/cn/detail"
/// );
/// assert!(table.starts_with("<sub>Sort by name | Total 1</sub>"));
/// assert!(table.contains("| missing ⁉️ <sup><strong></strong></sup>"));
/// ```
pub fn render_table(records: &[PackageRecord], sort_label: &str, registry_web: &str) -> String {
    let mut markdown = format!("<sub>Sort by {sort_label} | Total {}</sub> \n\n", records.len());
    markdown.push_str(TABLE_HEADER);
    markdown.push_str(TABLE_ALIGNMENT);

    for record in records {
        let row = match &record.status {
            PackageStatus::Resolved(details) => resolved_row(&record.name, details, registry_web),
            PackageStatus::Unresolved => TableRow::unresolved(&record.name)
        };
        row.write_to(&mut markdown);
    }

    markdown
}

/// Replaces newlines with spaces and pipes with `丨` so a description fits
/// in one table cell.
pub fn sanitize_description(description: &str) -> String {
    description.replace('\n', " ").replace('|', "丨")
}

/// Formats epoch milliseconds as an RFC 3339 UTC timestamp.
///
/// Out-of-range values render as `-`.
pub fn format_publish_time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| PLACEHOLDER.to_owned())
}

#[derive(Debug, Default)]
struct TableRow {
    name:          String,
    version:       String,
    description:   String,
    license:       String,
    publish_time:  String,
    stars:         String,
    likes:         String,
    downloads:     String,
    popularity:    String,
    points:        String,
    issues:        String,
    pull_requests: String,
    contributors:  String
}

impl TableRow {
    fn unresolved(name: &str) -> Self {
        Self {
            name: format!("{name} {UNRESOLVED_MARKER}"),
            ..Self::default()
        }
    }

    fn write_to(&self, markdown: &mut String) {
        markdown.push_str(&format!(
            "| {} <sup><strong>{}</strong></sup> <br/> <sub>{}</sub> <br/> <sub>{}</sub> <br/> <sub>{}</sub>",
            self.name,
            self.version,
            sanitize_description(&self.description),
            self.license,
            self.publish_time
        ));
        markdown.push_str(&format!(" | {} <br/> {}", self.stars, self.likes));
        markdown.push_str(&format!(
            " | {} <br/> {} <br/> {}",
            self.downloads, self.popularity, self.points
        ));
        markdown.push_str(&format!(" | {} <br/> {}", self.issues, self.pull_requests));
        markdown.push_str(&format!(" | {} | \n", self.contributors));
    }
}

fn resolved_row(name: &str, details: &PackageDetails, registry_web: &str) -> TableRow {
    let link = registry_link(registry_web, name);
    let license = if details.license_name.is_empty() {
        PLACEHOLDER
    } else {
        details.license_name.as_str()
    };

    let mut row = TableRow {
        name: format!("[{name}]({link})"),
        version: format!("v{}", details.version),
        description: details.description.clone(),
        license: format!("<strong>License:</strong> {license}"),
        publish_time: format!(
            "<strong>PublishTime:</strong> {}",
            format_publish_time(details.publish_time_millis)
        ),
        likes: likes_badge(details.likes, &link),
        downloads: downloads_badge(details.downloads, &link),
        popularity: popularity_badge(details.popularity, &link),
        points: points_badge(details.points, details.max_points, &link),
        issues: PLACEHOLDER.to_owned(),
        pull_requests: PLACEHOLDER.to_owned(),
        ..TableRow::default()
    };

    if let Some(github) = &details.github {
        row.stars = github_stars_badge(&github.link);
        row.issues = github_issues_badge(&github.link);
        row.pull_requests = github_pull_requests_badge(&github.link);
        row.contributors = contributors_table(github);
    }

    row
}

/// Avatar mini-table of the leading contributors with the total count.
///
/// Empty when no human contributor is known.
fn contributors_table(github: &GithubEnrichment) -> String {
    let top = &github.top_contributors;
    if top.is_empty() {
        return String::new();
    }

    let mut table = String::from("<table align=\"center\" border=\"0\">");
    match top.as_slice() {
        [only] => {
            table.push_str("<tr align=\"center\"><td>");
            table.push_str(&avatar(only, LEAD_AVATAR_WIDTH));
            table.push_str("</td></tr>");
        }
        [first, second] => {
            table.push_str("<tr align=\"center\"><td>");
            table.push_str(&avatar(first, AVATAR_WIDTH));
            table.push_str("</td><td>");
            table.push_str(&avatar(second, AVATAR_WIDTH));
            table.push_str("</td></tr>");
        }
        [first, second, third, ..] => {
            table.push_str("<tr align=\"center\"><td colspan=\"2\">");
            table.push_str(&avatar(first, LEAD_AVATAR_WIDTH));
            table.push_str("</td></tr><tr align=\"center\"><td>");
            table.push_str(&avatar(second, AVATAR_WIDTH));
            table.push_str("</td><td>");
            table.push_str(&avatar(third, AVATAR_WIDTH));
            table.push_str("</td></tr>");
        }
        [] => {}
    }

    let total = if github.stats.contributors_total >= CONTRIBUTORS_TOTAL_CAP {
        "99+".to_owned()
    } else {
        github.stats.contributors_total.to_string()
    };
    table.push_str(&format!(
        "<tr align=\"center\"><td colspan=\"2\"><a href=\"{GITHUB_WEB_URL}/{}/graphs/contributors\">Total: {total}</a></td></tr>",
        github.link.full_name()
    ));
    table.push_str("</table>");

    table
}

fn avatar(contributor: &Contributor, width: &str) -> String {
    format!(
        "<a href=\"{}\"><img width=\"{width}\" src=\"{}\" /></a>",
        contributor.profile_url, contributor.avatar_url
    )
}
