// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Package records produced by the fetch stage.
//!
//! A record is created once per requested package name, enriched with GitHub
//! data while it is being fetched, and is read-only afterwards. Packages the
//! registry does not know about are represented by
//! [`PackageStatus::Unresolved`], which carries nothing but the requested
//! name, so renderers and sorters branch on the status instead of inspecting
//! zero-valued fields.

use serde::Serialize;

/// Merged registry and GitHub metadata for a single package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Package name as reported by the registry, or as requested when
    /// unresolved.
    pub name:   String,
    /// Resolution outcome of the registry lookup.
    pub status: PackageStatus
}

/// Outcome of looking a package up in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackageStatus {
    /// The registry returned package details.
    Resolved(Box<PackageDetails>),
    /// The registry did not return a package with the requested name.
    Unresolved
}

/// Registry metadata of a resolved package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageDetails {
    pub version:             String,
    pub license_name:        String,
    pub description:         String,
    pub homepage:            String,
    pub repository_url:      String,
    /// Publish time in epoch milliseconds.
    pub publish_time_millis: i64,
    pub points:              u64,
    pub max_points:          u64,
    pub likes:               u64,
    pub popularity:          u64,
    pub downloads:           u64,
    /// GitHub enrichment, present only when a GitHub link was found.
    pub github:              Option<GithubEnrichment>
}

/// Owner and repository name extracted from a GitHub URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GithubLink {
    pub owner: String,
    pub repo:  String
}

impl GithubLink {
    /// Returns the `owner/repo` path used by GitHub and shields.io URLs.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for GithubLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Repository statistics reported by the GitHub API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GithubStats {
    pub stars:              u64,
    pub forks:              u64,
    pub open_issues:        u64,
    pub license_name:       String,
    /// Number of contributors on the first page of the listing, so at most
    /// 100. Bots and organizations are included in this count.
    pub contributors_total: usize
}

/// Human contributor shown in the avatar table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub login:       String,
    pub id:          u64,
    pub avatar_url:  String,
    pub profile_url: String
}

/// GitHub data attached to a resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GithubEnrichment {
    pub link:             GithubLink,
    pub stats:            GithubStats,
    /// Up to three `User` contributors in API order.
    pub top_contributors: Vec<Contributor>
}

impl PackageRecord {
    /// Creates a record for a package the registry could not resolve.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            status: PackageStatus::Unresolved
        }
    }

    /// Creates a record for a package with registry details.
    pub fn resolved(name: impl Into<String>, details: PackageDetails) -> Self {
        Self {
            name:   name.into(),
            status: PackageStatus::Resolved(Box::new(details))
        }
    }

    /// Returns the registry details when the package was resolved.
    pub fn details(&self) -> Option<&PackageDetails> {
        match &self.status {
            PackageStatus::Resolved(details) => Some(details),
            PackageStatus::Unresolved => None
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.status, PackageStatus::Resolved(_))
    }

    pub fn publish_time_millis(&self) -> i64 {
        self.details().map_or(0, |details| details.publish_time_millis)
    }

    pub fn likes(&self) -> u64 {
        self.details().map_or(0, |details| details.likes)
    }

    pub fn downloads(&self) -> u64 {
        self.details().map_or(0, |details| details.downloads)
    }

    /// GitHub star count, zero without a GitHub link.
    pub fn stars(&self) -> u64 {
        self.details()
            .and_then(|details| details.github.as_ref())
            .map_or(0, |github| github.stats.stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_record_exposes_zero_metrics() {
        let record = PackageRecord::unresolved("@scope/missing");
        assert!(!record.is_resolved());
        assert!(record.details().is_none());
        assert_eq!(record.likes(), 0);
        assert_eq!(record.downloads(), 0);
        assert_eq!(record.stars(), 0);
        assert_eq!(record.publish_time_millis(), 0);
    }

    #[test]
    fn stars_come_from_github_enrichment() {
        let details = PackageDetails {
            github: Some(GithubEnrichment {
                link:             GithubLink {
                    owner: "octocat".to_owned(),
                    repo:  "hello".to_owned()
                },
                stats:            GithubStats {
                    stars: 42,
                    ..GithubStats::default()
                },
                top_contributors: Vec::new()
            }),
            ..PackageDetails::default()
        };
        let record = PackageRecord::resolved("hello", details);
        assert_eq!(record.stars(), 42);
    }

    #[test]
    fn github_link_formats_full_name() {
        let link = GithubLink {
            owner: "foo".to_owned(),
            repo:  "bar".to_owned()
        };
        assert_eq!(link.full_name(), "foo/bar");
        assert_eq!(link.to_string(), "foo/bar");
    }

    #[test]
    fn unresolved_record_serializes_status_tag() {
        let record = PackageRecord::unresolved("missing");
        let json = serde_json::to_value(&record).expect("serialization failed");
        assert_eq!(json["status"]["status"], "unresolved");
        assert_eq!(json["name"], "missing");
    }
}
