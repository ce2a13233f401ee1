// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Ordering of package records before rendering.
//!
//! Sorting is stable: records with equal keys keep their relative order.
//! Ascending publish-time order lists the newest package first, which is the
//! dashboard's established default and is kept as is.

use std::cmp::Ordering;

use crate::model::PackageRecord;

/// Field used to order the dashboard rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    /// Lexicographic package name.
    #[default]
    Name,
    /// Registry publish time.
    PublishTime,
    /// Registry likes.
    Likes,
    /// Registry downloads.
    Downloads,
    /// GitHub star count.
    GithubStars
}

impl SortField {
    /// Parses a sort key, falling back to [`SortField::Name`] for unknown
    /// values.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "publishTime" => Self::PublishTime,
            "ohpmLikes" => Self::Likes,
            "ohpmDownloads" => Self::Downloads,
            "githubStars" => Self::GithubStars,
            _ => Self::Name
        }
    }

    /// Returns the key accepted by [`SortField::parse`].
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PublishTime => "publishTime",
            Self::Likes => "ohpmLikes",
            Self::Downloads => "ohpmDownloads",
            Self::GithubStars => "githubStars"
        }
    }

    /// Comparison applied in ascending mode.
    fn ascending(self, left: &PackageRecord, right: &PackageRecord) -> Ordering {
        match self {
            Self::Name => left.name.cmp(&right.name),
            // newest first
            Self::PublishTime => right.publish_time_millis().cmp(&left.publish_time_millis()),
            Self::Likes => left.likes().cmp(&right.likes()),
            Self::Downloads => left.downloads().cmp(&right.downloads()),
            Self::GithubStars => left.stars().cmp(&right.stars())
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortMode {
    #[default]
    Asc,
    Desc
}

impl SortMode {
    /// Parses a sort mode, falling back to [`SortMode::Asc`] for unknown
    /// values.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "desc" => Self::Desc,
            _ => Self::Asc
        }
    }
}

/// Stable-sorts `records` in place by `field` in the requested `mode`.
///
/// # Example
///
/// ```
/// use ohpm_dashboard::{PackageRecord, SortField, SortMode, sort_records};
///
/// let mut records = vec![PackageRecord::unresolved("b"), PackageRecord::unresolved("a")];
/// sort_records(&mut records, SortField::Name, SortMode::Asc);
/// assert_eq!(records[0].name, "a");
/// ```
pub fn sort_records(records: &mut [PackageRecord], field: SortField, mode: SortMode) {
    match mode {
        SortMode::Asc => records.sort_by(|left, right| field.ascending(left, right)),
        SortMode::Desc => records.sort_by(|left, right| field.ascending(left, right).reverse())
    }
}
