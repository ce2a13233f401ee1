// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Patches the rendered dashboard into a markdown file.
///
/// Two sentinel pairs are recognised:
/// - `<!-- md:OHPMDashboard begin -->` / `<!-- md:OHPMDashboard end -->`
///   around the dashboard table
/// - `<!-- md:OHPMDashboard-total begin -->` / `<!-- md:OHPMDashboard-total
///   end -->` around the package count
///
/// Every occurrence of a pair is replaced; text outside the sentinels is left
/// untouched.
use std::{fs, path::Path, sync::LazyLock};

use chrono::{SecondsFormat, Utc};
use regex::{NoExpand, Regex};
use tracing::{debug, info, warn};

use crate::error::{self, Error};

const DASHBOARD_BEGIN: &str = "<!-- md:OHPMDashboard begin -->";
const DASHBOARD_END: &str = "<!-- md:OHPMDashboard end -->";
const TOTAL_BEGIN: &str = "<!-- md:OHPMDashboard-total begin -->";
const TOTAL_END: &str = "<!-- md:OHPMDashboard-total end -->";
const ATTRIBUTION: &str = "by [Action](https://github.com/AmosHuKe/ohpm-dashboard).";

static DASHBOARD_SECTION: LazyLock<Regex> =
    LazyLock::new(|| sentinel_regex(DASHBOARD_BEGIN, DASHBOARD_END));
static TOTAL_SECTION: LazyLock<Regex> = LazyLock::new(|| sentinel_regex(TOTAL_BEGIN, TOTAL_END));

fn sentinel_regex(begin: &str, end: &str) -> Regex {
    Regex::new(&format!("{}(?s)(.*?){}", regex::escape(begin), regex::escape(end)))
        .expect("valid regex")
}

/// Rewrites `path` with the dashboard `table` and the package `total`.
///
/// Returns `true` when the file content changed and was written. Missing
/// sentinels are logged and leave the file as it is.
///
/// # Errors
///
/// Returns [`Error::Read`] or [`Error::Write`] when the file cannot be read
/// or written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use ohpm_dashboard::update_readme;
///
/// # fn main() -> Result<(), ohpm_dashboard::Error> {
/// let changed = update_readme(Path::new("README.md"), "| table |", 1)?;
/// println!("README changed: {changed}");
/// # Ok(())
/// # }
/// ```
pub fn update_readme(path: &Path, table: &str, total: usize) -> Result<bool, Error> {
    info!("Reading {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| error::read_error(path, source))?;

    let updated_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let updated = patch_readme(&content, table, total, &updated_at);

    if updated == content {
        info!("No changes to {}", path.display());
        return Ok(false);
    }

    fs::write(path, updated).map_err(|source| error::write_error(path, source))?;
    info!("Updated {}", path.display());
    Ok(true)
}

/// Applies both sentinel replacements to `content`.
///
/// `updated_at` is inserted verbatim into the attribution line.
pub fn patch_readme(content: &str, table: &str, total: usize, updated_at: &str) -> String {
    let content = patch_dashboard(content, table, updated_at);
    patch_total(&content, total)
}

/// Replaces every dashboard section with `table` and the attribution line.
pub fn patch_dashboard(content: &str, table: &str, updated_at: &str) -> String {
    if !DASHBOARD_SECTION.is_match(content) {
        warn!("Dashboard sentinels not found; table not written");
        return content.to_owned();
    }

    let section = format!(
        "{DASHBOARD_BEGIN} \n{table} \nUpdated on {updated_at} {ATTRIBUTION} \n{DASHBOARD_END}"
    );
    debug!("Replacing dashboard section ({} bytes)", section.len());
    DASHBOARD_SECTION
        .replace_all(content, NoExpand(&section))
        .into_owned()
}

/// Replaces every total section with `total`.
pub fn patch_total(content: &str, total: usize) -> String {
    if !TOTAL_SECTION.is_match(content) {
        debug!("Total sentinels not found");
        return content.to_owned();
    }

    let section = format!("{TOTAL_BEGIN}{total}{TOTAL_END}");
    TOTAL_SECTION
        .replace_all(content, NoExpand(&section))
        .into_owned()
}
