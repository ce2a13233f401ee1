//! Dashboard generator for OpenHarmony (OHPM) packages.
//!
//! The library expands publisher IDs into package names, fetches registry
//! metadata and GitHub statistics for each package, sorts the results and
//! renders a markdown table that is patched into a README between sentinel
//! comments. Remote failures never abort a run; they are logged and the
//! affected values fall back to zero. Only file I/O, settings decoding and
//! invalid configuration are reported as errors.

mod badge;
mod config;
mod contributors;
mod dedup;
mod error;
mod fetcher;
mod github;
mod model;
mod pipeline;
mod publisher;
mod readme;
mod registry;
mod render;
mod sort;

pub use badge::PointsTier;
pub use config::{
    DashboardConfig, DashboardSettings, Endpoints, load_settings, parse_settings,
    DEFAULT_CONCURRENCY, DEFAULT_FILENAME, MAX_CONCURRENCY
};
pub use contributors::{ContributorsPage, fetch_top_contributors};
pub use dedup::{dedup_identifiers, merge_identifiers};
pub use error::Error;
pub use fetcher::{fetch_package, fetch_packages};
pub use github::{GithubClient, parse_github_link, resolve_github_link};
pub use model::{
    Contributor, GithubEnrichment, GithubLink, GithubStats, PackageDetails, PackageRecord,
    PackageStatus
};
pub use pipeline::{Dashboard, DashboardReport};
pub use publisher::resolve_publisher_packages;
pub use readme::{patch_dashboard, patch_readme, patch_total, update_readme};
pub use registry::{RegistryClient, RegistryPackage};
pub use render::{format_publish_time, render_table, sanitize_description};
pub use sort::{SortField, SortMode, sort_records};
