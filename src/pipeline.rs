// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! End-to-end dashboard generation.
//!
//! Stages run strictly in order: publisher expansion, merge and dedup of the
//! package names, concurrent fetching, sorting and rendering. Only the
//! fetching stage runs packages concurrently.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::{
    config::DashboardConfig,
    dedup::{dedup_identifiers, merge_identifiers},
    error::Error,
    fetcher::fetch_packages,
    github::GithubClient,
    model::PackageRecord,
    publisher::resolve_publisher_packages,
    registry::RegistryClient,
    render::render_table,
    sort::sort_records
};

/// Rendered dashboard together with the records it was built from.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Records in table order.
    pub records: Vec<PackageRecord>,
    /// Markdown table including the summary line.
    pub table:   String
}

impl DashboardReport {
    /// Number of rows, resolved or not.
    pub fn total(&self) -> usize {
        self.records.len()
    }
}

/// Configured clients and settings for a dashboard run.
#[derive(Debug)]
pub struct Dashboard {
    config:        DashboardConfig,
    registry:      RegistryClient,
    github:        GithubClient,
    show_progress: bool
}

impl Dashboard {
    /// Builds the registry and GitHub clients described by `config`.
    ///
    /// Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] or [`Error::GitHub`] when a client cannot
    /// be initialized.
    pub fn new(config: DashboardConfig) -> Result<Self, Error> {
        let registry = RegistryClient::new(config.endpoints.registry_api.clone(), config.timeout)?;
        let github = GithubClient::new(&config.endpoints.github_api, config.github_token.as_deref())?;

        Ok(Self {
            config,
            registry,
            github,
            show_progress: false
        })
    }

    /// Enables the package progress bar on stderr.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Settings this dashboard was built from.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Resolves, fetches and sorts every configured package.
    pub async fn collect(&self) -> Vec<PackageRecord> {
        let publishers = dedup_identifiers(&self.config.publishers);
        info!("Resolving {} publisher(s)", publishers.len());
        let published = resolve_publisher_packages(&self.registry, &publishers).await;

        let names = merge_identifiers(
            published
                .iter()
                .map(String::as_str)
                .chain(self.config.packages.split(','))
        );
        info!("Fetching {} package(s)", names.len());

        let progress = self.progress_bar(names.len() as u64);
        let mut records = fetch_packages(
            &self.registry,
            &self.github,
            &names,
            self.config.concurrency,
            &progress
        )
        .await;
        progress.finish_and_clear();

        let unresolved = records.iter().filter(|record| !record.is_resolved()).count();
        info!(
            "Fetched {} package(s), {unresolved} unresolved",
            records.len()
        );

        sort_records(&mut records, self.config.sort_field, self.config.sort_mode);
        records
    }

    /// Runs every stage and renders the table.
    pub async fn build(&self) -> DashboardReport {
        let records = self.collect().await;
        let table = render_table(
            &records,
            &self.config.sort_label,
            &self.config.endpoints.registry_web
        );

        DashboardReport {
            records,
            table
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
        );
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}
