// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-package fetching of registry and GitHub metadata.
//!
//! Packages are independent, so they are fetched with bounded concurrency.
//! The buffered stream yields records in input order, which keeps the
//! subsequent stable sort deterministic. Failures of one package never
//! affect another.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::{
    github::{GithubClient, resolve_github_link},
    model::{PackageDetails, PackageRecord},
    registry::{RegistryClient, RegistryPackage}
};

/// Fetches a single package.
///
/// An unknown package, or a failed detail request, yields an unresolved
/// record carrying the requested name. A failed description request leaves
/// the description empty.
pub async fn fetch_package(
    registry: &RegistryClient,
    github: &GithubClient,
    name: &str
) -> PackageRecord {
    let package = match registry.package_detail(name).await {
        Ok(Some(package)) => package,
        Ok(None) => {
            info!("Package {name} not found");
            return PackageRecord::unresolved(name);
        }
        Err(error) => {
            warn!("Package {name} detail unavailable: {error}");
            return PackageRecord::unresolved(name);
        }
    };

    let description = match registry.package_description(&package.name).await {
        Ok(description) => description,
        Err(error) => {
            warn!("Package {} description unavailable: {error}", package.name);
            String::new()
        }
    };

    let mut details = details_from(&package, description);
    if let Some(link) = resolve_github_link(&details.repository_url, &details.homepage) {
        details.github = Some(github.enrich(link).await);
    }

    info!("Package {name} resolved");
    PackageRecord::resolved(package.name, details)
}

/// Fetches all `names`, running at most `concurrency` packages at once.
///
/// The returned records are in the order of `names`.
pub async fn fetch_packages(
    registry: &RegistryClient,
    github: &GithubClient,
    names: &[String],
    concurrency: usize,
    progress: &ProgressBar
) -> Vec<PackageRecord> {
    stream::iter(names)
        .map(|name| fetch_package(registry, github, name))
        .buffered(concurrency.max(1))
        .inspect(|record| {
            progress.set_message(record.name.clone());
            progress.inc(1);
        })
        .collect()
        .await
}

fn details_from(package: &RegistryPackage, description: String) -> PackageDetails {
    PackageDetails {
        version: package.version.clone(),
        license_name: package.license.clone(),
        description,
        homepage: package.homepage.clone(),
        repository_url: package.repository.clone(),
        publish_time_millis: package.publish_time,
        points: package.points,
        max_points: package.point_detail.point,
        likes: package.likes,
        popularity: package.popularity,
        downloads: package.downloads,
        github: None
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, path_regex, query_param}
    };

    use super::*;
    use crate::model::PackageStatus;

    async fn clients(server: &MockServer) -> (RegistryClient, GithubClient) {
        let registry = RegistryClient::new(format!("{}/api", server.uri()), Duration::from_secs(5))
            .expect("registry client should build");
        let github = GithubClient::new(&server.uri(), None).expect("github client should build");
        (registry, github)
    }

    async fn mount_detail(server: &MockServer, name: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/detail/{name}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "body": body })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn resolved_package_merges_registry_fields() {
        let server = MockServer::start().await;
        mount_detail(
            &server,
            "alpha",
            serde_json::json!({
                "name": "alpha",
                "version": "1.2.3",
                "license": "Apache-2.0",
                "homepage": "https://example.com",
                "repository": "https://gitee.com/x/alpha",
                "publishTime": 1_700_000_000_000_i64,
                "points": 80,
                "likes": 5,
                "popularity": 60,
                "downloads": 900,
                "pointDetail": { "point": 110 }
            })
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("condition", "name:alpha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "body": { "rows": [{ "description": "Alpha package" }] }
            })))
            .mount(&server)
            .await;

        let (registry, github) = clients(&server).await;
        let record = fetch_package(&registry, &github, "alpha").await;

        let details = record.details().expect("expected resolved record");
        assert_eq!(record.name, "alpha");
        assert_eq!(details.version, "1.2.3");
        assert_eq!(details.license_name, "Apache-2.0");
        assert_eq!(details.description, "Alpha package");
        assert_eq!(details.max_points, 110);
        assert_eq!(details.downloads, 900);
        assert!(details.github.is_none());
    }

    #[tokio::test]
    async fn empty_detail_name_yields_unresolved_record() {
        let server = MockServer::start().await;
        mount_detail(&server, "ghost", serde_json::json!({ "name": "" })).await;

        let (registry, github) = clients(&server).await;
        let record = fetch_package(&registry, &github, "ghost").await;

        assert_eq!(record, PackageRecord::unresolved("ghost"));
    }

    #[tokio::test]
    async fn failed_detail_request_yields_unresolved_record() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex("^/api/detail/.*"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let (registry, github) = clients(&server).await;
        let record = fetch_package(&registry, &github, "flaky").await;

        assert!(matches!(record.status, PackageStatus::Unresolved));
    }

    #[tokio::test]
    async fn failed_description_keeps_package_resolved() {
        let server = MockServer::start().await;
        mount_detail(&server, "beta", serde_json::json!({ "name": "beta", "version": "0.1.0" }))
            .await;

        let (registry, github) = clients(&server).await;
        let record = fetch_package(&registry, &github, "beta").await;

        let details = record.details().expect("expected resolved record");
        assert_eq!(details.description, "");
        assert_eq!(details.version, "0.1.0");
    }

    #[tokio::test]
    async fn fetch_packages_preserves_input_order() {
        let server = MockServer::start().await;
        for name in ["one", "two", "three"] {
            mount_detail(&server, name, serde_json::json!({ "name": name })).await;
        }

        let (registry, github) = clients(&server).await;
        let names = vec!["three".to_owned(), "missing".to_owned(), "one".to_owned(), "two".to_owned()];
        let progress = ProgressBar::hidden();
        let records = fetch_packages(&registry, &github, &names, 3, &progress).await;

        let fetched: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
        assert_eq!(fetched, ["three", "missing", "one", "two"]);
        assert!(!records[1].is_resolved());
        assert_eq!(progress.position(), 4);
    }
}
