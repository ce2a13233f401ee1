// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! HTTP client for the OHPM registry open API.
//!
//! Three endpoints are used: the publisher search listing, the package detail
//! lookup and the name-filtered search that carries package descriptions.
//! Every response is wrapped in a `{ "body": ... }` envelope whose fields may
//! be missing or `null`; both decode to zero values.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::debug;

use crate::{badge::escape_path_segment, error::Error};

/// Page size requested from the publisher search endpoint.
pub const PUBLISHER_PAGE_SIZE: u32 = 10;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Package detail as returned by the registry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegistryPackage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name:         String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version:      String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub license:      String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub homepage:     String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repository:   String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publish_time: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points:       u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes:        u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity:   u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub downloads:    u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub point_detail: PointDetail
}

/// Maximum attainable points of a package.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct PointDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub point: u64
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    body: Option<T>
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Rows<T> {
    #[serde(default, deserialize_with = "null_as_default")]
    rows: Vec<T>
}

#[derive(Debug, Deserialize)]
struct NameRow {
    #[serde(default, deserialize_with = "null_as_default")]
    name: String
}

#[derive(Debug, Deserialize)]
struct DescriptionRow {
    #[serde(default, deserialize_with = "null_as_default")]
    description: String
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Thin typed wrapper over the registry endpoints.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http:     Client,
    base_url: String
}

impl RegistryClient {
    /// Builds a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`](Error::Service) when the HTTP client cannot
    /// be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::service(format!("failed to build registry client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned()
        })
    }

    /// Returns the package names listed on one page of a publisher's search
    /// results. An empty vector marks the end of the listing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](Error::Http) when the request or decoding
    /// fails.
    pub async fn publisher_page(&self, publisher_id: &str, page: u32) -> Result<Vec<String>, Error> {
        let page = page.to_string();
        let page_size = PUBLISHER_PAGE_SIZE.to_string();
        let envelope: Envelope<Rows<NameRow>> = self
            .get_json(
                self.search_url(),
                &[
                    ("publisherId", publisher_id),
                    ("pageNum", page.as_str()),
                    ("pageSize", page_size.as_str()),
                    ("sortedType", "latest"),
                    ("isHomePage", "false"),
                    ("condition", "")
                ]
            )
            .await?;

        Ok(envelope
            .body
            .map(|body| body.rows.into_iter().map(|row| row.name).collect())
            .unwrap_or_default())
    }

    /// Looks a package up by name.
    ///
    /// Returns `None` when the registry answers without a package name, which
    /// is how unknown packages are reported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](Error::Http) when the request or decoding
    /// fails.
    pub async fn package_detail(&self, name: &str) -> Result<Option<RegistryPackage>, Error> {
        let envelope: Envelope<RegistryPackage> =
            self.get_json(self.detail_url(name), &[]).await?;

        Ok(envelope.body.filter(|package| !package.name.is_empty()))
    }

    /// Returns the description of the first search hit for the exact package
    /// name, or an empty string without hits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`](Error::Http) when the request or decoding
    /// fails.
    pub async fn package_description(&self, name: &str) -> Result<String, Error> {
        let condition = format!("name:{name}");
        let envelope: Envelope<Rows<DescriptionRow>> = self
            .get_json(
                self.search_url(),
                &[
                    ("condition", condition.as_str()),
                    ("pageNum", "1"),
                    ("pageSize", "10"),
                    ("sortedType", "relevancy"),
                    ("isHomePage", "false")
                ]
            )
            .await?;

        Ok(envelope
            .body
            .and_then(|body| body.rows.into_iter().next())
            .map(|row| row.description)
            .unwrap_or_default())
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn detail_url(&self, name: &str) -> String {
        format!("{}/detail/{}", self.base_url, escape_path_segment(name))
    }

    async fn get_json<T>(&self, url: String, query: &[(&str, &str)]) -> Result<T, Error>
    where
        T: DeserializeOwned
    {
        debug!("GET {url} {query:?}");
        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| Error::http(url.as_str(), source))?;

        response
            .json::<T>()
            .await
            .map_err(|source| Error::http(url, source))
    }
}
