// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Expansion of publisher IDs into the package names they own.

use tracing::{info, warn};

use crate::{dedup::merge_identifiers, registry::RegistryClient};

/// Collects the package names published by each of `publisher_ids`.
///
/// Pages are requested from 1 upward until a page comes back empty. A failed
/// page is logged and ends the listing of that publisher only; the names
/// gathered so far are kept. The result is deduplicated.
pub async fn resolve_publisher_packages(
    registry: &RegistryClient,
    publisher_ids: &[String]
) -> Vec<String> {
    let mut names = Vec::new();

    for publisher_id in publisher_ids {
        let mut page = 1u32;
        loop {
            info!("Publisher {publisher_id}, page {page}");
            let rows = match registry.publisher_page(publisher_id, page).await {
                Ok(rows) => rows,
                Err(error) => {
                    warn!("Publisher {publisher_id} page {page} failed: {error}");
                    Vec::new()
                }
            };

            if rows.is_empty() {
                break;
            }

            names.extend(rows.into_iter().filter(|name| !name.is_empty()));
            page += 1;
        }
    }

    merge_identifiers(names.iter().map(String::as_str))
}
