//! Settings describing a dashboard run.
//!
//! [`DashboardSettings`] mirrors the optional YAML settings file and the
//! command-line flags: every value is optional so documents can be layered.
//! [`DashboardConfig`] is the fully resolved configuration consumed by the
//! pipeline, produced by [`DashboardConfig::from_settings`] after defaults are
//! applied and invariants are checked.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{self, Error},
    sort::{SortField, SortMode}
};

/// Base URL of the OHPM open API.
pub const DEFAULT_REGISTRY_API_URL: &str =
    "https://ohpm.openharmony.cn/ohpmweb/registry/oh-package/openapi/v1";
/// Base URL of the OHPM package pages linked from the table.
pub const DEFAULT_REGISTRY_WEB_URL: &str = "https://ohpm.openharmony.cn/#/cn/detail";
/// Base URL of the GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// README patched when no filename is configured.
pub const DEFAULT_FILENAME: &str = "README.md";
/// Number of packages fetched concurrently by default.
pub const DEFAULT_CONCURRENCY: usize = 4;
/// Upper bound accepted for the fetch concurrency.
pub const MAX_CONCURRENCY: usize = 32;
/// Per-request timeout applied to registry calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Layered dashboard settings as read from YAML or the command line.
///
/// # Examples
///
/// ```
/// use ohpm_dashboard::DashboardSettings;
///
/// let yaml = r#"
/// publisherList: 6542179b6dad4e55f6635764
/// packageList: "@candies/extended_text, @candies/like_button"
/// sortField: ohpmDownloads
/// sortMode: desc
/// "#;
/// let settings: DashboardSettings = serde_yaml::from_str(yaml,).expect("valid settings",);
/// assert_eq!(settings.sort_mode.as_deref(), Some("desc"));
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DashboardSettings {
    /// Token used for authenticated GitHub requests.
    #[serde(default, alias = "githubToken", alias = "github-token")]
    pub github_token: Option<String>,

    /// README file containing the dashboard sentinels.
    #[serde(default)]
    pub filename: Option<PathBuf>,

    /// Comma-separated publisher IDs whose packages are listed.
    #[serde(default, alias = "publisherList", alias = "publisher-list")]
    pub publisher_list: Option<String>,

    /// Comma-separated package names listed in addition to publishers.
    #[serde(default, alias = "packageList", alias = "package-list")]
    pub package_list: Option<String>,

    /// Sort key: `name`, `publishTime`, `ohpmLikes`, `ohpmDownloads` or
    /// `githubStars`.
    #[serde(default, alias = "sortField", alias = "sort-field")]
    pub sort_field: Option<String>,

    /// Sort direction: `asc` or `desc`.
    #[serde(default, alias = "sortMode", alias = "sort-mode")]
    pub sort_mode: Option<String>,

    /// Number of packages fetched concurrently, constrained to
    /// `1..=MAX_CONCURRENCY`.
    #[serde(default, deserialize_with = "deserialize_optional_concurrency")]
    pub concurrency: Option<usize>,

    /// Registry API base URL override.
    #[serde(default, alias = "registryUrl", alias = "registry-url")]
    pub registry_url: Option<String>,

    /// GitHub API base URL override.
    #[serde(default, alias = "githubApiUrl", alias = "github-api-url")]
    pub github_api_url: Option<String>,

    /// Registry request timeout in seconds.
    #[serde(default, alias = "timeoutSecs", alias = "timeout-secs")]
    pub timeout_secs: Option<u64>
}

impl DashboardSettings {
    /// Layers `overrides` on top of `self`; values present in `overrides`
    /// win.
    #[must_use]
    pub fn merge(self, overrides: DashboardSettings) -> DashboardSettings {
        DashboardSettings {
            github_token:   overrides.github_token.or(self.github_token),
            filename:       overrides.filename.or(self.filename),
            publisher_list: overrides.publisher_list.or(self.publisher_list),
            package_list:   overrides.package_list.or(self.package_list),
            sort_field:     overrides.sort_field.or(self.sort_field),
            sort_mode:      overrides.sort_mode.or(self.sort_mode),
            concurrency:    overrides.concurrency.or(self.concurrency),
            registry_url:   overrides.registry_url.or(self.registry_url),
            github_api_url: overrides.github_api_url.or(self.github_api_url),
            timeout_secs:   overrides.timeout_secs.or(self.timeout_secs)
        }
    }
}

/// Loads settings from the YAML file located at `path`.
///
/// # Errors
///
/// Returns [`Error::Read`](Error::Read) when the file cannot be read and
/// [`Error::Parse`](Error::Parse) when the YAML cannot be decoded.
pub fn load_settings(path: &Path) -> Result<DashboardSettings, Error> {
    let contents = fs::read_to_string(path).map_err(|source| error::read_error(path, source))?;
    parse_settings(&contents)
}

/// Parses settings from a YAML document string.
///
/// An empty document yields default settings.
///
/// # Errors
///
/// Propagates [`Error::Parse`](Error::Parse) when the YAML cannot be decoded.
pub fn parse_settings(contents: &str) -> Result<DashboardSettings, Error> {
    if contents.trim().is_empty() {
        return Ok(DashboardSettings::default());
    }
    Ok(serde_yaml::from_str(contents)?)
}

fn deserialize_optional_concurrency<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: serde::Deserializer<'de>
{
    let value: Option<usize> = Option::deserialize(deserializer)?;
    if let Some(concurrency) = value
        && !(1..=MAX_CONCURRENCY).contains(&concurrency)
    {
        return Err(serde::de::Error::custom(format!(
            "concurrency must be between 1 and {MAX_CONCURRENCY}"
        )));
    }
    Ok(value)
}

/// Remote endpoints queried by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Registry open API base URL, without a trailing slash.
    pub registry_api: String,
    /// Registry web page prefix used for package links.
    pub registry_web: String,
    /// GitHub REST API base URL.
    pub github_api:   String
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            registry_api: DEFAULT_REGISTRY_API_URL.to_owned(),
            registry_web: DEFAULT_REGISTRY_WEB_URL.to_owned(),
            github_api:   DEFAULT_GITHUB_API_URL.to_owned()
        }
    }
}

/// Fully resolved configuration of a dashboard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub github_token: Option<String>,
    pub filename:     PathBuf,
    pub publishers:   String,
    pub packages:     String,
    pub sort_field:   SortField,
    pub sort_mode:    SortMode,
    /// Sort key as supplied by the user, shown in the table summary.
    pub sort_label:   String,
    pub concurrency:  usize,
    pub timeout:      Duration,
    pub endpoints:    Endpoints
}

impl DashboardConfig {
    /// Applies defaults to `settings` and validates the result.
    ///
    /// Unknown sort keys fall back to sorting by name and unknown sort modes
    /// fall back to ascending; neither is an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`](Error::Validation) when the concurrency
    /// or timeout is out of range or an endpoint URL is blank.
    pub fn from_settings(settings: DashboardSettings) -> Result<Self, Error> {
        let concurrency = settings.concurrency.unwrap_or(DEFAULT_CONCURRENCY);
        if !(1..=MAX_CONCURRENCY).contains(&concurrency) {
            return Err(Error::validation(format!(
                "concurrency must be between 1 and {MAX_CONCURRENCY}"
            )));
        }

        let timeout_secs = settings.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(Error::validation("timeout must be at least one second"));
        }

        let mut endpoints = Endpoints::default();
        if let Some(url) = settings.registry_url {
            endpoints.registry_api = normalize_base_url(&url, "registry url")?;
        }
        if let Some(url) = settings.github_api_url {
            endpoints.github_api = normalize_base_url(&url, "github api url")?;
        }

        let sort_label = settings
            .sort_field
            .map(|field| field.trim().to_owned())
            .filter(|field| !field.is_empty())
            .unwrap_or_else(|| SortField::Name.as_str().to_owned());
        let sort_mode = settings
            .sort_mode
            .as_deref()
            .map_or(SortMode::Asc, SortMode::parse);

        Ok(Self {
            github_token: settings
                .github_token
                .map(|token| token.trim().to_owned())
                .filter(|token| !token.is_empty()),
            filename: settings
                .filename
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILENAME)),
            publishers: settings.publisher_list.unwrap_or_default(),
            packages: settings.package_list.unwrap_or_default(),
            sort_field: SortField::parse(&sort_label),
            sort_mode,
            sort_label,
            concurrency,
            timeout: Duration::from_secs(timeout_secs),
            endpoints
        })
    }
}

fn normalize_base_url(url: &str, name: &str) -> Result<String, Error> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{name} cannot be empty")));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn defaults_apply_to_empty_settings() {
        let config =
            DashboardConfig::from_settings(DashboardSettings::default()).expect("valid config");

        assert_eq!(config.filename, PathBuf::from("README.md"));
        assert_eq!(config.sort_field, SortField::Name);
        assert_eq!(config.sort_mode, SortMode::Asc);
        assert_eq!(config.sort_label, "name");
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.endpoints, Endpoints::default());
        assert!(config.github_token.is_none());
    }

    #[test]
    fn settings_accept_camel_case_aliases() {
        let yaml = r#"
            githubToken: secret
            publisherList: abc,def
            packageList: "@a/b"
            sortField: githubStars
            sortMode: desc
            concurrency: 2
        "#;

        let settings = parse_settings(yaml).expect("expected settings to deserialize");
        assert_eq!(settings.github_token.as_deref(), Some("secret"));
        assert_eq!(settings.publisher_list.as_deref(), Some("abc,def"));
        assert_eq!(settings.package_list.as_deref(), Some("@a/b"));
        assert_eq!(settings.concurrency, Some(2));

        let config = DashboardConfig::from_settings(settings).expect("valid config");
        assert_eq!(config.sort_field, SortField::GithubStars);
        assert_eq!(config.sort_mode, SortMode::Desc);
    }

    #[test]
    fn settings_reject_out_of_range_concurrency() {
        let error = parse_settings("concurrency: 0").unwrap_err();
        assert!(error.to_string().contains("concurrency must be between 1 and"));
    }

    #[test]
    fn settings_reject_unknown_fields() {
        let error = parse_settings("colour: blue").unwrap_err();
        assert!(matches!(error, Error::Parse { .. }));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let settings = parse_settings("  \n").expect("empty settings");
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn merge_prefers_overrides() {
        let base = DashboardSettings {
            sort_field: Some("name".to_owned()),
            package_list: Some("@a/b".to_owned()),
            ..DashboardSettings::default()
        };
        let overrides = DashboardSettings {
            sort_field: Some("publishTime".to_owned()),
            ..DashboardSettings::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.sort_field.as_deref(), Some("publishTime"));
        assert_eq!(merged.package_list.as_deref(), Some("@a/b"));
    }

    #[test]
    fn unknown_sort_field_keeps_label_but_sorts_by_name() {
        let settings = DashboardSettings {
            sort_field: Some("stars".to_owned()),
            sort_mode: Some("sideways".to_owned()),
            ..DashboardSettings::default()
        };

        let config = DashboardConfig::from_settings(settings).expect("valid config");
        assert_eq!(config.sort_label, "stars");
        assert_eq!(config.sort_field, SortField::Name);
        assert_eq!(config.sort_mode, SortMode::Asc);
    }

    #[test]
    fn blank_token_is_treated_as_missing() {
        let settings = DashboardSettings {
            github_token: Some("   ".to_owned()),
            ..DashboardSettings::default()
        };

        let config = DashboardConfig::from_settings(settings).expect("valid config");
        assert!(config.github_token.is_none());
    }

    #[test]
    fn endpoint_overrides_are_trimmed() {
        let settings = DashboardSettings {
            registry_url: Some("http://localhost:8080/api/".to_owned()),
            ..DashboardSettings::default()
        };

        let config = DashboardConfig::from_settings(settings).expect("valid config");
        assert_eq!(config.endpoints.registry_api, "http://localhost:8080/api");
    }

    #[test]
    fn blank_endpoint_is_rejected() {
        let settings = DashboardSettings {
            github_api_url: Some(" / ".to_owned()),
            ..DashboardSettings::default()
        };

        let error = DashboardConfig::from_settings(settings).unwrap_err();
        match error {
            Error::Validation {
                message
            } => assert_eq!(message, "github api url cannot be empty"),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let settings = DashboardSettings {
            timeout_secs: Some(0),
            ..DashboardSettings::default()
        };

        assert!(DashboardConfig::from_settings(settings).is_err());
    }

    #[test]
    fn load_settings_reads_file() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("dashboard.yaml");
        fs::write(&path, "filename: docs/README.md\nsort_mode: desc\n")
            .expect("failed to write settings");

        let settings = load_settings(&path).expect("expected settings to load");
        assert_eq!(settings.filename, Some(PathBuf::from("docs/README.md")));
        assert_eq!(settings.sort_mode.as_deref(), Some("desc"));
    }

    #[test]
    fn load_settings_reports_missing_file() {
        let temp = tempdir().expect("failed to create tempdir");
        let path = temp.path().join("missing.yaml");

        let error = load_settings(&path).unwrap_err();
        assert!(matches!(error, Error::Read { .. }));
    }
}
