#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the dashboard crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.
//!
//! Only a handful of failures are fatal for a dashboard run: reading or
//! writing the target README, decoding the YAML settings file, and invalid
//! command-line values. Every remote API failure is reported through the same
//! type but is logged and swallowed by the pipeline stages.

use std::path::{Path, PathBuf};

/// Unified error type returned by the pipeline stages and the CLI.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading the README or settings.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// Location of the file being read.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps I/O errors that occur while writing the patched README.
    #[error("failed to write {path:?}: {source}")]
    Write {
        /// Location of the file being written.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors of the settings file.
    #[error("failed to parse settings: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Wraps JSON encoding errors while printing records.
    #[error("failed to serialize records: {source}")]
    Serialize {
        /// Source encoding error from serde_json.
        source: serde_json::Error
    },
    /// Returned when settings or command-line values violate invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Registry request or response decoding failure.
    #[error("registry request to {endpoint} failed: {source}")]
    Http {
        /// Endpoint that was being queried.
        endpoint: String,
        /// Underlying transport or decoding error.
        source:   reqwest::Error
    },
    /// GitHub API failure reported by octocrab.
    #[error("GitHub request failed: {source}")]
    GitHub {
        /// Underlying octocrab error.
        source: octocrab::Error
    },
    /// Service errors when constructing clients for external APIs.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a service error from the provided displayable value.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Wraps a registry transport error together with the queried endpoint.
    pub fn http<E>(endpoint: E, source: reqwest::Error) -> Self
    where
        E: Into<String>
    {
        Self::Http {
            endpoint: endpoint.into(),
            source
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(source: octocrab::Error) -> Self {
        Self::GitHub {
            source
        }
    }
}

/// Creates an [`Error::Read`] variant capturing the failing path and source.
pub fn read_error(path: &Path, source: std::io::Error) -> Error {
    Error::Read {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Write`] variant capturing the failing path and source.
pub fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source
    }
}
