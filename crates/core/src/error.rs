// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for qf-core operations.

use thiserror::Error;

use crate::value::FilterShape;

/// Error returned by a failed apply callback.
pub type CallbackError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All possible errors that can occur in qf-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown filter: '{0}'")]
    UnknownFilter(String),

    #[error("duplicate filter: '{0}'\n  hint: each filter name can be registered only once")]
    DuplicateFilter(String),

    #[error("filter '{name}' holds {expected} values, got {found}")]
    ShapeMismatch {
        name: String,
        expected: FilterShape,
        found: FilterShape,
    },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("apply callback failed: {0}")]
    Callback(#[source] CallbackError),

    #[error("config error: {0}")]
    Config(String),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for qf-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
