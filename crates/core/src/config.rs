// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative filter sets.
//!
//! A filter set can be described in TOML or JSON instead of code:
//!
//! ```toml
//! delimiter = ","
//! preserve_url_order = true
//! key_namespace = "filter"   # keys become filter[name]
//!
//! [[filters]]
//! name = "category"
//! kind = "single"
//!
//! [[filters]]
//! name = "brands"
//! kind = "multiple"
//! default = ["apple"]
//!
//! [[filters]]
//! name = "price"
//! kind = "range"
//! from = "0"
//! ```
//!
//! Filters are registered in the order they are listed. Custom strategies
//! have no declarative form.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::factory::StrategyFactory;
use crate::options::{FilterOptions, DEFAULT_DELIMITER};
use crate::registry::FilterRegistry;
use crate::value::RangeValue;

/// A filter set loaded from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Joins multiple and range values (default: `,`).
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Order applied output by the current URL first (default: true).
    #[serde(default = "default_preserve_url_order")]
    pub preserve_url_order: bool,
    /// Nest every key as `namespace[name]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_namespace: Option<String>,
    #[serde(default)]
    pub filters: Vec<FilterDecl>,
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

fn default_preserve_url_order() -> bool {
    true
}

/// One declared filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDecl {
    pub name: String,
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// The declared shape of a filter and its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterKind {
    Single {
        #[serde(default)]
        default: Option<String>,
    },
    Multiple {
        #[serde(default)]
        default: Vec<String>,
    },
    Range {
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
    },
}

impl FilterConfig {
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or the filter set is invalid.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: FilterConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the filter set is invalid.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: FilterConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks for an empty delimiter, empty names and duplicate names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::Config("delimiter must not be empty".to_string()));
        }
        for (i, decl) in self.filters.iter().enumerate() {
            if decl.name.trim().is_empty() {
                return Err(Error::Config(format!("filter #{} has an empty name", i + 1)));
            }
            if self.filters[..i].iter().any(|other| other.name == decl.name) {
                return Err(Error::Config(format!("filter '{}' is declared twice", decl.name)));
            }
        }
        Ok(())
    }

    /// The factory implied by `key_namespace`.
    pub fn factory(&self) -> StrategyFactory {
        match &self.key_namespace {
            Some(namespace) => StrategyFactory::nested(namespace.clone()),
            None => StrategyFactory::new(),
        }
    }

    /// Builds the declared registry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFilter`] if a name is declared twice.
    pub fn registry(&self) -> Result<FilterRegistry> {
        let factory = self.factory();
        let entries = self.filters.iter().map(|decl| {
            let strategy = match &decl.kind {
                FilterKind::Single { default } => factory.single(default.clone()),
                FilterKind::Multiple { default } => factory.multiple(default.iter().cloned()),
                FilterKind::Range { from, to } => {
                    factory.range(RangeValue::new(from.clone(), to.clone()))
                }
            };
            (decl.name.clone(), strategy)
        });
        FilterRegistry::new(entries)
    }

    /// Options with the declared delimiter and ordering and no callback.
    pub fn options(&self) -> FilterOptions {
        FilterOptions::default()
            .with_delimiter(self.delimiter.clone())
            .with_preserve_url_order(self.preserve_url_order)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
