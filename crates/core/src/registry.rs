// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed set of recognized filters.
//!
//! A registry maps filter names to strategies in insertion order. It is built
//! once and never mutated; its order is the default serialization order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::strategy::FilterStrategy;

/// An insertion-ordered, immutable mapping of filter name to strategy.
#[derive(Debug, Default)]
pub struct FilterRegistry {
    entries: Vec<(String, Arc<dyn FilterStrategy>)>,
    index: HashMap<String, usize>,
}

impl FilterRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Builds a registry from `(name, strategy)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateFilter`] if a name appears twice.
    pub fn new<I, N>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, Arc<dyn FilterStrategy>)>,
        N: Into<String>,
    {
        let mut registry = FilterRegistry::default();
        for (name, strategy) in entries {
            let name = name.into();
            if registry.index.contains_key(&name) {
                return Err(Error::DuplicateFilter(name));
            }
            registry.index.insert(name.clone(), registry.entries.len());
            registry.entries.push((name, strategy));
        }
        Ok(registry)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FilterStrategy>> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Filter names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, strategy)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn FilterStrategy>)> {
        self.entries.iter().map(|(name, strategy)| (name.as_str(), strategy))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects filters for a [`FilterRegistry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<(String, Arc<dyn FilterStrategy>)>,
}

impl RegistryBuilder {
    pub fn filter(mut self, name: impl Into<String>, strategy: Arc<dyn FilterStrategy>) -> Self {
        self.entries.push((name.into(), strategy));
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::DuplicateFilter`] if a name was added twice.
    pub fn build(self) -> Result<FilterRegistry> {
        FilterRegistry::new(self.entries)
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
