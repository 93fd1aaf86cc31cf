// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Strategy factory.
//!
//! Every strategy built by one factory shares the factory's key transform.
//! Building a new factory with a different transform is the only way to
//! rewrite keys:
//!
//! ```
//! use qf_core::{FilterStrategy, StrategyFactory};
//!
//! let f = StrategyFactory::nested("filter");
//! let brands = f.multiple(Vec::<String>::new());
//! assert_eq!(brands.key("brands"), "filter[brands]");
//! ```

use std::sync::Arc;

use crate::strategy::{
    CustomFilter, CustomStrategy, FilterStrategy, KeyTransform, MultipleStrategy, RangeStrategy,
    SingleStrategy,
};
use crate::value::RangeValue;

/// Builds filter strategies that share one key transform.
#[derive(Debug, Clone, Default)]
pub struct StrategyFactory {
    keys: KeyTransform,
}

impl StrategyFactory {
    /// A factory whose strategies use filter names as keys.
    pub fn new() -> Self {
        StrategyFactory::default()
    }

    pub fn with_key_transform(keys: KeyTransform) -> Self {
        StrategyFactory { keys }
    }

    /// A factory whose strategies nest keys as `prefix[name]`.
    pub fn nested(prefix: impl Into<String>) -> Self {
        StrategyFactory::with_key_transform(KeyTransform::nested(prefix))
    }

    /// The no-op key rewrite.
    pub fn identity(name: &str) -> String {
        name.to_string()
    }

    pub fn key_transform(&self) -> &KeyTransform {
        &self.keys
    }

    pub fn single(&self, default: Option<String>) -> Arc<dyn FilterStrategy> {
        Arc::new(SingleStrategy::new(default, self.keys.clone()))
    }

    pub fn multiple<I, S>(&self, default: I) -> Arc<dyn FilterStrategy>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let default = default.into_iter().map(Into::into).collect();
        Arc::new(MultipleStrategy::new(default, self.keys.clone()))
    }

    pub fn range(&self, default: RangeValue) -> Arc<dyn FilterStrategy> {
        Arc::new(RangeStrategy::new(default, self.keys.clone()))
    }

    pub fn custom<F>(&self, filter: F) -> Arc<dyn FilterStrategy>
    where
        F: CustomFilter + 'static,
    {
        Arc::new(CustomStrategy::new(filter, self.keys.clone()))
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
