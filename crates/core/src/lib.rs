// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! qf-core: filter state that round-trips through URL query strings.
//!
//! This crate provides filter strategies (single, multiple, range, custom),
//! the registry of recognized filters, and [`FilterState`], which parses the
//! current query string into typed values and serializes them back.
//!
//! ```
//! use std::sync::Arc;
//! use qf_core::{FilterOptions, FilterRegistry, FilterState, FilterValue, StrategyFactory};
//!
//! let f = StrategyFactory::new();
//! let registry = FilterRegistry::builder()
//!     .filter("category", f.single(None))
//!     .filter("brands", f.multiple(Vec::<String>::new()))
//!     .build()?;
//!
//! let state = FilterState::from_query(
//!     Arc::new(registry),
//!     FilterOptions::default(),
//!     "?category=phones&brands=apple,samsung",
//! )?;
//!
//! assert_eq!(state.get("brands"), Some(&FilterValue::multiple(["apple", "samsung"])));
//! assert_eq!(state.serialize(true).to_string(), "category=phones&brands=apple%2Csamsung");
//! # Ok::<(), qf_core::Error>(())
//! ```

pub mod apply;
pub mod config;
pub mod error;
pub mod factory;
pub mod options;
pub mod query;
pub mod registry;
pub mod state;
pub mod strategy;
pub mod value;

pub use apply::{Applied, InFlight, PendingApply};
pub use config::{FilterConfig, FilterDecl, FilterKind};
pub use error::{CallbackError, Error, Result};
pub use factory::StrategyFactory;
pub use options::{
    ApplyCallback, ApplyOutcome, CallbackResult, FilterOptions, OptionsPatch, DEFAULT_DELIMITER,
};
pub use query::{Location, QueryParams, QuerySource, QueryString};
pub use registry::{FilterRegistry, RegistryBuilder};
pub use state::FilterState;
pub use strategy::{
    CustomFilter, CustomStrategy, FilterStrategy, KeyTransform, MultipleStrategy, RangeStrategy,
    SingleStrategy,
};
pub use value::{FilterShape, FilterValue, RangeValue};
