// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter strategies: the parse/serialize/match contract for one value shape.
//!
//! Strategies are fail-soft. Missing or malformed query input degrades to the
//! strategy's default value and is never reported as an error. A value of the
//! wrong shape serializes to nothing and matches nothing.

use std::fmt;
use std::sync::Arc;

use crate::value::{FilterShape, FilterValue, RangeValue};

/// The parse/serialize/match contract for one filter.
pub trait FilterStrategy: Send + Sync + fmt::Debug {
    /// Returns a fresh copy of the configured default.
    fn default_value(&self) -> FilterValue;

    /// Returns the query-string key used for the filter called `name`.
    fn key(&self, name: &str) -> String;

    /// Returns the shape of values this strategy produces.
    fn shape(&self) -> FilterShape;

    /// Parses a raw query-string value, falling back to the default.
    fn parse(&self, raw: Option<&str>, delimiter: &str) -> FilterValue;

    /// Serializes a value, or returns `None` when it should be omitted.
    fn serialize(&self, value: &FilterValue, delimiter: &str) -> Option<String>;

    /// Returns true if `candidate` is selected by `value`.
    fn matches(&self, value: &FilterValue, candidate: &str) -> bool;
}

/// Rewrites filter names into query-string keys.
#[derive(Clone)]
pub struct KeyTransform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl KeyTransform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        KeyTransform(Arc::new(f))
    }

    /// Leaves names untouched.
    pub fn identity() -> Self {
        KeyTransform::new(|name| name.to_string())
    }

    /// Nests names under `prefix`, e.g. `filter[brands]`.
    pub fn nested(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        KeyTransform::new(move |name| format!("{prefix}[{name}]"))
    }

    pub fn apply(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl Default for KeyTransform {
    fn default() -> Self {
        KeyTransform::identity()
    }
}

impl fmt::Debug for KeyTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyTransform")
    }
}

/// Treats absent and empty raw values alike.
fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|s| !s.is_empty())
}

/// A filter holding one scalar or nothing.
#[derive(Debug, Clone)]
pub struct SingleStrategy {
    default: Option<String>,
    keys: KeyTransform,
}

impl SingleStrategy {
    pub fn new(default: Option<String>, keys: KeyTransform) -> Self {
        SingleStrategy { default, keys }
    }
}

impl FilterStrategy for SingleStrategy {
    fn default_value(&self) -> FilterValue {
        FilterValue::Single(self.default.clone())
    }

    fn key(&self, name: &str) -> String {
        self.keys.apply(name)
    }

    fn shape(&self) -> FilterShape {
        FilterShape::Single
    }

    fn parse(&self, raw: Option<&str>, _delimiter: &str) -> FilterValue {
        match present(raw) {
            Some(raw) => FilterValue::Single(Some(raw.to_string())),
            None => self.default_value(),
        }
    }

    fn serialize(&self, value: &FilterValue, _delimiter: &str) -> Option<String> {
        match value {
            FilterValue::Single(Some(v)) if !v.is_empty() => Some(v.clone()),
            _ => None,
        }
    }

    fn matches(&self, value: &FilterValue, candidate: &str) -> bool {
        value.as_single() == Some(candidate)
    }
}

/// A filter holding an ordered list of scalars.
#[derive(Debug, Clone)]
pub struct MultipleStrategy {
    default: Vec<String>,
    keys: KeyTransform,
}

impl MultipleStrategy {
    pub fn new(default: Vec<String>, keys: KeyTransform) -> Self {
        MultipleStrategy { default, keys }
    }
}

impl FilterStrategy for MultipleStrategy {
    fn default_value(&self) -> FilterValue {
        FilterValue::Multiple(self.default.clone())
    }

    fn key(&self, name: &str) -> String {
        self.keys.apply(name)
    }

    fn shape(&self) -> FilterShape {
        FilterShape::Multiple
    }

    fn parse(&self, raw: Option<&str>, delimiter: &str) -> FilterValue {
        match present(raw) {
            Some(raw) => FilterValue::Multiple(raw.split(delimiter).map(str::to_string).collect()),
            None => self.default_value(),
        }
    }

    fn serialize(&self, value: &FilterValue, delimiter: &str) -> Option<String> {
        match value {
            FilterValue::Multiple(values) if !values.is_empty() => Some(values.join(delimiter)),
            _ => None,
        }
    }

    fn matches(&self, value: &FilterValue, candidate: &str) -> bool {
        value.as_multiple().is_some_and(|values| values.iter().any(|v| v == candidate))
    }
}

/// A filter holding a `from`/`to` pair.
///
/// `matches` tests equality with either endpoint, not containment: with a
/// range of `100..500`, the candidate `250` does not match.
#[derive(Debug, Clone)]
pub struct RangeStrategy {
    default: RangeValue,
    keys: KeyTransform,
}

impl RangeStrategy {
    pub fn new(default: RangeValue, keys: KeyTransform) -> Self {
        RangeStrategy { default, keys }
    }
}

impl FilterStrategy for RangeStrategy {
    fn default_value(&self) -> FilterValue {
        FilterValue::Range(self.default.clone())
    }

    fn key(&self, name: &str) -> String {
        self.keys.apply(name)
    }

    fn shape(&self) -> FilterShape {
        FilterShape::Range
    }

    fn parse(&self, raw: Option<&str>, delimiter: &str) -> FilterValue {
        let Some(raw) = present(raw) else {
            return self.default_value();
        };

        // Extra parts beyond the second are ignored
        let mut parts = raw.split(delimiter);
        let mut endpoint = |fallback: &Option<String>| {
            present(parts.next()).map(str::to_string).or_else(|| fallback.clone())
        };
        let from = endpoint(&self.default.from);
        let to = endpoint(&self.default.to);

        FilterValue::Range(RangeValue { from, to })
    }

    fn serialize(&self, value: &FilterValue, delimiter: &str) -> Option<String> {
        let range = value.as_range()?;
        let from = range.from.as_deref().unwrap_or_default();
        let to = range.to.as_deref().unwrap_or_default();
        if from.is_empty() && to.is_empty() {
            return None;
        }
        Some(format!("{from}{delimiter}{to}"))
    }

    fn matches(&self, value: &FilterValue, candidate: &str) -> bool {
        value.as_range().is_some_and(|range| {
            range.from.as_deref() == Some(candidate) || range.to.as_deref() == Some(candidate)
        })
    }
}

/// The contract a caller implements for a custom filter shape.
///
/// The factory wraps implementations in a [`CustomStrategy`] that supplies
/// the shared key transform.
pub trait CustomFilter: Send + Sync + fmt::Debug {
    fn default_value(&self) -> FilterValue;

    fn parse(&self, raw: Option<&str>, delimiter: &str) -> FilterValue;

    fn serialize(&self, value: &FilterValue, delimiter: &str) -> Option<String>;

    fn matches(&self, value: &FilterValue, candidate: &str) -> bool;

    /// Defaults to the shape of [`CustomFilter::default_value`].
    fn shape(&self) -> FilterShape {
        self.default_value().shape()
    }
}

/// A caller-supplied filter with the factory's key transform attached.
#[derive(Debug)]
pub struct CustomStrategy<F> {
    inner: F,
    keys: KeyTransform,
}

impl<F: CustomFilter> CustomStrategy<F> {
    pub fn new(inner: F, keys: KeyTransform) -> Self {
        CustomStrategy { inner, keys }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: CustomFilter> FilterStrategy for CustomStrategy<F> {
    fn default_value(&self) -> FilterValue {
        self.inner.default_value()
    }

    fn key(&self, name: &str) -> String {
        self.keys.apply(name)
    }

    fn shape(&self) -> FilterShape {
        self.inner.shape()
    }

    fn parse(&self, raw: Option<&str>, delimiter: &str) -> FilterValue {
        self.inner.parse(raw, delimiter)
    }

    fn serialize(&self, value: &FilterValue, delimiter: &str) -> Option<String> {
        self.inner.serialize(value, delimiter)
    }

    fn matches(&self, value: &FilterValue, candidate: &str) -> bool {
        self.inner.matches(value, candidate)
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
