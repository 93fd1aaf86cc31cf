// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter value shapes.
//!
//! Every filter holds exactly one [`FilterValue`]. The variant is fixed by the
//! filter's strategy and never changes over the filter's lifetime.

use serde::Serialize;
use std::fmt;

/// The current value of one filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A single scalar, or nothing selected.
    Single(Option<String>),
    /// An ordered list of scalars.
    Multiple(Vec<String>),
    /// An inclusive range with optional endpoints.
    Range(RangeValue),
    /// A caller-defined payload for custom filters.
    Custom(serde_json::Value),
}

impl FilterValue {
    /// Shorthand for a present single value.
    pub fn single(value: impl Into<String>) -> Self {
        FilterValue::Single(Some(value.into()))
    }

    /// Shorthand for a multiple value built from any list of strings.
    pub fn multiple<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterValue::Multiple(values.into_iter().map(Into::into).collect())
    }

    /// Returns the shape of this value.
    pub fn shape(&self) -> FilterShape {
        match self {
            FilterValue::Single(_) => FilterShape::Single,
            FilterValue::Multiple(_) => FilterShape::Multiple,
            FilterValue::Range(_) => FilterShape::Range,
            FilterValue::Custom(_) => FilterShape::Custom,
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            FilterValue::Single(value) => value.as_deref(),
            _ => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            FilterValue::Multiple(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_range(&self) -> Option<&RangeValue> {
        match self {
            FilterValue::Range(range) => Some(range),
            _ => None,
        }
    }
}

/// Endpoints of a range filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeValue {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl RangeValue {
    pub fn new(from: Option<String>, to: Option<String>) -> Self {
        RangeValue { from, to }
    }

    /// A range with both endpoints set.
    pub fn between(from: impl Into<String>, to: impl Into<String>) -> Self {
        RangeValue { from: Some(from.into()), to: Some(to.into()) }
    }

    /// Returns true if neither endpoint is set.
    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// The shape a filter's value takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterShape {
    Single,
    Multiple,
    Range,
    Custom,
}

impl FilterShape {
    /// Returns the string representation used in messages and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterShape::Single => "single",
            FilterShape::Multiple => "multiple",
            FilterShape::Range => "range",
            FilterShape::Custom => "custom",
        }
    }
}

impl fmt::Display for FilterShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
#[path = "value_tests.rs"]
mod tests;
