// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Query string input and output.
//!
//! - [`QueryString`]: a parsed snapshot of an incoming `key=value&...` string
//! - [`QueryParams`]: the ordered key/value output of serialization
//! - [`QuerySource`]: where the current query string comes from
//!
//! Values are percent-decoded on the way in and percent-encoded on the way
//! out. Multi-value delimiters are never escaped.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use url::form_urlencoded;

/// A parsed query string.
///
/// Pairs are kept in their original order, including repeated keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Parses `?a=1&b=2` (the leading `?` is optional).
    ///
    /// Never fails: a pair without `=` has an empty value, `+` decodes to a
    /// space, and bytes that do not decode to UTF-8 become U+FFFD.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        let pairs = form_urlencoded::parse(input.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        QueryString { pairs }
    }

    /// Returns the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Distinct keys in order of first appearance.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for (key, _) in &self.pairs {
            if !keys.contains(&key.as_str()) {
                keys.push(key);
            }
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Ordered string-keyed output of filter serialization.
///
/// Renders as a query string with [`fmt::Display`] and serializes as a map
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        QueryParams::default()
    }

    /// Appends an entry, replacing the value if the key is already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
    }

    /// Renders `key=value&...` with both sides percent-encoded.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{}={}", urlencoding::encode(key), urlencoding::encode(value))?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl Serialize for QueryParams {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, value) in &self.pairs {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Supplies the current query string.
///
/// A filter state reads its source once when it is built, and again only when
/// ordering output by the current URL or when explicitly reloaded.
pub trait QuerySource: Send + Sync {
    fn current(&self) -> String;
}

impl QuerySource for String {
    fn current(&self) -> String {
        self.clone()
    }
}

impl QuerySource for &'static str {
    fn current(&self) -> String {
        (*self).to_string()
    }
}

/// A shared, updatable query string.
///
/// Hosts keep a clone and call [`Location::navigate`] when the URL changes.
#[derive(Debug, Clone, Default)]
pub struct Location {
    query: Arc<RwLock<String>>,
}

impl Location {
    pub fn new(query: impl Into<String>) -> Self {
        Location { query: Arc::new(RwLock::new(query.into())) }
    }

    pub fn navigate(&self, query: impl Into<String>) {
        *self.query.write().unwrap_or_else(PoisonError::into_inner) = query.into();
    }
}

impl QuerySource for Location {
    fn current(&self) -> String {
        self.query.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
