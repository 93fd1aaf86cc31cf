// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The filter state: current values for every registered filter.
//!
//! A [`FilterState`] parses the query string once when it is built, then keeps
//! one value per registered filter. Callers read and write values, serialize
//! them back into query parameters, and hand them to the apply callback.
//!
//! Unknown filter names passed to [`FilterState::has`] or
//! [`FilterState::clear`] are logged and ignored; a missing apply callback is
//! logged and skipped. Neither is an error.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

use crate::apply::{Applied, InFlight, PendingApply};
use crate::error::{Error, Result};
use crate::options::{ApplyOutcome, FilterOptions, OptionsPatch};
use crate::query::{QueryParams, QuerySource, QueryString};
use crate::registry::FilterRegistry;
use crate::strategy::FilterStrategy;
use crate::value::FilterValue;

/// Current values for a fixed set of filters.
pub struct FilterState {
    registry: Arc<FilterRegistry>,
    values: HashMap<String, FilterValue>,
    options: FilterOptions,
    source: Box<dyn QuerySource>,
    in_flight: InFlight,
}

impl FilterState {
    /// Builds the state from the source's current query string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the options are invalid.
    pub fn new(
        registry: Arc<FilterRegistry>,
        options: FilterOptions,
        source: impl QuerySource + 'static,
    ) -> Result<Self> {
        options.validate()?;
        let mut state = FilterState {
            registry,
            values: HashMap::new(),
            options,
            source: Box::new(source),
            in_flight: InFlight::new(),
        };
        state.load();
        tracing::debug!(
            filters = state.registry.len(),
            callback = state.options.apply_callback.is_some(),
            "filter state created"
        );
        Ok(state)
    }

    /// Builds the state from a fixed query string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the options are invalid.
    pub fn from_query(
        registry: Arc<FilterRegistry>,
        options: FilterOptions,
        query: impl Into<String>,
    ) -> Result<Self> {
        FilterState::new(registry, options, query.into())
    }

    /// Parses every registered filter from the source's current query.
    fn load(&mut self) {
        let query = QueryString::parse(&self.source.current());
        let delimiter = self.options.delimiter.as_str();
        self.values = self
            .registry
            .iter()
            .map(|(name, strategy)| {
                let raw = query.get(&strategy.key(name));
                (name.to_string(), strategy.parse(raw, delimiter))
            })
            .collect();
    }

    /// Re-reads the query string and re-parses every filter.
    ///
    /// The state never does this on its own.
    pub fn reload(&mut self) {
        self.load();
        tracing::debug!("filter state reloaded");
    }

    pub fn registry(&self) -> &Arc<FilterRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Merges `patch` into the options.
    ///
    /// Stored values are not re-parsed; the change applies from the next
    /// serialize or apply.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the merged options are invalid,
    /// leaving the current options unchanged.
    pub fn set_options(&mut self, patch: OptionsPatch) -> Result<()> {
        let mut merged = self.options.clone();
        merged.merge(patch);
        merged.validate()?;
        self.options = merged;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.values.get(name)
    }

    /// `(name, value)` pairs in registry order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.registry
            .names()
            .filter_map(move |name| self.values.get(name).map(|value| (name, value)))
    }

    /// Replaces a filter's value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFilter`] for an unregistered name and
    /// [`Error::ShapeMismatch`] if the value has the wrong shape.
    pub fn set(&mut self, name: &str, value: FilterValue) -> Result<()> {
        let strategy = self.strategy(name)?;
        check_shape(name, strategy.as_ref(), &value)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Edits a filter's value in place.
    ///
    /// The edit is made on a copy and only kept if the shape is unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`FilterState::set`].
    pub fn update<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut FilterValue),
    {
        let mut value = match self.values.get(name) {
            Some(value) => value.clone(),
            None => return Err(Error::UnknownFilter(name.to_string())),
        };
        f(&mut value);
        self.set(name, value)
    }

    /// Serializes every filter in registry order, omitting empty ones.
    ///
    /// Keys are the strategies' transformed keys when `transform_keys` is set,
    /// and the plain filter names otherwise.
    pub fn serialize(&self, transform_keys: bool) -> QueryParams {
        let delimiter = self.options.delimiter.as_str();
        self.registry
            .iter()
            .filter_map(|(name, strategy)| {
                let value = self.values.get(name)?;
                let serialized = strategy.serialize(value, delimiter)?;
                let key = if transform_keys { strategy.key(name) } else { name.to_string() };
                Some((key, serialized))
            })
            .collect()
    }

    /// Like [`FilterState::serialize`], but filters already in the current
    /// query string come first, in the order they appear there.
    ///
    /// Matching uses the transformed key, which is what appears in the URL.
    pub fn serialize_ordered(&self, transform_keys: bool) -> QueryParams {
        let query = QueryString::parse(&self.source.current());
        let url_keys = query.keys();
        let delimiter = self.options.delimiter.as_str();

        let mut entries: Vec<(Option<usize>, String, String)> = self
            .registry
            .iter()
            .filter_map(|(name, strategy)| {
                let value = self.values.get(name)?;
                let serialized = strategy.serialize(value, delimiter)?;
                let url_key = strategy.key(name);
                let position = url_keys.iter().position(|k| *k == url_key);
                let key = if transform_keys { url_key } else { name.to_string() };
                Some((position, key, serialized))
            })
            .collect();

        // Stable sort keeps registry order among keys missing from the URL
        entries.sort_by_key(|(position, _, _)| position.unwrap_or(usize::MAX));
        entries.into_iter().map(|(_, key, value)| (key, value)).collect()
    }

    /// The serialized filters, rendered with `Display` as a query string.
    pub fn to_search_params(&self) -> QueryParams {
        self.serialize(true)
    }

    /// Returns true if the filter's value selects `candidate`.
    ///
    /// Unknown names are logged and return false.
    pub fn has(&self, name: &str, candidate: &str) -> bool {
        let (Some(strategy), Some(value)) = (self.registry.get(name), self.values.get(name)) else {
            tracing::warn!(filter = name, "unknown filter");
            return false;
        };
        strategy.matches(value, candidate)
    }

    /// Returns true if the filter currently serializes to something.
    pub fn is_active(&self, name: &str) -> bool {
        match (self.registry.get(name), self.values.get(name)) {
            (Some(strategy), Some(value)) => {
                strategy.serialize(value, &self.options.delimiter).is_some()
            }
            _ => false,
        }
    }

    /// Names of active filters in registry order.
    pub fn active_filters(&self) -> Vec<&str> {
        self.registry.names().filter(|name| self.is_active(name)).collect()
    }

    /// Invokes the apply callback with the serialized filters.
    ///
    /// Uses URL order when `preserve_url_order` is set. Without a callback
    /// this logs a warning and returns [`Applied::Skipped`].
    pub fn apply(&self) -> Applied {
        let Some(callback) = self.options.apply_callback.as_ref() else {
            tracing::warn!("apply callback not set");
            return Applied::Skipped;
        };

        let params = if self.options.preserve_url_order {
            self.serialize_ordered(true)
        } else {
            self.serialize(true)
        };
        tracing::debug!(params = %params, "applying filters");

        let guard = self.in_flight.raise();
        match callback.invoke(params) {
            ApplyOutcome::Ready(Ok(())) => Applied::Completed,
            ApplyOutcome::Ready(Err(err)) => {
                tracing::debug!(error = %err, "apply callback failed");
                Applied::Failed(Error::Callback(err))
            }
            ApplyOutcome::Pending(work) => Applied::Pending(PendingApply::new(work, guard)),
        }
    }

    /// Resets the named filters to fresh copies of their defaults.
    ///
    /// Unknown names are logged and skipped. When `trigger_apply` is set and
    /// at least one filter was reset, the callback runs once afterwards.
    pub fn clear<I, S>(&mut self, names: I, trigger_apply: bool) -> Applied
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleared = 0;
        for name in names {
            let name = name.as_ref();
            let Some(strategy) = self.registry.get(name) else {
                tracing::warn!(filter = name, "unknown filter");
                continue;
            };
            self.values.insert(name.to_string(), strategy.default_value());
            cleared += 1;
        }
        tracing::debug!(cleared, "filters cleared");

        if cleared == 0 || !trigger_apply || self.options.apply_callback.is_none() {
            return Applied::Skipped;
        }
        self.apply()
    }

    /// Resets every filter and triggers the callback.
    pub fn clear_all(&mut self) -> Applied {
        let names: Vec<String> = self.registry.names().map(str::to_string).collect();
        self.clear(names, true)
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// A cloneable view of the in-flight flag.
    pub fn in_flight(&self) -> InFlight {
        self.in_flight.clone()
    }

    pub fn subscribe_in_flight(&self) -> watch::Receiver<bool> {
        self.in_flight.subscribe()
    }

    fn strategy(&self, name: &str) -> Result<&Arc<dyn FilterStrategy>> {
        self.registry.get(name).ok_or_else(|| Error::UnknownFilter(name.to_string()))
    }
}

fn check_shape(name: &str, strategy: &dyn FilterStrategy, value: &FilterValue) -> Result<()> {
    let expected = strategy.shape();
    let found = value.shape();
    if expected != found {
        return Err(Error::ShapeMismatch { name: name.to_string(), expected, found });
    }
    Ok(())
}

impl std::fmt::Debug for FilterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterState")
            .field("values", &self.values().collect::<Vec<_>>())
            .field("options", &self.options)
            .field("in_flight", &self.is_in_flight())
            .finish()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
