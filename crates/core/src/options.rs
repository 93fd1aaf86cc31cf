// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter state options and the apply callback.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::{CallbackError, Error, Result};
use crate::query::QueryParams;

pub const DEFAULT_DELIMITER: &str = ",";

/// What an apply callback returns.
pub type CallbackResult = std::result::Result<(), CallbackError>;

/// The result of invoking an apply callback.
pub enum ApplyOutcome {
    /// The callback finished synchronously.
    Ready(CallbackResult),
    /// The callback returned work that settles later.
    Pending(BoxFuture<'static, CallbackResult>),
}

impl fmt::Debug for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyOutcome::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            ApplyOutcome::Pending(_) => f.write_str("Pending"),
        }
    }
}

/// A caller-supplied function invoked with the serialized filters.
#[derive(Clone)]
pub struct ApplyCallback(Arc<dyn Fn(QueryParams) -> ApplyOutcome + Send + Sync>);

impl ApplyCallback {
    /// Wraps a callback that decides per call whether it settles now or later.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(QueryParams) -> ApplyOutcome + Send + Sync + 'static,
    {
        ApplyCallback(Arc::new(f))
    }

    /// Wraps a callback that always completes synchronously.
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(QueryParams) + Send + Sync + 'static,
    {
        ApplyCallback::new(move |params| {
            f(params);
            ApplyOutcome::Ready(Ok(()))
        })
    }

    /// Wraps a callback that returns a future.
    pub fn future<F, Fut>(f: F) -> Self
    where
        F: Fn(QueryParams) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CallbackResult> + Send + 'static,
    {
        ApplyCallback::new(move |params| ApplyOutcome::Pending(f(params).boxed()))
    }

    pub fn invoke(&self, params: QueryParams) -> ApplyOutcome {
        (self.0)(params)
    }
}

impl fmt::Debug for ApplyCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApplyCallback")
    }
}

/// Options for a filter state.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Joins multiple and range values (default: `,`).
    pub delimiter: String,
    /// Invoked by `apply` with the serialized filters.
    pub apply_callback: Option<ApplyCallback>,
    /// Order `apply` output by the current URL first (default: true).
    pub preserve_url_order: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            delimiter: DEFAULT_DELIMITER.to_string(),
            apply_callback: None,
            preserve_url_order: true,
        }
    }
}

impl FilterOptions {
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_callback(mut self, callback: ApplyCallback) -> Self {
        self.apply_callback = Some(callback);
        self
    }

    pub fn with_preserve_url_order(mut self, preserve: bool) -> Self {
        self.preserve_url_order = preserve;
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] if the delimiter is empty.
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(Error::InvalidOptions("delimiter must not be empty".to_string()));
        }
        Ok(())
    }

    /// Shallow-merges `patch` into these options.
    pub fn merge(&mut self, patch: OptionsPatch) {
        if let Some(delimiter) = patch.delimiter {
            self.delimiter = delimiter;
        }
        if let Some(callback) = patch.apply_callback {
            self.apply_callback = callback;
        }
        if let Some(preserve) = patch.preserve_url_order {
            self.preserve_url_order = preserve;
        }
    }
}

/// A partial update to [`FilterOptions`]; unset fields are left alone.
#[derive(Debug, Clone, Default)]
pub struct OptionsPatch {
    pub delimiter: Option<String>,
    /// `Some(None)` removes the callback.
    pub apply_callback: Option<Option<ApplyCallback>>,
    pub preserve_url_order: Option<bool>,
}

impl OptionsPatch {
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self
    }

    pub fn callback(mut self, callback: ApplyCallback) -> Self {
        self.apply_callback = Some(Some(callback));
        self
    }

    pub fn without_callback(mut self) -> Self {
        self.apply_callback = Some(None);
        self
    }

    pub fn preserve_url_order(mut self, preserve: bool) -> Self {
        self.preserve_url_order = Some(preserve);
        self
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod tests;
