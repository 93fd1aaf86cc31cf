// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Apply lifecycle and the in-flight flag.
//!
//! The flag is raised while a callback runs. A synchronous callback lowers it
//! as soon as it returns; an asynchronous one lowers it when its
//! [`PendingApply`] settles or is dropped. Overlapping applies are not
//! coalesced: whichever settles last leaves the flag lowered.

use futures_util::future::BoxFuture;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};
use tokio::sync::watch;

use crate::error::{Error, Result};
use crate::options::CallbackResult;

/// A shared view of whether an apply is in progress.
#[derive(Debug, Clone)]
pub struct InFlight {
    tx: Arc<watch::Sender<bool>>,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        let (tx, _) = watch::channel(false);
        InFlight { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> bool {
        *self.tx.borrow()
    }

    /// Receives every change of the flag.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    pub(crate) fn set(&self, value: bool) {
        self.tx.send_replace(value);
    }

    /// Raises the flag until the returned guard is dropped.
    pub(crate) fn raise(&self) -> InFlightGuard {
        self.set(true);
        InFlightGuard { flag: self.clone() }
    }
}

/// Lowers the in-flight flag when dropped.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    flag: InFlight,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// An asynchronous apply that has not settled yet.
///
/// Resolves to the callback's result. Dropping it before completion abandons
/// the callback's work and lowers the in-flight flag.
pub struct PendingApply {
    work: BoxFuture<'static, CallbackResult>,
    guard: Option<InFlightGuard>,
}

impl PendingApply {
    pub(crate) fn new(work: BoxFuture<'static, CallbackResult>, guard: InFlightGuard) -> Self {
        PendingApply { work, guard: Some(guard) }
    }
}

impl Future for PendingApply {
    type Output = Result<()>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let result = ready!(self.work.as_mut().poll(cx));
        self.guard.take();
        tracing::debug!(ok = result.is_ok(), "apply settled");
        Poll::Ready(result.map_err(Error::Callback))
    }
}

impl std::fmt::Debug for PendingApply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingApply").field("settled", &self.guard.is_none()).finish()
    }
}

/// What happened when an apply was requested.
#[derive(Debug)]
#[must_use = "a pending apply does nothing unless awaited"]
pub enum Applied {
    /// No callback ran: none is configured, or nothing asked for one.
    Skipped,
    /// A synchronous callback succeeded.
    Completed,
    /// A synchronous callback failed.
    Failed(Error),
    /// An asynchronous callback is still running.
    Pending(PendingApply),
}

impl Applied {
    /// Waits for the callback (if any) and returns its result.
    ///
    /// `Skipped` resolves to `Ok(())`.
    pub async fn settle(self) -> Result<()> {
        match self {
            Applied::Skipped | Applied::Completed => Ok(()),
            Applied::Failed(err) => Err(err),
            Applied::Pending(pending) => pending.await,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Applied::Skipped)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Applied::Pending(_))
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
