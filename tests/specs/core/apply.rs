// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous apply callbacks and the in-flight flag.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex};

use qf_core::{
    Applied, ApplyCallback, CallbackError, CallbackResult, Error, FilterOptions, FilterValue,
    OptionsPatch, QueryParams,
};
use specs::*;
use tokio::sync::oneshot;

/// A future callback that settles only when the test releases it.
#[derive(Clone, Default)]
struct Gate {
    waiting: Arc<Mutex<Vec<(QueryParams, oneshot::Sender<CallbackResult>)>>>,
}

impl Gate {
    fn callback(&self) -> ApplyCallback {
        let waiting = Arc::clone(&self.waiting);
        ApplyCallback::future(move |params| {
            let (tx, rx) = oneshot::channel();
            waiting.lock().unwrap().push((params, tx));
            async move {
                let result: CallbackResult = match rx.await {
                    Ok(result) => result,
                    Err(_) => Err("gate dropped".into()),
                };
                result
            }
        })
    }

    fn release(&self, index: usize, result: CallbackResult) {
        let (_, tx) = self.waiting.lock().unwrap().remove(index);
        let _ = tx.send(result);
    }

    fn params(&self, index: usize) -> QueryParams {
        self.waiting.lock().unwrap()[index].0.clone()
    }
}

fn pending(applied: Applied) -> qf_core::PendingApply {
    match applied {
        Applied::Pending(pending) => pending,
        other => panic!("expected a pending apply, got {other:?}"),
    }
}

#[tokio::test]
async fn flag_stays_raised_until_the_future_settles() {
    let gate = Gate::default();
    let state = shop_state("?brands=a", FilterOptions::default().with_callback(gate.callback()));
    let mut changes = state.subscribe_in_flight();

    let pending = pending(state.apply());
    assert!(state.is_in_flight());
    changes.changed().await.unwrap();
    assert!(*changes.borrow_and_update());
    assert_eq!(gate.params(0).get("brands"), Some("a"));

    gate.release(0, Ok(()));
    pending.await.unwrap();

    assert!(!state.is_in_flight());
    changes.changed().await.unwrap();
    assert!(!*changes.borrow_and_update());
}

#[tokio::test]
async fn failed_future_surfaces_the_callback_error() {
    let gate = Gate::default();
    let state = shop_state("", FilterOptions::default().with_callback(gate.callback()));
    let (_logs, _guard) = LogCapture::install();

    let pending = pending(state.apply());
    let err: CallbackError = "backend unavailable".into();
    gate.release(0, Err(err));

    let err = pending.await.unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
    assert!(err.to_string().contains("backend unavailable"));
    assert!(!state.is_in_flight());
}

#[tokio::test]
async fn failed_sync_callback_lowers_the_flag() {
    let mut state = shop_state("", FilterOptions::default());
    let callback = ApplyCallback::new(|_| {
        qf_core::ApplyOutcome::Ready(Err("rejected".into()))
    });
    state.set_options(OptionsPatch::default().callback(callback)).unwrap();

    let applied = state.apply();
    assert!(!state.is_in_flight());
    let err = applied.settle().await.unwrap_err();
    assert!(matches!(err, Error::Callback(_)));
}

#[tokio::test]
async fn overlapping_applies_are_not_coalesced() {
    let gate = Gate::default();
    let mut state = shop_state("", FilterOptions::default().with_callback(gate.callback()));

    let first = pending(state.apply());
    state.set("category", FilterValue::single("phones")).unwrap();
    let second = pending(state.apply());

    assert!(gate.params(0).is_empty());
    assert_eq!(gate.params(1).get("category"), Some("phones"));

    // Whichever settles last decides the flag
    gate.release(1, Ok(()));
    second.await.unwrap();
    assert!(!state.is_in_flight());

    gate.release(0, Ok(()));
    first.await.unwrap();
    assert!(!state.is_in_flight());
}

#[tokio::test]
async fn dropping_a_pending_apply_lowers_the_flag() {
    let gate = Gate::default();
    let state = shop_state("", FilterOptions::default().with_callback(gate.callback()));

    let pending = pending(state.apply());
    assert!(state.is_in_flight());
    drop(pending);
    assert!(!state.is_in_flight());
}

#[tokio::test]
async fn clear_all_with_future_callback_settles_once() {
    let gate = Gate::default();
    let mut state = shop_state(
        "?category=c&brands=a",
        FilterOptions::default().with_callback(gate.callback()),
    );
    let (logs, _guard) = LogCapture::install();

    let applied = state.clear_all();
    assert!(applied.is_pending());
    gate.release(0, Ok(()));
    applied.settle().await.unwrap();

    assert!(gate.waiting.lock().unwrap().is_empty());
    assert!(logs.warnings().is_empty());
    assert!(logs.at(tracing::Level::DEBUG).iter().any(|e| e.message == "apply settled"));
}
