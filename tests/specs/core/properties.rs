// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Properties that hold for any registry and query.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;

use qf_core::{
    Applied, FilterOptions, FilterRegistry, FilterState, FilterValue, Location, RangeValue,
    StrategyFactory,
};
use specs::*;
use yare::parameterized;

fn reparse(state: &FilterState, options: FilterOptions) -> FilterState {
    let query = format!("?{}", state.serialize(true));
    FilterState::from_query(Arc::clone(state.registry()), options, query).unwrap()
}

// =============================================================================
// Round trip
// =============================================================================

#[parameterized(
    scalar = { "category", FilterValue::single("phones") },
    scalar_with_space = { "category", FilterValue::single("smart phones") },
    sequence = { "brands", FilterValue::multiple(["apple", "samsung", "lg"]) },
    full_range = { "price", FilterValue::Range(RangeValue::between("100", "500")) },
    open_start = { "price", FilterValue::Range(RangeValue::new(None, Some("500".into()))) },
    open_end = { "price", FilterValue::Range(RangeValue::new(Some("100".into()), None)) },
)]
fn value_survives_serialize_then_parse(name: &str, value: FilterValue) {
    for delimiter in [",", "|", ";"] {
        let options = FilterOptions::default().with_delimiter(delimiter);
        let mut state = shop_state("", options.clone());
        state.set(name, value.clone()).unwrap();

        let reparsed = reparse(&state, options);
        similar_asserts::assert_eq!(
            reparsed.get(name),
            Some(&value),
            "delimiter {delimiter:?}"
        );
    }
}

#[parameterized(
    category = { "category" },
    brands = { "brands" },
    price = { "price" },
)]
fn default_is_omitted_and_parses_back_to_default(name: &str) {
    let state = shop_state("", FilterOptions::default());
    let default = state.registry().get(name).unwrap().default_value();

    assert!(!state.serialize(true).contains_key(name));
    assert!(!state.is_active(name));
    let reparsed = reparse(&state, FilterOptions::default());
    similar_asserts::assert_eq!(reparsed.get(name), Some(&default));
}

// =============================================================================
// Default isolation
// =============================================================================

#[test]
fn clearing_after_mutation_restores_a_pristine_default() {
    let f = StrategyFactory::new();
    let registry = Arc::new(
        FilterRegistry::builder()
            .filter("brands", f.multiple(["apple"]))
            .build()
            .unwrap(),
    );
    let mut state = FilterState::from_query(registry, FilterOptions::default(), "").unwrap();

    state
        .update("brands", |value| {
            if let FilterValue::Multiple(items) = value {
                items.push("samsung".to_string());
            }
        })
        .unwrap();
    similar_asserts::assert_eq!(
        state.get("brands"),
        Some(&FilterValue::multiple(["apple", "samsung"]))
    );

    let _ = state.clear(["brands"], false);
    similar_asserts::assert_eq!(state.get("brands"), Some(&FilterValue::multiple(["apple"])));
    similar_asserts::assert_eq!(
        state.registry().get("brands").unwrap().default_value(),
        FilterValue::multiple(["apple"])
    );
}

// =============================================================================
// Ordering
// =============================================================================

#[parameterized(
    url_reversed = { "?price=1,2&brands=a&category=c", &["price", "brands", "category"] },
    partial = { "?brands=a", &["brands", "category", "price"] },
    none_in_url = { "", &["category", "brands", "price"] },
)]
fn ordered_output_follows_url_then_registry(query: &str, expected: &[&str]) {
    let location = Location::new(query);
    let mut state =
        FilterState::new(shop_registry(), FilterOptions::default(), location.clone()).unwrap();
    state.set("category", FilterValue::single("c")).unwrap();
    state.set("brands", FilterValue::multiple(["a"])).unwrap();
    state.set("price", FilterValue::Range(RangeValue::between("1", "2"))).unwrap();

    let ordered = state.serialize_ordered(true);
    similar_asserts::assert_eq!(ordered.keys().collect::<Vec<_>>(), expected);

    let plain = state.serialize(true);
    similar_asserts::assert_eq!(
        plain.keys().collect::<Vec<_>>(),
        vec!["category", "brands", "price"]
    );
}

#[test]
fn ordered_output_reads_the_current_location() {
    let location = Location::new("?brands=a&category=c");
    let state =
        FilterState::new(shop_registry(), FilterOptions::default(), location.clone()).unwrap();

    location.navigate("?category=c&brands=a");
    let ordered = state.serialize_ordered(true);
    similar_asserts::assert_eq!(ordered.keys().collect::<Vec<_>>(), vec!["category", "brands"]);
}

// =============================================================================
// Callback counts
// =============================================================================

#[parameterized(
    none = { &[] },
    one = { &["brands"] },
    all = { &["category", "brands", "price"] },
    with_unknown = { &["brands", "color", "size"] },
    only_unknown = { &["color"] },
)]
fn clear_invokes_callback_at_most_once(names: &[&str]) {
    let recorder = Recorder::default();
    let mut state = shop_state(
        "?category=c&brands=a",
        FilterOptions::default().with_callback(recorder.callback()),
    );

    let known = names.iter().filter(|n| state.registry().contains(n)).count();
    let applied = state.clear(names.iter().copied(), true);

    similar_asserts::assert_eq!(recorder.count(), usize::from(known > 0));
    similar_asserts::assert_eq!(applied.is_skipped(), known == 0);
}

#[test]
fn clear_without_trigger_never_invokes_callback() {
    let recorder = Recorder::default();
    let mut state =
        shop_state("?category=c", FilterOptions::default().with_callback(recorder.callback()));

    assert!(state.clear(["category"], false).is_skipped());
    similar_asserts::assert_eq!(recorder.count(), 0);
    similar_asserts::assert_eq!(state.get("category"), Some(&FilterValue::Single(None)));
}

#[test]
fn clear_all_invokes_callback_exactly_once() {
    let recorder = Recorder::default();
    let mut state = shop_state(
        "?category=c&brands=a,b&price=1,2",
        FilterOptions::default().with_callback(recorder.callback()),
    );

    assert!(matches!(state.clear_all(), Applied::Completed));
    similar_asserts::assert_eq!(recorder.count(), 1);
    assert!(recorder.calls()[0].is_empty());
    assert!(state.active_filters().is_empty());
}

// =============================================================================
// Unknown names
// =============================================================================

#[test]
fn has_on_unknown_name_is_false_and_warns() {
    let state = shop_state("?category=c", FilterOptions::default());

    let (found, logs) = LogCapture::run(|| state.has("color", "red"));

    assert!(!found);
    let warnings = logs.warnings();
    similar_asserts::assert_eq!(warnings.len(), 1);
    similar_asserts::assert_eq!(warnings[0].message, "unknown filter");
    similar_asserts::assert_eq!(warnings[0].field("filter"), Some("color"));
}

#[test]
fn clear_on_unknown_name_warns_and_skips() {
    let mut state = shop_state("?category=c", FilterOptions::default());

    let (applied, logs) = LogCapture::run(|| state.clear(["color"], true));

    assert!(applied.is_skipped());
    assert!(logs.warned("unknown filter"));
    similar_asserts::assert_eq!(state.get("category"), Some(&FilterValue::single("c")));
}
