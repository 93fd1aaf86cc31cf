// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filter states built from declarative configuration.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use qf_core::{Error, FilterConfig, FilterState, FilterValue, OptionsPatch, RangeValue};
use similar_asserts::assert_eq;
use specs::Recorder;

const CATALOG: &str = r#"
delimiter = "|"

[[filters]]
name = "category"
kind = "single"
default = "all"

[[filters]]
name = "brands"
kind = "multiple"

[[filters]]
name = "price"
kind = "range"
"#;

fn state_from(config: &FilterConfig, query: &str) -> FilterState {
    FilterState::from_query(Arc::new(config.registry().unwrap()), config.options(), query)
        .unwrap()
}

#[test]
fn toml_config_drives_parsing() {
    let config = FilterConfig::from_toml_str(CATALOG).unwrap();
    let state = state_from(&config, "?brands=apple|samsung&price=10|20");

    assert_eq!(state.get("category"), Some(&FilterValue::single("all")));
    assert_eq!(state.get("brands"), Some(&FilterValue::multiple(["apple", "samsung"])));
    assert_eq!(state.get("price"), Some(&FilterValue::Range(RangeValue::between("10", "20"))));
}

#[test]
fn configured_default_is_serialized_when_set() {
    let config = FilterConfig::from_toml_str(CATALOG).unwrap();
    let state = state_from(&config, "");

    // A non-empty default is still a value
    assert_eq!(state.serialize(true).get("category"), Some("all"));
    assert!(state.has("category", "all"));
}

#[test]
fn namespaced_keys_from_json() {
    let json = r#"{
        "key_namespace": "f",
        "filters": [
            {"name": "brands", "kind": "multiple"},
            {"name": "price", "kind": "range"}
        ]
    }"#;
    let config = FilterConfig::from_json_str(json).unwrap();
    let recorder = Recorder::default();
    let mut state = state_from(&config, "?f[brands]=lg&brands=ignored");
    state.set_options(OptionsPatch::default().callback(recorder.callback())).unwrap();

    assert_eq!(state.get("brands"), Some(&FilterValue::multiple(["lg"])));
    let _ = state.apply();
    assert_eq!(recorder.calls()[0].to_string(), "f%5Bbrands%5D=lg");
}

#[test]
fn invalid_config_is_rejected_before_building() {
    let err = FilterConfig::from_toml_str("delimiter = \"\"\n").unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let err = FilterConfig::from_toml_str("[[filters]]\nname = \"x\"\nkind = \"slider\"\n")
        .unwrap_err();
    assert!(matches!(err, Error::Toml(_)));
}
