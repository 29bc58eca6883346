//! Proptest strategies for step requests.
#![allow(dead_code)]

use proptest::prelude::*;
use serde_json::{json, Value};

/// Argument names as they appear in step requests
pub fn argument_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Session identifiers
pub fn session_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9-]{1,32}"
}

/// Non-null JSON scalars
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[ -~]{0,24}".prop_map(Value::String),
    ]
}

/// Extra request arguments keyed by names that never collide with `reserved`
pub fn extra_arguments_strategy(
    reserved: &'static [&'static str],
) -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(
        (argument_name_strategy(), scalar_value_strategy()),
        0..6,
    )
    .prop_map(move |pairs| {
        pairs
            .into_iter()
            .filter(|(name, _)| !reserved.contains(&name.as_str()))
            .collect()
    })
}
