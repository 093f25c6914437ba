//! Value classification: one JSON value in, one `TypeTag` out.
//!
//! Rules run in a fixed order (string, boolean, number, array, object,
//! everything else). With typed `serde_json` values the arms are disjoint,
//! but the order is kept as written so numeric-looking strings always stay
//! strings.
//!
//! Classification never fails. Anything without a C shape comes back as
//! `TypeTag::Invalid` and the callers drop it without a word.
pub mod num;
pub mod arr;

use serde_json::Value;

use crate::ir::TypeTag;

pub fn classify(v: &Value) -> TypeTag {
    match v {
        Value::String(_) => TypeTag::String,
        Value::Bool(_) => TypeTag::Boolean,
        Value::Number(n) => num::classify_number(n),
        Value::Array(xs) => arr::classify_array(xs),
        Value::Object(_) => TypeTag::Object,
        Value::Null => TypeTag::Invalid,
    }
}

// ------------------------------- Tests ------------------------------------ //
