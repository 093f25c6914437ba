//! JSON object → assignment statements.
//!
//! Walks the object exactly like `schema::build_schema`, so every statement
//! targets a field that was declared, and every skipped field is skipped on
//! both sides.

use serde_json::{Map, Value};

use crate::classify::{classify, num::render_number};
use crate::codegen::c_ident;
use crate::ir::{Literal, Statement, TypeTag};
use crate::options::{ArrayInitializer, EmitOptions};

pub fn emit_initializers(path: &str, obj: &Map<String, Value>, opts: &EmitOptions) -> Vec<Statement> {
    let mut out = Vec::new();
    emit_into(&mut out, path, obj, opts);
    out
}

fn emit_into(out: &mut Vec<Statement>, path: &str, obj: &Map<String, Value>, opts: &EmitOptions) {
    for (key, val) in obj {
        let target = format!("{path}.{}", c_ident(key));
        match (classify(val), val) {
            (TypeTag::Invalid, _) => {}
            (TypeTag::List(_), Value::Array(xs)) => {
                for (i, x) in xs.iter().enumerate() {
                    let value = match opts.array_initializer {
                        ArrayInitializer::Values => literal_of(x),
                        ArrayInitializer::LegacyIndex => Literal::Number(i.to_string()),
                    };
                    out.push(Statement { target: format!("{target}[{i}]"), value });
                }
            }
            (TypeTag::Object, Value::Object(child)) => emit_into(out, &target, child, opts),
            (_, x) => out.push(Statement { target, value: literal_of(x) }),
        }
    }
}

fn literal_of(v: &Value) -> Literal {
    match v {
        Value::Number(n) => Literal::Number(render_number(n)),
        Value::Bool(b) => Literal::Bool(*b),
        Value::String(s) => Literal::Str(s.clone()),
        _ => Literal::Null,
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lines(v: Value, opts: &EmitOptions) -> Vec<String> {
        emit_initializers("jsonObject", v.as_object().unwrap(), opts)
            .iter()
            .map(|st| format!("{} = {}", st.target, crate::codegen::render_literal(&st.value)))
            .collect()
    }

    #[test]
    fn scalars() {
        let got = lines(json!({"a": 1, "b": "x", "c": true, "d": 2.5}), &EmitOptions::default());
        assert_eq!(got, [
            "jsonObject.a = 1",
            "jsonObject.b = \"x\"",
            "jsonObject.c = true",
            "jsonObject.d = 2.5",
        ]);
    }

    #[test]
    fn nested_paths() {
        let got = lines(json!({"n": {"x": 1, "m": {"s": "q"}}}), &EmitOptions::default());
        assert_eq!(got, ["jsonObject.n.x = 1", "jsonObject.n.m.s = \"q\""]);
    }

    #[test]
    fn arrays_assign_element_values() {
        let got = lines(json!({"arr": [10, 20, 30]}), &EmitOptions::default());
        assert_eq!(got, ["jsonObject.arr[0] = 10", "jsonObject.arr[1] = 20", "jsonObject.arr[2] = 30"]);
    }

    #[test]
    fn legacy_mode_assigns_indices() {
        let opts = EmitOptions { array_initializer: ArrayInitializer::LegacyIndex, ..EmitOptions::default() };
        let got = lines(json!({"arr": ["a", "b"]}), &opts);
        assert_eq!(got, ["jsonObject.arr[0] = 0", "jsonObject.arr[1] = 1"]);
    }

    #[test]
    fn empty_and_invalid_emit_nothing() {
        let got = lines(json!({"arr": [], "mixed": [1, "a"], "nil": null}), &EmitOptions::default());
        assert!(got.is_empty(), "got {got:?}");
    }

    #[test]
    fn strings_are_escaped_on_output() {
        let got = lines(json!({"q": "a\"b\\c"}), &EmitOptions::default());
        assert_eq!(got, [r#"jsonObject.q = "a\"b\\c""#]);
    }
}
