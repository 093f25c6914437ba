//! JSON object → declaration tree.
//!
//! Depth 0 is always a `struct`; deeper objects follow
//! `EmitOptions::nested_layout` (a `union` unless told otherwise). Keys that
//! classify as `Invalid` are left out without comment, the same way
//! `init::emit_initializers` skips them.

use serde_json::{Map, Value};

use crate::classify::classify;
use crate::codegen::{c_ident, Codegen};
use crate::ir::{BlockKind, Field, Layout, SchemaNode, TypeTag};
use crate::options::{EmitOptions, NestedLayout};

pub fn build_schema(name: &str, obj: &Map<String, Value>, depth: usize, opts: &EmitOptions) -> SchemaNode {
    let kind = match (depth, opts.nested_layout) {
        (0, _) => BlockKind::Struct,
        (_, NestedLayout::Union) => BlockKind::Union,
        (_, NestedLayout::Struct) => BlockKind::Struct,
    };

    let mut fields = Vec::with_capacity(obj.len());
    for (key, val) in obj {
        let tag = classify(val);
        let layout = match (&tag, val) {
            (TypeTag::Invalid, _) => continue,
            (TypeTag::List(_), Value::Array(xs)) => Layout::Array { len: xs.len() },
            (TypeTag::Object, Value::Object(child)) => {
                Layout::Nested(Box::new(build_schema(key, child, depth + 1, opts)))
            }
            _ => Layout::Scalar,
        };
        fields.push(Field { name: c_ident(key), tag, layout });
    }

    SchemaNode { name: c_ident(name), kind, fields }
}

/// Declaration text for one object, as it appears inside `main`.
pub fn declare(name: &str, obj: &Map<String, Value>, depth: usize, opts: &EmitOptions) -> String {
    let node = build_schema(name, obj, depth, opts);
    let mut cg = Codegen::new();
    cg.declaration(&node, depth);
    cg.into_string()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_of(v: Value) -> SchemaNode {
        build_schema("jsonObject", v.as_object().unwrap(), 0, &EmitOptions::default())
    }

    fn nested(field: &Field) -> &SchemaNode {
        match &field.layout {
            Layout::Nested(n) => n,
            other => panic!("expected nested block, got {other:?}"),
        }
    }

    #[test]
    fn scalar_fields_keep_key_order() {
        let node = schema_of(json!({"z": 1, "a": "x", "m": true, "f": 0.5}));
        let names: Vec<_> = node.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m", "f"]);
        let tys: Vec<_> = node.fields.iter().map(|f| f.tag.c_type()).collect();
        assert_eq!(tys, ["int", "char*", "bool", "float"]);
        assert_eq!(node.kind, BlockKind::Struct);
    }

    #[test]
    fn nested_objects_are_unions_at_every_depth() {
        let node = schema_of(json!({"n": {"x": 1, "deeper": {"y": 2}}}));
        let n = nested(&node.fields[0]);
        assert_eq!(n.kind, BlockKind::Union);
        assert_eq!(n.name, "n");
        let deeper = nested(&n.fields[1]);
        assert_eq!(deeper.kind, BlockKind::Union);
    }

    #[test]
    fn struct_layout_switch_applies_below_root_only() {
        let opts = EmitOptions { nested_layout: NestedLayout::Struct, ..EmitOptions::default() };
        let v = json!({"n": {"x": 1}});
        let node = build_schema("root", v.as_object().unwrap(), 0, &opts);
        assert_eq!(node.kind, BlockKind::Struct);
        assert_eq!(nested(&node.fields[0]).kind, BlockKind::Struct);
    }

    #[test]
    fn arrays_record_observed_length() {
        let node = schema_of(json!({"arr": [1, 2, 3], "none": []}));
        assert!(matches!(node.fields[0].layout, Layout::Array { len: 3 }));
        assert!(matches!(node.fields[1].layout, Layout::Array { len: 0 }));
        assert_eq!(node.fields[1].tag, TypeTag::List(Box::new(TypeTag::Undefined)));
    }

    #[test]
    fn invalid_values_are_omitted() {
        let node = schema_of(json!({"a": null, "b": [1, "x"], "c": [{"k": 1}], "d": 4}));
        assert_eq!(node.fields.len(), 1);
        assert_eq!(node.fields[0].name, "d");
    }

    #[test]
    fn declare_renders_text() {
        let v = json!({"a": 1, "b": "x", "arr": [], "n": {"x": 1}});
        let text = declare("jsonObject", v.as_object().unwrap(), 0, &EmitOptions::default());
        let expected = concat!(
            "\tstruct {\n",
            "\t\tint a;\n",
            "\t\tchar* b;\n",
            "\t\tvoid* arr[0];\n",
            "\t\tunion {\n",
            "\t\t\tint x;\n",
            "\t\t} n;\n",
            "\t} jsonObject;\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn keys_become_identifiers() {
        let node = schema_of(json!({"first-name": "a", "2nd": 2, "int": 3}));
        let names: Vec<_> = node.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["first_name", "_2nd", "int_"]);
    }
}
