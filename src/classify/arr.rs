use serde_json::Value;

use crate::ir::TypeTag;

/// Homogeneous scalar arrays become `List(tag)`; an empty array is
/// `List(Undefined)`. Mixed arrays, and arrays of objects, arrays or nulls,
/// are rejected as a whole: no partial typing.
pub fn classify_array(xs: &[Value]) -> TypeTag {
    let Some(first) = xs.first() else {
        return TypeTag::List(Box::new(TypeTag::Undefined));
    };
    let head = super::classify(first);
    if !head.is_scalar() {
        return TypeTag::Invalid;
    }
    if xs[1..].iter().all(|x| super::classify(x) == head) {
        TypeTag::List(Box::new(head))
    } else {
        TypeTag::Invalid
    }
}
