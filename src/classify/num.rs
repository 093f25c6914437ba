use serde_json::Number;

use crate::ir::TypeTag;

pub fn classify_number(n: &Number) -> TypeTag {
    if n.is_i64() || n.is_u64() {
        return TypeTag::Int;
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => TypeTag::Int,
        Some(f) if f.is_finite() => TypeTag::Float,
        _ => TypeTag::Invalid,
    }
}

/// C text for a number already classified as `Int` or `Float`.
///
/// Integral values print without a fractional part (`1.0` → `1`) as long as
/// they fit an `i64`; everything else keeps serde_json's shortest
/// round-trip rendering, which is also valid C.
pub fn render_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            (f as i64).to_string()
        }
        _ => n.to_string(),
    }
}
