use jaq_core::{compile::Undefined, load, Compiler, Ctx, RcIter};
use jaq_json::Val;
use serde_json::Value;

use crate::error::DocumentError;

/// Run a jq filter over `input`, collecting every output value.
pub fn run_jaq(filter_src: &str, input: &Value) -> Result<Vec<Value>, DocumentError> {
    let loader = load::Loader::new(jaq_std::defs().chain(jaq_json::defs()));
    let arena = load::Arena::default();
    let program = load::File { code: filter_src, path: () };

    let modules = loader
        .load(&arena, program)
        .map_err(format_parse_errors)?;

    let filter = Compiler::default()
        .with_funs(jaq_std::funs().chain(jaq_json::funs()))
        .compile(modules)
        .map_err(format_undefined_errors)?;

    let inputs = RcIter::new(core::iter::empty());
    let mut it = filter.run((Ctx::new([], &inputs), Val::from(input.clone())));

    let mut out = Vec::new();
    while let Some(item) = it.next() {
        let v = item.map_err(|e| DocumentError::Jq(format!("{e:?}")))?;
        // Val: Display -> JSON text
        let v = serde_json::from_str::<Value>(&format!("{v}"))
            .map_err(|e| DocumentError::Jq(format!("filter produced non-JSON output: {e}")))?;
        out.push(v);
    }
    Ok(out)
}

/// Like `run_jaq`, but the filter has to produce exactly one value.
pub fn run_jaq_single(filter_src: &str, input: &Value) -> Result<Value, DocumentError> {
    let mut values = run_jaq(filter_src, input)?;
    match values.len() {
        1 => Ok(values.remove(0)),
        count => Err(DocumentError::JqArity { count }),
    }
}

fn format_parse_errors(
    errs: Vec<(load::File<&str, ()>, load::Error<&str>)>,
) -> DocumentError {
    let mut s = String::new();
    for (file, err) in errs {
        s.push_str(&format!("parse error: {err:?} in `{}`\n", file.code));
    }
    DocumentError::Jq(s)
}

fn format_undefined_errors(
    errs: Vec<(load::File<&str, ()>, Vec<(&str, Undefined)>)>,
) -> DocumentError {
    let mut s = String::new();
    for (file, list) in errs {
        for (name, undef) in list {
            s.push_str(&format!("undefined `{name}`: {undef:?} in `{}`\n", file.code));
        }
    }
    DocumentError::Jq(s)
}
