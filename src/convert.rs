//! Batch conversion: JSON documents in, C source documents out.
//!
//! One output per input, in input order. A document that cannot be read is
//! not fatal: it becomes an empty `main` plus a `Diagnostic`, and the rest
//! of the batch carries on. Only asking for a target other than C source
//! fails the whole call.

use std::borrow::Cow;
use std::path::Path;

use rayon::prelude::*;
use serde_json::{Map, Value};

use crate::codegen::{c_ident, Codegen};
use crate::error::{ConvertError, DocumentError};
use crate::init::emit_initializers;
use crate::ir::SchemaNode;
use crate::options::EmitOptions;
use crate::schema::build_schema;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const SUPPORTED_FORMATS: &[FileFormat] = &[FileFormat::C_SOURCE, FileFormat::JSON];

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Describes one file format the converter can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormat {
    pub name: &'static str,
    pub format: &'static str,
    pub extension: &'static str,
    pub mime: &'static str,
    /// usable as a conversion source
    pub from: bool,
    /// usable as a conversion target
    pub to: bool,
}

impl FileFormat {
    pub const C_SOURCE: FileFormat = FileFormat {
        name: "C Source File",
        format: "c",
        extension: "c",
        mime: "text/x-c",
        from: false,
        to: true,
    };

    pub const JSON: FileFormat = FileFormat {
        name: "JavaScript Object Notation",
        format: "json",
        extension: "json",
        mime: "application/json",
        from: true,
        to: false,
    };

    pub fn lookup(format: &str) -> Option<FileFormat> {
        Converter::supported_formats()
            .iter()
            .copied()
            .find(|f| f.format.eq_ignore_ascii_case(format))
    }
}

#[derive(Debug, Clone)]
pub struct InputDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A document that was degraded to an empty program, and why.
#[derive(Debug)]
pub struct Diagnostic {
    pub document: String,
    pub error: DocumentError,
}

#[derive(Debug)]
pub struct Conversion {
    pub outputs: Vec<OutputDocument>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    opts: EmitOptions,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl Converter {
    pub fn new(opts: EmitOptions) -> Self {
        Self { opts }
    }

    pub fn options(&self) -> &EmitOptions {
        &self.opts
    }

    pub fn supported_formats() -> &'static [FileFormat] {
        SUPPORTED_FORMATS
    }

    pub fn convert(
        &self,
        inputs: &[InputDocument],
        output_format: &FileFormat,
    ) -> Result<Conversion, ConvertError> {
        if *output_format != FileFormat::C_SOURCE {
            return Err(ConvertError::UnsupportedOutputFormat(output_format.format.to_string()));
        }

        let results: Vec<(OutputDocument, Option<Diagnostic>)> = inputs
            .par_iter()
            .map(|doc| self.convert_document(doc, output_format))
            .collect();

        let mut outputs = Vec::with_capacity(results.len());
        let mut diagnostics = Vec::new();
        for (output, diagnostic) in results {
            outputs.push(output);
            diagnostics.extend(diagnostic);
        }
        Ok(Conversion { outputs, diagnostics })
    }

    fn convert_document(
        &self,
        doc: &InputDocument,
        output_format: &FileFormat,
    ) -> (OutputDocument, Option<Diagnostic>) {
        let name = output_name(&doc.name, output_format.extension);
        let (text, diagnostic) = match self.load_document(&doc.bytes) {
            Ok(value) => {
                tracing::debug!(document = %doc.name, output = %name, "converting");
                (self.render(&value), None)
            }
            Err(error) => {
                tracing::warn!(document = %doc.name, %error, "emitting empty program");
                let mut cg = Codegen::new();
                cg.shell();
                let diagnostic = Diagnostic { document: doc.name.clone(), error };
                (cg.into_string(), Some(diagnostic))
            }
        };
        (OutputDocument { name, bytes: text.into_bytes() }, diagnostic)
    }

    /// Decode, parse, then apply the optional JSON pointer and jq filter.
    pub fn load_document(&self, bytes: &[u8]) -> Result<Value, DocumentError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut value = serde_json::from_slice::<Value>(bytes)?;

        if let Some(pointer) = self.opts.json_pointer.as_deref() {
            value = value
                .pointer_mut(pointer)
                .map(Value::take)
                .ok_or_else(|| DocumentError::PointerMissing { pointer: pointer.to_string() })?;
        }
        if let Some(jq_expr) = self.opts.jq_expr.as_deref() {
            value = crate::jq_exec::run_jaq_single(jq_expr, &value)?;
        }
        Ok(value)
    }

    /// Declaration tree for a loaded document.
    pub fn schema_of(&self, value: &Value) -> SchemaNode {
        build_schema(&self.opts.root_name, &root_object(value), 0, &self.opts)
    }

    /// Complete C unit for a loaded document.
    pub fn render(&self, value: &Value) -> String {
        let root = root_object(value);
        let schema = build_schema(&self.opts.root_name, &root, 0, &self.opts);
        let statements = emit_initializers(&c_ident(&self.opts.root_name), &root, &self.opts);
        let mut cg = Codegen::new();
        cg.program(&schema, &statements);
        cg.into_string()
    }
}

/// Non-object roots have nothing to declare; treat them as `{}`.
fn root_object(value: &Value) -> Cow<'_, Map<String, Value>> {
    match value {
        Value::Object(map) => Cow::Borrowed(map),
        other => {
            tracing::debug!(kind = kind_name(other), "root is not an object, declaring an empty struct");
            Cow::Owned(Map::new())
        }
    }
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// `dir/data.v2.json` → `data.c`: everything before the first dot of the
/// file name, plus the target extension.
pub fn output_name(input_name: &str, extension: &str) -> String {
    let file_name = Path::new(input_name)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(input_name);
    let base = match file_name.split('.').next() {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name),
    };
    format!("{base}.{extension}")
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(name: &str, src: &str) -> InputDocument {
        InputDocument { name: name.to_string(), bytes: src.as_bytes().to_vec() }
    }

    fn text(out: &OutputDocument) -> &str {
        std::str::from_utf8(&out.bytes).unwrap()
    }

    #[test]
    fn rejects_non_c_targets_up_front() {
        let err = Converter::default()
            .convert(&[doc("a.json", "{}")], &FileFormat::JSON)
            .unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedOutputFormat(ref f) if f == "json"));
    }

    #[test]
    fn output_names() {
        assert_eq!(output_name("data.json", "c"), "data.c");
        assert_eq!(output_name("dir/sub/data.v2.json", "c"), "data.c");
        assert_eq!(output_name("README", "c"), "README.c");
        assert_eq!(output_name(".hidden.json", "c"), ".hidden.c");
    }

    #[test]
    fn format_lookup() {
        assert_eq!(FileFormat::lookup("C"), Some(FileFormat::C_SOURCE));
        assert_eq!(FileFormat::lookup("json"), Some(FileFormat::JSON));
        assert_eq!(FileFormat::lookup("yaml"), None);
    }

    #[test]
    fn full_program_layout() {
        let conv = Converter::default()
            .convert(&[doc("x.json", r#"{"a": 1, "b": "x"}"#)], &FileFormat::C_SOURCE)
            .unwrap();
        let expected = concat!(
            "#include <stdio.h>\n",
            "#include <stdbool.h>\n",
            "\n",
            "\n",
            "int main(int argc, char** argv) {\n",
            "\tstruct {\n",
            "\t\tint a;\n",
            "\t\tchar* b;\n",
            "\t} jsonObject;\n",
            "\n",
            "\tjsonObject.a = 1;\n",
            "\tjsonObject.b = \"x\";\n",
            "\n",
            "\treturn 0;\n",
            "}\n",
        );
        assert_eq!(text(&conv.outputs[0]), expected);
        assert!(conv.diagnostics.is_empty());
    }

    #[test]
    fn bom_is_ignored() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"{"a": true}"#);
        let value = Converter::default().load_document(&bytes).unwrap();
        assert_eq!(value, json!({"a": true}));
    }

    #[test]
    fn json_pointer_selects_subtree() {
        let conv = Converter::new(EmitOptions {
            json_pointer: Some("/payload".into()),
            ..EmitOptions::default()
        });
        let value = conv.load_document(br#"{"meta": 1, "payload": {"x": 2}}"#).unwrap();
        assert_eq!(value, json!({"x": 2}));

        let err = conv.load_document(br#"{"meta": 1}"#).unwrap_err();
        assert!(matches!(err, DocumentError::PointerMissing { .. }));
    }

    #[test]
    fn non_object_root_declares_empty_struct() {
        let src = Converter::default().render(&json!([1, 2, 3]));
        assert!(src.contains("\tstruct {\n\t} jsonObject;\n"));
        assert!(!src.contains("jsonObject."));
    }

    #[test]
    fn custom_root_name_is_sanitized() {
        let conv = Converter::new(EmitOptions { root_name: "my data".into(), ..EmitOptions::default() });
        let src = conv.render(&json!({"a": 1}));
        assert!(src.contains("} my_data;\n"));
        assert!(src.contains("\tmy_data.a = 1;\n"));
    }
}
