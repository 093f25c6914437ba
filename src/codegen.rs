//! C text emission for the typed IR.
//!
//! A generated unit is a single `main` that declares one anonymous
//! `struct` variable mirroring the document and assigns every value into
//! it:
//!
//! ```c
//! #include <stdio.h>
//! #include <stdbool.h>
//!
//!
//! int main(int argc, char** argv) {
//!     struct {
//!         int a;
//!         union {
//!             int x;
//!         } n;
//!     } jsonObject;
//!
//!     jsonObject.a = 1;
//!     jsonObject.n.x = 1;
//!
//!     return 0;
//! }
//! ```
use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ir::{Layout, Literal, SchemaNode, Statement, TypeTag};

pub const PREAMBLE: &str =
    "#include <stdio.h>\n#include <stdbool.h>\n\n\nint main(int argc, char** argv) {\n";
pub const EPILOGUE: &str = "\treturn 0;\n}\n";

// ————————————————————————————————————————————————————————————————————————————
// IDENTIFIERS & LITERALS
// ————————————————————————————————————————————————————————————————————————————

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex"));

// C11 keywords plus the macros pulled in by the preamble.
const RESERVED: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while", "_Alignas", "_Alignof", "_Atomic",
    "_Bool", "_Complex", "_Generic", "_Imaginary", "_Noreturn", "_Static_assert",
    "_Thread_local", "bool", "true", "false", "NULL",
];

/// Turn an arbitrary JSON key into a usable C identifier.
///
/// Declarations and assignments both go through here, so a field is always
/// spelled the same way on both sides.
pub fn c_ident(key: &str) -> String {
    let mut ident = NON_IDENT.replace_all(key, "_").into_owned();
    if ident.is_empty() {
        return "_".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Quoted C string literal for `s`.
pub fn c_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    let mut prev = '\0';
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // `??x` would be read as a trigraph
            '?' if prev == '?' => out.push_str("\\?"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
        prev = c;
    }
    out.push('"');
    out
}

pub fn render_literal(lit: &Literal) -> String {
    match lit {
        Literal::Number(text) => text.clone(),
        Literal::Bool(b) => b.to_string(),
        Literal::Str(s) => c_string_literal(s),
        Literal::Null => "NULL".to_string(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EMITTER
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Default)]
pub struct Codegen {
    out: String,
}

impl Codegen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_string(self) -> String {
        self.out
    }

    /// Full unit: declarations, assignments, `return 0`.
    pub fn program(&mut self, schema: &SchemaNode, statements: &[Statement]) {
        self.out.push_str(PREAMBLE);
        self.declaration(schema, 0);
        if !statements.is_empty() {
            self.out.push('\n');
            for st in statements {
                self.statement(st);
            }
        }
        self.out.push('\n');
        self.out.push_str(EPILOGUE);
    }

    /// Unit with an empty body. Used when a document could not be read.
    pub fn shell(&mut self) {
        self.out.push_str(PREAMBLE);
        self.out.push_str(EPILOGUE);
    }

    pub fn declaration(&mut self, node: &SchemaNode, depth: usize) {
        let indent = "\t".repeat(depth + 1);
        let inner = "\t".repeat(depth + 2);
        let _ = writeln!(self.out, "{indent}{} {{", node.kind.keyword());
        for field in &node.fields {
            match &field.layout {
                Layout::Scalar => {
                    let _ = writeln!(self.out, "{inner}{} {};", field.tag.c_type(), field.name);
                }
                Layout::Array { len } => {
                    let elem = match &field.tag {
                        TypeTag::List(elem) => elem.c_type(),
                        other => other.c_type(),
                    };
                    let _ = writeln!(self.out, "{inner}{elem} {}[{len}];", field.name);
                }
                Layout::Nested(child) => self.declaration(child, depth + 1),
            }
        }
        let _ = writeln!(self.out, "{indent}}} {};", node.name);
    }

    pub fn statement(&mut self, st: &Statement) {
        let _ = writeln!(self.out, "\t{} = {};", st.target, render_literal(&st.value));
    }
}

// ------------------------------- Tests ------------------------------------ //
