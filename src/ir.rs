// Strongly-typed IR for C codegen. No serde_json::Value here.

use serde::Serialize;

/// Semantic type of one JSON value, as far as C emission cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeTag {
    Int,
    Float,
    String,
    Boolean,
    List(Box<TypeTag>),      // element tag; always scalar or Undefined
    Object,
    Undefined,               // only ever seen as the element tag of `[]`
    Invalid,                 // dropped by every caller
}

impl TypeTag {
    pub fn is_scalar(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float | TypeTag::String | TypeTag::Boolean)
    }

    /// C spelling for a scalar slot of this tag. Anything without a
    /// natural C type falls back to an opaque pointer.
    pub fn c_type(&self) -> &'static str {
        match self {
            TypeTag::Boolean => "bool",
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::String => "char*",
            _ => "void*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    Struct,
    Union,
}

impl BlockKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Struct => "struct",
            BlockKind::Union => "union",
        }
    }
}

/// One declaration block. Owns its fields and every nested block.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaNode {
    pub name: String,
    pub kind: BlockKind,
    pub fields: Vec<Field>,  // source key order
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub name: String,        // already a C identifier
    pub tag: TypeTag,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub enum Layout {
    Scalar,
    Array { len: usize },
    Nested(Box<SchemaNode>),
}

/// Right-hand side of one assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(String),          // pre-rendered C numeric text
    Bool(bool),
    Str(String),             // raw, unescaped contents
    Null,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub target: String,      // e.g. `jsonObject.pos.xs[2]`
    pub value: Literal,
}
