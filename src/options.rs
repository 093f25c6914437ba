//! Emission options, loadable from a JSON config file.
//!
//! Every field has a default, so a config file only needs the keys it wants
//! to change. CLI flags are applied on top by `cli`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_ROOT_NAME: &str = "jsonObject";

/// How objects below the top level are declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestedLayout {
    /// Nested fields share one storage region. Historical output shape.
    #[default]
    Union,
    /// Nested fields are laid out independently.
    Struct,
}

/// What the right-hand side of an array element assignment is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayInitializer {
    /// `xs[i] = <element i>`
    #[default]
    Values,
    /// `xs[i] = i`, reproducing older generated files.
    LegacyIndex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitOptions {
    /// Name of the top-level variable.
    pub root_name: String,
    pub nested_layout: NestedLayout,
    pub array_initializer: ArrayInitializer,
    /// JSON Pointer selecting the sub-value to convert (e.g. `/data/0`).
    pub json_pointer: Option<String>,
    /// jq filter run on each document; must produce exactly one value.
    pub jq_expr: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            nested_layout: NestedLayout::default(),
            array_initializer: ArrayInitializer::default(),
            json_pointer: None,
            jq_expr: None,
        }
    }
}

impl EmitOptions {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        crate::path_de::from_slice_with_path(&bytes).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }
}
