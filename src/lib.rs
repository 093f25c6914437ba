pub mod classify;
pub mod ir;
pub mod schema;
pub mod init;
pub mod codegen;
pub mod convert;
pub mod options;
pub mod error;
pub mod cli;
pub mod jq_exec;
pub mod path_de;

pub use convert::{Conversion, Converter, Diagnostic, FileFormat, InputDocument, OutputDocument};
pub use error::{ConfigError, ConvertError, DocumentError};
pub use options::{ArrayInitializer, EmitOptions, NestedLayout};
