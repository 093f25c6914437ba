//! Minimal CLI: JSON → (c | schema)
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::convert::{Converter, Diagnostic, FileFormat, InputDocument};
use crate::error::ConvertError;
use crate::options::{ArrayInitializer, EmitOptions, NestedLayout};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// embed JSON documents into C source: one typed, initialized struct per document
#[derive(Parser, Debug)]
#[command(version)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit one C source file per input document
    C(COut),
    /// print the inferred declaration tree of each document as JSON
    Schema(SchemaOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON Pointer to select a subnode in each document (e.g. /data/items/0/payload)
    #[arg(long)]
    json_pointer: Option<String>,

    /// JQ pre-process filter for each document; must yield exactly one value
    #[arg(long)]
    jq_expr: Option<String>,

    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct EmitSettings {
    /// JSON config file with emission options; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// name of the top-level C variable
    #[arg(long)]
    root_name: Option<String>,

    /// declare nested objects as structs instead of unions
    #[arg(long, default_value_t = false)]
    nested_structs: bool,

    /// assign array indices instead of element values (matches old output)
    #[arg(long, default_value_t = false)]
    legacy_array_indices: bool,
}

#[derive(clap::Parser, Debug)]
struct COut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    emit_settings: EmitSettings,

    /// output format
    #[arg(long, default_value = "c")]
    to: String,

    /// output directory for generated .c files (stdout if omitted)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    emit_settings: EmitSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_documents(&self) -> Result<Vec<InputDocument>> {
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        source_paths
            .into_iter()
            .map(|source_path| {
                let bytes = std::fs::read(&source_path)
                    .with_context(|| format!("failed to read source file {}", source_path.display()))?;
                Ok(InputDocument { name: source_path.to_string_lossy().to_string(), bytes })
            })
            .collect()
    }
}

impl EmitSettings {
    fn options(&self, input: &InputSettings) -> Result<EmitOptions> {
        let mut opts = match self.config.as_ref() {
            Some(path) => EmitOptions::load(path)?,
            None => EmitOptions::default(),
        };
        if let Some(root_name) = self.root_name.as_ref() {
            opts.root_name = root_name.clone();
        }
        if self.nested_structs {
            opts.nested_layout = NestedLayout::Struct;
        }
        if self.legacy_array_indices {
            opts.array_initializer = ArrayInitializer::LegacyIndex;
        }
        if input.json_pointer.is_some() {
            opts.json_pointer = input.json_pointer.clone();
        }
        if input.jq_expr.is_some() {
            opts.jq_expr = input.jq_expr.clone();
        }
        Ok(opts)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::C(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let output_format = FileFormat::lookup(&target.to)
                    .ok_or_else(|| ConvertError::UnsupportedOutputFormat(target.to.clone()))?;
                let opts = target.emit_settings.options(&target.input_settings)?;
                let converter = Converter::new(opts);

                // 1) read inputs
                let documents = target.input_settings.load_documents()?;

                // 2) convert
                let conversion = converter.convert(&documents, &output_format)?;
                report_diagnostics(&conversion.diagnostics);

                // 3) write
                match target.out_dir.as_ref() {
                    Some(out_dir) => {
                        std::fs::create_dir_all(out_dir)
                            .with_context(|| format!("failed to create {}", out_dir.display()))?;
                        for output in &conversion.outputs {
                            let path = out_dir.join(&output.name);
                            std::fs::write(&path, &output.bytes)
                                .with_context(|| format!("failed to write {}", path.display()))?;
                            eprintln!("{} {}", "wrote".green().bold(), path.display());
                        }
                    }
                    None => {
                        let many = conversion.outputs.len() > 1;
                        for output in &conversion.outputs {
                            if many {
                                println!("/* ==> {} <== */", output.name);
                            }
                            println!("{}", String::from_utf8_lossy(&output.bytes));
                        }
                    }
                }
                Ok(())
            }
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }

                let opts = target.emit_settings.options(&target.input_settings)?;
                let converter = Converter::new(opts);
                let documents = target.input_settings.load_documents()?;

                let mut schemas = serde_json::Map::new();
                let mut diagnostics = Vec::new();
                for doc in documents {
                    match converter.load_document(&doc.bytes) {
                        Ok(value) => {
                            let schema = serde_json::to_value(converter.schema_of(&value))?;
                            schemas.insert(doc.name, schema);
                        }
                        Err(error) => {
                            tracing::warn!(document = %doc.name, %error, "skipping document");
                            diagnostics.push(Diagnostic { document: doc.name, error });
                        }
                    }
                }
                report_diagnostics(&diagnostics);

                let schema_src = serde_json::to_string_pretty(&schemas)?;
                match target.out.as_ref() {
                    Some(out) => write_creating_parent(out, &schema_src)?,
                    None => println!("{schema_src}"),
                }
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

// Each diagnostic is already logged where it happened; this is the summary.
fn report_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let names: Vec<&str> = diagnostics.iter().map(|d| d.document.as_str()).collect();
    eprintln!(
        "{} {} document(s) could not be converted: {}",
        "warning:".yellow().bold(),
        diagnostics.len(),
        names.join(", "),
    );
}

fn write_creating_parent(out: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
}

fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{' ))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
