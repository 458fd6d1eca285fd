//! Single-file transform command.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cst::{CstParser, Dialect};
use crate::rewrite::SourceMap;
use crate::transform::Transformer;
use crate::utils::{normalize_display_path, validate_output_path};

/// Options for the transform command
#[derive(Debug)]
pub struct TransformFileOptions {
    /// File to transform
    pub file: PathBuf,
    /// Destination for the result; stdout when `None`
    pub output: Option<PathBuf>,
    /// Destination for the Source Map v3 document
    pub map: Option<PathBuf>,
    /// Boundary for written files; the current directory when `None`
    pub root: Option<PathBuf>,
    /// Configured transform
    pub transformer: Transformer,
    /// Verbose output
    pub verbose: bool,
}

/// Executes the transform command.
///
/// Prints the transformed text, or the original text when nothing changes.
/// Returns 1 when the file does not parse.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub fn run_transform<W: Write>(options: &TransformFileOptions, writer: &mut W) -> Result<i32> {
    let file = &options.file;
    let display = normalize_display_path(file);
    let source = fs::read_to_string(file).with_context(|| format!("Failed to read {display}"))?;

    let dialect = Dialect::from_path(file).unwrap_or(Dialect::TypeScript);
    let mut parser = CstParser::new(dialect)?;

    let result = match options.transformer.transform(&source, &mut parser) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{} {}: {}", "Warning:".yellow().bold(), display, e);
            return Ok(1);
        }
    };

    if options.verbose {
        let count = result.as_ref().map_or(0, |r| r.edits.len());
        eprintln!("[VERBOSE] {display}: {count} annotations");
    }

    let (code, map) = match result {
        Some(result) => (result.code, result.source_map),
        None => (source.clone(), None),
    };

    match &options.output {
        Some(output) => {
            let output = validate_output_path(output, options.root.as_deref())?;
            fs::write(&output, &code)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        None => {
            write!(writer, "{code}")?;
            writer.flush()?;
        }
    }

    let map_path = options.map.clone().or_else(|| {
        // Alongside the output file when maps are enabled
        options
            .output
            .as_ref()
            .filter(|_| options.transformer.options().source_map)
            .map(|output| append_extension(output, "map"))
    });
    if let Some(map_path) = map_path {
        let map = map.unwrap_or_else(|| SourceMap::from_insertions(source.len(), []));
        let generated_name = options
            .output
            .as_deref()
            .unwrap_or(file)
            .file_name()
            .map_or_else(|| display.clone(), |n| n.to_string_lossy().into_owned());
        let map_path = validate_output_path(&map_path, options.root.as_deref())?;
        let source_name = source_relative_to(file, &map_path);
        let mut out = fs::File::create(&map_path)
            .map(BufWriter::new)
            .with_context(|| format!("Failed to write {}", map_path.display()))?;
        map.write_json(&mut out, &generated_name, &source_name, &source, &code)
            .with_context(|| format!("Failed to write {}", map_path.display()))?;
        out.flush()?;
    }

    Ok(0)
}

/// Path of `file` as written into a map stored at `map_path`.
///
/// Relative to the map's directory when the file lives under it, otherwise
/// just the file name.
fn source_relative_to(file: &Path, map_path: &Path) -> String {
    let relative = file.canonicalize().ok().and_then(|file| {
        let map_dir = map_path.parent()?.canonicalize().ok()?;
        file.strip_prefix(map_dir).ok().map(Path::to_path_buf)
    });
    match relative {
        Some(relative) => normalize_display_path(&relative),
        None => file
            .file_name()
            .map_or_else(|| normalize_display_path(file), |n| n.to_string_lossy().into_owned()),
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
