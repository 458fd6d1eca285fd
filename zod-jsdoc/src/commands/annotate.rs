//! Project-wide annotate command.

use anyhow::Result;
use colored::Colorize;
use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cst::{CstParser, Dialect};
use crate::transform::Transformer;
use crate::utils::{
    collect_source_files, has_extension, normalize_display_path, validate_path_within_root,
    LineIndex,
};

/// Options for the annotate command
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct AnnotateOptions {
    /// Files or directories to process
    pub targets: Vec<PathBuf>,
    /// Boundary for in-place writes
    pub containment_root: PathBuf,
    /// Configured transform
    pub transformer: Transformer,
    /// File extensions to process
    pub extensions: Vec<String>,
    /// Extra folders to exclude
    pub exclude_folders: Vec<String>,
    /// Folders to walk even if excluded
    pub include_folders: Vec<String>,
    /// Files not matching this are skipped; `None` processes every file
    pub import_filter: Option<Regex>,
    /// Write changed files in place
    pub apply: bool,
    /// Fail when any file would change
    pub check: bool,
    /// JSON report instead of text
    pub json: bool,
    /// Verbose output
    pub verbose: bool,
}

/// One metadata call that was (or would be) inserted
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// 1-indexed line of the insertion point
    pub line: usize,
    /// 1-indexed column of the insertion point
    pub column: usize,
    /// Position and documentation summary
    pub description: String,
    /// The inserted text
    pub snippet: String,
}

/// A file with at least one annotation
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    /// Display path
    pub file: String,
    /// Annotations in discovery order
    pub annotations: Vec<Annotation>,
    #[serde(skip)]
    path: PathBuf,
    #[serde(skip)]
    code: String,
}

/// A file that could not be processed
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    /// Display path
    pub file: String,
    /// What went wrong
    pub error: String,
}

/// Result of an annotate run
#[derive(Debug, Default, Serialize)]
pub struct AnnotateReport {
    /// Source files discovered
    pub files_scanned: usize,
    /// Files that passed the import filter
    pub files_matched: usize,
    /// Total annotations across all files
    pub annotations: usize,
    /// Whether changes were written to disk
    pub applied: bool,
    /// Files that change
    pub changes: Vec<FileChange>,
    /// Files that failed to read, parse or write
    pub failures: Vec<FileFailure>,
}

enum FileOutcome {
    Filtered,
    Unchanged,
    Changed(FileChange),
    Failed(FileFailure),
}

/// Executes the annotate command.
///
/// Every file is transformed on its own rayon task with its own parser.
/// Returns the process exit code.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn run_annotate<W: Write>(options: &AnnotateOptions, writer: &mut W) -> Result<i32> {
    let files = discover_files(options);

    if options.verbose {
        eprintln!("[VERBOSE] Found {} source files", files.len());
        match &options.import_filter {
            Some(filter) => eprintln!("[VERBOSE] Import filter: {}", filter.as_str()),
            None => eprintln!("[VERBOSE] Import filter disabled"),
        }
    }

    let progress = if options.json {
        indicatif::ProgressBar::hidden()
    } else {
        crate::output::create_progress_bar(files.len() as u64)
    };

    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| {
            let outcome = process_file(path, options);
            progress.inc(1);
            outcome
        })
        .collect();
    progress.finish_and_clear();

    let mut report = AnnotateReport {
        files_scanned: files.len(),
        ..AnnotateReport::default()
    };
    for outcome in outcomes {
        match outcome {
            FileOutcome::Filtered => {}
            FileOutcome::Unchanged => report.files_matched += 1,
            FileOutcome::Changed(change) => {
                report.files_matched += 1;
                report.annotations += change.annotations.len();
                report.changes.push(change);
            }
            FileOutcome::Failed(failure) => {
                report.files_matched += 1;
                report.failures.push(failure);
            }
        }
    }

    for failure in &report.failures {
        eprintln!(
            "{} {}: {}",
            "Warning:".yellow().bold(),
            failure.file,
            failure.error
        );
    }

    if options.apply {
        write_changes(&mut report, &options.containment_root);
        report.applied = true;
    }

    if options.json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        crate::output::print_changes(writer, &report)?;
        crate::output::print_summary_table(writer, &report)?;
    }

    if options.check && !report.changes.is_empty() {
        return Ok(1);
    }
    Ok(0)
}

fn discover_files(options: &AnnotateOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for target in &options.targets {
        if target.is_file() {
            // Explicit files only need a grammar, not a listed extension
            if Dialect::from_path(target).is_some() || has_extension(target, &options.extensions)
            {
                files.push(target.clone());
            } else if options.verbose {
                eprintln!(
                    "[VERBOSE] Skipping {}: unsupported extension",
                    normalize_display_path(target)
                );
            }
        } else {
            let (found, dirs) = collect_source_files(
                target,
                &options.exclude_folders,
                &options.include_folders,
                &options.extensions,
                options.verbose,
            );
            if options.verbose {
                eprintln!(
                    "[VERBOSE] {}: {} files in {} directories",
                    normalize_display_path(target),
                    found.len(),
                    dirs
                );
            }
            files.extend(found);
        }
    }
    files.sort();
    files.dedup();
    files
}

fn process_file(path: &Path, options: &AnnotateOptions) -> FileOutcome {
    let file = normalize_display_path(path);
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return FileOutcome::Failed(FileFailure {
                file,
                error: e.to_string(),
            })
        }
    };

    if let Some(filter) = &options.import_filter {
        if !filter.is_match(&content) {
            return FileOutcome::Filtered;
        }
    }

    let dialect = Dialect::from_path(path).unwrap_or(Dialect::TypeScript);
    let mut parser = match CstParser::new(dialect) {
        Ok(parser) => parser,
        Err(e) => {
            return FileOutcome::Failed(FileFailure {
                file,
                error: e.to_string(),
            })
        }
    };

    match options.transformer.transform(&content, &mut parser) {
        Ok(None) => FileOutcome::Unchanged,
        Ok(Some(result)) => {
            let index = LineIndex::new(&content);
            let annotations = result
                .edits
                .iter()
                .map(|edit| {
                    let (line, column) = index.line_col(edit.insert_at);
                    Annotation {
                        line,
                        column,
                        description: edit.description.clone().unwrap_or_default(),
                        snippet: edit.text.clone(),
                    }
                })
                .collect();
            FileOutcome::Changed(FileChange {
                file,
                annotations,
                path: path.to_path_buf(),
                code: result.code,
            })
        }
        Err(e) => FileOutcome::Failed(FileFailure {
            file,
            error: e.to_string(),
        }),
    }
}

/// Write every changed file, moving write failures into the failure list.
fn write_changes(report: &mut AnnotateReport, root: &Path) {
    let mut written = Vec::with_capacity(report.changes.len());
    for change in std::mem::take(&mut report.changes) {
        let result = validate_path_within_root(&change.path, root)
            .and_then(|path| fs::write(&path, &change.code).map_err(anyhow::Error::from));
        match result {
            Ok(()) => written.push(change),
            Err(e) => {
                eprintln!("{} {}: {}", "Warning:".yellow().bold(), change.file, e);
                report.annotations -= change.annotations.len();
                report.failures.push(FileFailure {
                    file: change.file,
                    error: e.to_string(),
                });
            }
        }
    }
    report.changes = written;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{get_import_re, DEFAULT_EXTENSIONS};
    use tempfile::TempDir;

    const DOCUMENTED: &str =
        "import { z } from \"zod\";\n\n/** User name */\nexport const name = z.string();\n";

    fn options_for(root: &Path) -> AnnotateOptions {
        AnnotateOptions {
            targets: vec![root.to_path_buf()],
            containment_root: root.to_path_buf(),
            transformer: Transformer::default(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|&s| s.to_owned()).collect(),
            exclude_folders: Vec::new(),
            include_folders: Vec::new(),
            import_filter: Some(get_import_re().clone()),
            apply: false,
            check: false,
            json: false,
            verbose: false,
        }
    }

    #[test]
    fn test_dry_run_leaves_files_untouched() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("schema.ts");
        fs::write(&file, DOCUMENTED).unwrap();

        let mut out = Vec::new();
        let code = run_annotate(&options_for(dir.path()), &mut out).unwrap();

        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), DOCUMENTED);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("schema.ts"));
        assert!(text.contains("User name"));
    }

    #[test]
    fn test_apply_writes_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("schema.ts");
        fs::write(&file, DOCUMENTED).unwrap();

        let mut options = options_for(dir.path());
        options.apply = true;
        run_annotate(&options, &mut Vec::new()).unwrap();

        let annotated = fs::read_to_string(&file).unwrap();
        assert!(annotated.contains(r#"z.string().meta({ description: "User name" });"#));

        // A second run finds nothing left to do
        options.apply = false;
        options.check = true;
        let code = run_annotate(&options, &mut Vec::new()).unwrap();
        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(&file).unwrap(), annotated);
    }

    #[test]
    fn test_check_fails_on_pending_changes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("schema.ts"), DOCUMENTED).unwrap();

        let mut options = options_for(dir.path());
        options.check = true;
        assert_eq!(run_annotate(&options, &mut Vec::new()).unwrap(), 1);
    }

    #[test]
    fn test_import_filter_skips_other_files() {
        let dir = TempDir::new().unwrap();
        let source = "/** Doc */\nexport const a = z.string();\n";
        fs::write(dir.path().join("plain.ts"), source).unwrap();

        let mut options = options_for(dir.path());
        options.json = true;
        let mut out = Vec::new();
        run_annotate(&options, &mut out).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["files_scanned"], 1);
        assert_eq!(report["files_matched"], 0);

        options.import_filter = None;
        let mut out = Vec::new();
        run_annotate(&options, &mut out).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["annotations"], 1);
    }

    #[test]
    fn test_parse_failure_is_reported_not_fatal() {
        let dir = TempDir::new().unwrap();
        let broken = "import { z } from \"zod\";\n/** Doc */\nconst a = z.string(;\n";
        fs::write(dir.path().join("broken.ts"), broken).unwrap();
        fs::write(dir.path().join("good.ts"), DOCUMENTED).unwrap();

        let mut options = options_for(dir.path());
        options.json = true;
        options.apply = true;
        let mut out = Vec::new();
        let code = run_annotate(&options, &mut out).unwrap();

        assert_eq!(code, 0);
        let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(report["failures"].as_array().map(Vec::len), Some(1));
        assert_eq!(report["changes"].as_array().map(Vec::len), Some(1));
        assert_eq!(
            fs::read_to_string(dir.path().join("broken.ts")).unwrap(),
            broken
        );
    }
}
