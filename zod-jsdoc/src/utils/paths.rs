//! Path utilities.
//!
//! - Display normalization for reports
//! - Containment checks before anything is written
//! - Source file discovery with gitignore support

use std::path::{Component, Path, PathBuf};

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;

/// Normalizes a path for CLI display.
///
/// Backslashes become forward slashes and a leading `./` is dropped.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use zod_jsdoc::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\src\\schema.ts")), "src/schema.ts");
/// assert_eq!(normalize_display_path(Path::new("./src/user.ts")), "src/user.ts");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a folder name matches any exclusion pattern.
/// Supports exact names and `*.suffix` wildcards.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    excludes.iter().any(|exclude| match exclude.strip_prefix('*') {
        Some(suffix) if suffix.starts_with('.') => name.ends_with(suffix),
        _ => name == exclude,
    })
}

/// Checks that an existing `path` resolves inside `root`.
///
/// # Errors
///
/// Returns an error if either path cannot be resolved, or if `path` lies
/// outside `root`.
pub fn validate_path_within_root(path: &Path, root: &Path) -> anyhow::Result<PathBuf> {
    let canonical_path = path
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve path {}: {}", path.display(), e))?;
    let canonical_root = root
        .canonicalize()
        .map_err(|e| anyhow::anyhow!("Failed to resolve root {}: {}", root.display(), e))?;

    if canonical_path.starts_with(&canonical_root) {
        Ok(canonical_path)
    } else {
        anyhow::bail!(
            "Refusing to write {}: it is outside of {}",
            path.display(),
            root.display()
        )
    }
}

/// Checks that an output path, which may not exist yet, stays inside `root`
/// (the current directory when `None`).
///
/// The longest existing ancestor is resolved through symlinks; the part that
/// does not exist yet may not contain `..`.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or the path escapes it.
pub fn validate_output_path(path: &Path, root: Option<&Path>) -> anyhow::Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    let root_dir = root.unwrap_or(&current_dir);
    let canonical_root = root_dir.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize root directory {}: {}",
            root_dir.display(),
            e
        )
    })?;

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    let mut ancestor = absolute_path.as_path();
    while !ancestor.exists() {
        match ancestor.parent() {
            Some(parent) => ancestor = parent,
            None => break,
        }
    }

    let canonical_ancestor = ancestor.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize ancestor path {}: {}",
            ancestor.display(),
            e
        )
    })?;

    if !canonical_ancestor.starts_with(&canonical_root) {
        anyhow::bail!(
            "Output path '{}' is outside of '{}'.\n\
             Hint: Use a relative path like './schema.out.ts' or run the command from the target directory.",
            normalize_display_path(&canonical_ancestor),
            normalize_display_path(&canonical_root)
        );
    }

    if let Ok(remainder) = absolute_path.strip_prefix(ancestor) {
        if remainder
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            anyhow::bail!(
                "Output path contains '..' in its non-existent portion: '{}'",
                path.display()
            );
        }
    }

    Ok(absolute_path)
}

/// Checks if a path has one of the given extensions.
#[must_use]
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Collects source files under `root` with gitignore support.
///
/// `.gitignore`, `.git/info/exclude` and the global gitignore are honoured in
/// addition to the default folder exclusions. Folders named in `include` are
/// walked even when excluded.
///
/// Returns the files found and the number of directories visited.
#[must_use]
pub fn collect_source_files(
    root: &Path,
    exclude: &[String],
    include: &[String],
    extensions: &[String],
    verbose: bool,
) -> (Vec<PathBuf>, usize) {
    use ignore::WalkBuilder;

    let mut excludes: Vec<String> = exclude
        .iter()
        .cloned()
        .chain(DEFAULT_EXCLUDE_FOLDERS.iter().map(|&s| s.to_owned()))
        .collect();
    excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let root_for_filter = root.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            // Files are filtered after the walk
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &excludes))
        })
        .build();

    let mut files = Vec::new();
    let mut dir_count = 0;

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();
                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    if path != root {
                        dir_count += 1;
                    }
                    continue;
                }
                if has_extension(path, extensions) {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => {
                if verbose {
                    eprintln!("[VERBOSE] Walk error: {e}");
                }
            }
        }
    }

    files.sort();
    (files, dir_count)
}
