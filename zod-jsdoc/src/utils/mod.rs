//! Utilities module.
//!
//! Offset-to-line conversion for reports, plus the path helpers in [`paths`].

mod paths;

pub use paths::{
    collect_source_files, has_extension, is_excluded, normalize_display_path,
    validate_output_path, validate_path_within_root,
};

/// Converts byte offsets into line numbers.
///
/// Edits carry byte offsets into the original text; reports show lines.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte index of the start of each line.
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Creates a new `LineIndex` by scanning the source for newlines.
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        // '\n' is always a single byte in UTF-8
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Converts a byte offset to a 1-indexed line number.
    #[must_use]
    pub fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        }
    }

    /// Converts a byte offset to a 1-indexed `(line, column)` pair; the
    /// column counts bytes.
    #[must_use]
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = self.line_index(offset);
        let start = self.line_starts.get(line - 1).copied().unwrap_or(0);
        (line, offset - start + 1)
    }
}
