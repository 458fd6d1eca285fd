//! Offset-safe insertion rewriter.
//!
//! This module applies position-anchored insertions to a source text. All
//! offsets refer to the original text; insertions are applied back to front
//! so no pending offset is ever shifted.
//!
//! # Usage
//!
//! ```
//! use zod_jsdoc::rewrite::{Edit, InsertionRewriter};
//!
//! let source = "z.string();";
//! let mut rewriter = InsertionRewriter::new(source);
//! rewriter.add_edit(Edit::new(10, ".optional()"));
//! let rewritten = rewriter.apply().expect("should apply");
//! assert_eq!(rewritten, "z.string().optional();");
//! ```

use super::source_map::SourceMap;

/// A single insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Byte offset in the original text to insert at
    pub insert_at: usize,
    /// Inserted content
    pub text: String,
    /// Optional description for reporting
    pub description: Option<String>,
}

impl Edit {
    /// Create a new insertion
    #[must_use]
    pub fn new(insert_at: usize, text: impl Into<String>) -> Self {
        Self {
            insert_at,
            text: text.into(),
            description: None,
        }
    }

    /// Create an insertion with description
    #[must_use]
    pub fn with_description(
        insert_at: usize,
        text: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            insert_at,
            text: text.into(),
            description: Some(description.into()),
        }
    }

    /// Length of the inserted text in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the insertion is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// Edit offset is past the end of the source
    #[error("Edit {edit_index} out of bounds: offset {insert_at} > source length {source_len}")]
    OutOfBounds {
        /// Index of the bad edit
        edit_index: usize,
        /// Offset of the edit
        insert_at: usize,
        /// Length of the source
        source_len: usize,
    },
    /// Edit offset falls inside a multi-byte character
    #[error("Edit {edit_index} at offset {insert_at} is not on a character boundary")]
    NotCharBoundary {
        /// Index of the bad edit
        edit_index: usize,
        /// Offset of the edit
        insert_at: usize,
    },
}

/// Insertion rewriter anchored on original byte offsets
///
/// Edits landing on the same offset appear in the output in the order they
/// were added.
#[derive(Debug, Clone)]
pub struct InsertionRewriter {
    /// Original source code
    source: String,
    /// Pending edits, in discovery order
    edits: Vec<Edit>,
}

impl InsertionRewriter {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if an edit is out of bounds or splits a character
    pub fn validate(&self) -> Result<(), RewriteError> {
        for (i, edit) in self.edits.iter().enumerate() {
            if edit.insert_at > self.source.len() {
                return Err(RewriteError::OutOfBounds {
                    edit_index: i,
                    insert_at: edit.insert_at,
                    source_len: self.source.len(),
                });
            }
            if !self.source.is_char_boundary(edit.insert_at) {
                return Err(RewriteError::NotCharBoundary {
                    edit_index: i,
                    insert_at: edit.insert_at,
                });
            }
        }
        Ok(())
    }

    /// Apply all edits and return the modified source
    ///
    /// Edits are applied from the highest offset down, later-discovered edits
    /// first on ties, so every pending offset stays valid.
    ///
    /// # Errors
    /// Returns error if an edit is out of bounds or splits a character
    pub fn apply(self) -> Result<String, RewriteError> {
        self.validate()?;

        let mut result = self.source;
        let mut ordered: Vec<(usize, Edit)> = self.edits.into_iter().enumerate().collect();
        ordered.sort_by(|(ia, a), (ib, b)| b.insert_at.cmp(&a.insert_at).then(ib.cmp(ia)));

        for (_, edit) in ordered {
            result.insert_str(edit.insert_at, &edit.text);
        }

        Ok(result)
    }

    /// Apply all edits and describe where every output byte came from
    ///
    /// # Errors
    /// Returns error if an edit is out of bounds or splits a character
    pub fn apply_with_map(self) -> Result<(String, SourceMap), RewriteError> {
        self.validate()?;

        let mut insertions: Vec<(usize, usize)> = self
            .edits
            .iter()
            .map(|edit| (edit.insert_at, edit.len()))
            .collect();
        // Stable: same-offset insertions keep discovery order
        insertions.sort_by_key(|&(offset, _)| offset);
        let map = SourceMap::from_insertions(self.source.len(), insertions);

        let code = self.apply()?;
        Ok((code, map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_insertion() {
        let source = "const a = z.string();";
        let mut rewriter = InsertionRewriter::new(source);
        rewriter.add_edit(Edit::new(20, ".meta({})"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "const a = z.string().meta({});");
    }

    #[test]
    fn test_offsets_refer_to_original_text() {
        let source = "aaa bbb ccc";
        let mut rewriter = InsertionRewriter::new(source);
        // Added front to back; the later offsets must not be shifted
        rewriter.add_edit(Edit::new(3, "1"));
        rewriter.add_edit(Edit::new(7, "22"));
        rewriter.add_edit(Edit::new(11, "333"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "aaa1 bbb22 ccc333");
    }

    #[test]
    fn test_same_offset_keeps_discovery_order() {
        let source = "ab";
        let mut rewriter = InsertionRewriter::new(source);
        rewriter.add_edit(Edit::new(1, "X"));
        rewriter.add_edit(Edit::new(1, "Y"));
        rewriter.add_edit(Edit::new(1, "Z"));

        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, "aXYZb");
    }

    #[test]
    fn test_out_of_bounds_error() {
        let source = "short";
        let mut rewriter = InsertionRewriter::new(source);
        rewriter.add_edit(Edit::new(100, "long"));

        let result = rewriter.apply();
        assert!(matches!(result, Err(RewriteError::OutOfBounds { .. })));
    }

    #[test]
    fn test_char_boundary_error() {
        let source = "é";
        let mut rewriter = InsertionRewriter::new(source);
        rewriter.add_edit(Edit::new(1, "x"));

        let result = rewriter.apply();
        assert!(matches!(
            result,
            Err(RewriteError::NotCharBoundary { edit_index: 0, .. })
        ));
    }

    #[test]
    fn test_insert_at_end_and_start() {
        let mut rewriter = InsertionRewriter::new("mid");
        rewriter.add_edit(Edit::new(3, ">"));
        rewriter.add_edit(Edit::new(0, "<"));

        assert_eq!(rewriter.apply().expect("should apply"), "<mid>");
    }

    #[test]
    fn test_empty_edits() {
        let source = "hello world";
        let rewriter = InsertionRewriter::new(source);
        let result = rewriter.apply().expect("should apply");
        assert_eq!(result, source);
    }

    #[test]
    fn test_apply_with_map_tracks_insertions() {
        let source = "ab";
        let mut rewriter = InsertionRewriter::new(source);
        rewriter.add_edit(Edit::new(1, "XY"));

        let (code, map) = rewriter.apply_with_map().expect("should apply");
        assert_eq!(code, "aXYb");
        assert_eq!(map.original_offset(0), Some(0));
        assert_eq!(map.original_offset(1), Some(1));
        assert_eq!(map.original_offset(2), Some(1));
        assert_eq!(map.original_offset(3), Some(1));
        assert_eq!(map.generated_len(), code.len());
    }
}
