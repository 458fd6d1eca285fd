//! Generated-to-original position mapping.
//!
//! Insertion-only rewriting keeps the map simple: the generated text is a
//! sequence of ranges copied verbatim from the original, interleaved with
//! inserted ranges that all point back at their insertion anchor.

use std::io::Write;

use sourcemap::SourceMapBuilder;

use crate::ast::Span;

/// Where a range of generated bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Copied from the original, starting at this offset
    Copied(usize),
    /// Inserted at this original offset
    Inserted(usize),
}

/// One contiguous range of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Byte range in the generated text
    pub generated: Span,
    /// Source of those bytes
    pub origin: Origin,
}

/// Position map from a rewritten text back to its original.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMap {
    segments: Vec<Segment>,
    original_len: usize,
}

impl SourceMap {
    /// Build a map from `(offset, length)` insertions sorted by offset.
    #[must_use]
    pub fn from_insertions(
        original_len: usize,
        insertions: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut segments = Vec::new();
        let mut original = 0;
        let mut generated = 0;

        for (offset, len) in insertions {
            if offset > original {
                let copied = offset - original;
                segments.push(Segment {
                    generated: Span::new(generated, generated + copied),
                    origin: Origin::Copied(original),
                });
                generated += copied;
                original = offset;
            }
            if len > 0 {
                segments.push(Segment {
                    generated: Span::new(generated, generated + len),
                    origin: Origin::Inserted(offset),
                });
                generated += len;
            }
        }

        if original < original_len {
            segments.push(Segment {
                generated: Span::new(generated, generated + original_len - original),
                origin: Origin::Copied(original),
            });
        }

        Self {
            segments,
            original_len,
        }
    }

    /// Segments in generated order
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Length of the generated text in bytes
    #[must_use]
    pub fn generated_len(&self) -> usize {
        self.segments.last().map_or(0, |s| s.generated.end)
    }

    /// Map a generated byte offset back to the original text.
    ///
    /// The end-of-text offset maps to the end of the original. Returns `None`
    /// past that.
    #[must_use]
    pub fn original_offset(&self, generated: usize) -> Option<usize> {
        if generated == self.generated_len() {
            return Some(self.original_len);
        }
        let index = self
            .segments
            .partition_point(|s| s.generated.end <= generated);
        let segment = self.segments.get(index)?;
        match segment.origin {
            Origin::Copied(start) => Some(start + (generated - segment.generated.start)),
            Origin::Inserted(anchor) => Some(anchor),
        }
    }

    /// Build a Source Map v3 for `generated`, read back against `original`.
    ///
    /// Every generated character gets its own token. Copied characters point
    /// at themselves; inserted ones point at their anchor. Columns count
    /// UTF-16 code units.
    #[must_use]
    pub fn to_sourcemap(
        &self,
        file: &str,
        source: &str,
        original: &str,
        generated: &str,
    ) -> sourcemap::SourceMap {
        let mut builder = SourceMapBuilder::new(Some(file));
        let source_id = builder.add_source(source);
        builder.set_source_contents(source_id, Some(original));

        let mut dst = Position::default();
        let mut src = Position::default();
        for segment in &self.segments {
            let text = generated
                .get(segment.generated.start..segment.generated.end)
                .unwrap_or("");
            let copied = matches!(segment.origin, Origin::Copied(_));
            for c in text.chars() {
                if c != '\n' {
                    builder.add_raw(
                        dst.line,
                        dst.column,
                        src.line,
                        src.column,
                        Some(source_id),
                        None,
                        false,
                    );
                }
                dst.advance(c);
                if copied {
                    src.advance(c);
                }
            }
        }

        builder.into_sourcemap()
    }

    /// Write the map as a Source Map v3 JSON document.
    ///
    /// `file` names the generated file and `source` the original, relative
    /// to wherever the map is stored.
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn write_json<W: Write>(
        &self,
        writer: W,
        file: &str,
        source: &str,
        original: &str,
        generated: &str,
    ) -> Result<(), sourcemap::Error> {
        self.to_sourcemap(file, source, original, generated)
            .to_writer(writer)
    }
}

/// Line and UTF-16 column cursor
#[derive(Debug, Default, Clone, Copy)]
struct Position {
    line: u32,
    column: u32,
}

impl Position {
    fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line = self.line.saturating_add(1);
            self.column = 0;
        } else {
            let units = if c.len_utf16() == 2 { 2 } else { 1 };
            self.column = self.column.saturating_add(units);
        }
    }
}
