//! Documentation-to-metadata transform.
//!
//! A single pass over one file's text: parse, schedule insertions, apply.
//!
//! # Pipeline
//!
//! 1. **Front end**: any [`Frontend`] turns the text into a lowered tree and
//!    a comment list, or fails with a [`ParseError`]
//! 2. **Scheduling**: [`schedule_edits`] walks the tree once and emits one
//!    [`Edit`] per documented schema expression that has no metadata yet
//! 3. **Application**: an [`InsertionRewriter`] applies the edits against the
//!    untouched original text
//!
//! No state is shared between invocations, so files can be transformed on
//! independent workers.

mod associate;
mod classify;
mod jsdoc;
mod schedule;
mod snippet;

pub use associate::find_doc_comment;
pub use classify::{has_existing_metadata, is_schema_expression};
pub use jsdoc::{collapse_whitespace, parse_doc_comment, DocTags, ParsedDoc};
pub use schedule::{schedule_edits, Position};
pub use snippet::{build_snippet, quote};

use rustc_hash::FxHashSet;

use crate::constants::{DEFAULT_ENTRY_IDENTIFIER, DEFAULT_META_METHOD, DEFAULT_RESERVED_METHODS};
use crate::cst::{CstParser, ParseError, ParsedSource};
use crate::rewrite::{Edit, InsertionRewriter, RewriteError, SourceMap};

/// A parser producing the lowered tree and comments for one file.
pub trait Frontend {
    /// Parse `source` in full.
    ///
    /// # Errors
    /// Returns error if the source cannot be parsed
    fn parse(&mut self, source: &str) -> Result<ParsedSource, ParseError>;
}

impl Frontend for CstParser {
    fn parse(&mut self, source: &str) -> Result<ParsedSource, ParseError> {
        CstParser::parse(self, source)
    }
}

impl<F> Frontend for F
where
    F: FnMut(&str) -> Result<ParsedSource, ParseError>,
{
    fn parse(&mut self, source: &str) -> Result<ParsedSource, ParseError> {
        self(source)
    }
}

/// Error during a transform
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The front end rejected the source
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The front end reported spans that do not fit the source
    #[error(transparent)]
    Rewrite(#[from] RewriteError),
}

/// Names and switches controlling the transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Root identifier of a schema chain
    pub entry_identifier: String,
    /// Method used to attach metadata
    pub meta_method: String,
    /// Methods that mark an expression as already documented
    pub reserved_methods: FxHashSet<String>,
    /// Whether to produce a position map
    pub source_map: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            entry_identifier: DEFAULT_ENTRY_IDENTIFIER.to_owned(),
            meta_method: DEFAULT_META_METHOD.to_owned(),
            reserved_methods: DEFAULT_RESERVED_METHODS
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
            source_map: true,
        }
    }
}

impl TransformOptions {
    /// Reserved method names, always including the metadata method.
    #[must_use]
    pub fn reserved(&self) -> FxHashSet<String> {
        let mut reserved = self.reserved_methods.clone();
        reserved.insert(self.meta_method.clone());
        reserved
    }
}

/// Output of a transform that changed the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// The rewritten text
    pub code: String,
    /// Always true for a produced result
    pub changed: bool,
    /// Generated-to-original map, when requested
    pub source_map: Option<SourceMap>,
    /// Applied edits, in discovery order
    pub edits: Vec<Edit>,
}

/// Runs the transform with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    options: TransformOptions,
}

impl Transformer {
    /// Create a transformer
    #[must_use]
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[must_use]
    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    /// Transform one file's text.
    ///
    /// Returns `Ok(None)` when nothing needs to change. On error no edit is
    /// ever applied.
    ///
    /// # Errors
    /// Returns error if the front end fails, or if it reports spans outside
    /// the text
    pub fn transform<F>(
        &self,
        code: &str,
        frontend: &mut F,
    ) -> Result<Option<TransformResult>, TransformError>
    where
        F: Frontend + ?Sized,
    {
        let parsed = frontend.parse(code)?;
        let edits = schedule_edits(&parsed.program, &parsed.comments, code, &self.options);
        if edits.is_empty() {
            return Ok(None);
        }

        let mut rewriter = InsertionRewriter::new(code);
        rewriter.add_edits(edits.iter().cloned());

        let (code, source_map) = if self.options.source_map {
            let (code, map) = rewriter.apply_with_map()?;
            (code, Some(map))
        } else {
            (rewriter.apply()?, None)
        };

        Ok(Some(TransformResult {
            code,
            changed: true,
            source_map,
            edits,
        }))
    }
}

/// Transform `code` with default options.
///
/// # Errors
/// Returns error if the front end fails
pub fn transform_source<F>(
    code: &str,
    frontend: &mut F,
) -> Result<Option<TransformResult>, TransformError>
where
    F: Frontend + ?Sized,
{
    Transformer::default().transform(code, frontend)
}
