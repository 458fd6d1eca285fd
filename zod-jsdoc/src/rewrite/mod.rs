//! Edit application.
//!
//! Scheduled insertions are applied against the untouched original text, and
//! the resulting output can be mapped back to original offsets.

mod rewriter;
mod source_map;

pub use rewriter::{Edit, InsertionRewriter, RewriteError};
pub use source_map::{Origin, Segment, SourceMap};
