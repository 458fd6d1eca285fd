//! Doc comment lookup for an annotatable position.

use crate::ast::CommentRecord;

/// Find the documentation comment that directly precedes `anchor`.
///
/// The closest doc comment ending strictly before `anchor` is selected; it only
/// documents the position if nothing but whitespace separates the two. The
/// lookup is position-agnostic: callers pass the start offset of whatever
/// syntactic position they are annotating.
#[must_use]
pub fn find_doc_comment<'c>(
    anchor: usize,
    comments: &'c [CommentRecord],
    source: &str,
) -> Option<&'c CommentRecord> {
    let closest = comments
        .iter()
        .filter(|c| c.is_doc_comment() && c.span.end < anchor)
        .max_by_key(|c| c.span.end)?;

    let between = source.get(closest.span.end..anchor)?;
    between
        .chars()
        .all(char::is_whitespace)
        .then_some(closest)
}
