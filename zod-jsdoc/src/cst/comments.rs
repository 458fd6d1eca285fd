//! Comment extraction from TypeScript source using CST.
//!
//! Tree-sitter captures comments as explicit nodes, making extraction reliable.

use tree_sitter::Node;

use crate::ast::{CommentRecord, Span};

/// Extract all comments below `root`, in source order
#[must_use]
pub fn extract_comments(root: Node<'_>, source: &str) -> Vec<CommentRecord> {
    let mut comments = Vec::new();
    extract_comments_recursive(root, source, &mut comments);
    comments
}

fn extract_comments_recursive(node: Node<'_>, source: &str, comments: &mut Vec<CommentRecord>) {
    if node.kind() == "comment" {
        let span = Span::new(node.start_byte(), node.end_byte());
        if let Some(text) = source.get(span.start..span.end) {
            comments.push(CommentRecord::new(text, span));
        }
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        extract_comments_recursive(child, source, comments);
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::CommentKind;
    use crate::cst::{CstParser, Dialect};

    #[test]
    fn test_extract_comments() {
        let source = r"// Module comment
/**
 * Schema
 */
const a = z.object({
  /* plain */
  name: z.string(), // trailing
});
";
        let mut parser = CstParser::new(Dialect::TypeScript).unwrap();
        let parsed = parser.parse(source).unwrap();
        let comments = parsed.comments;

        assert_eq!(comments.len(), 4);
        assert_eq!(comments[0].kind, CommentKind::Line);
        assert!(comments[1].is_doc_comment());
        assert!(comments[1].text.contains("Schema"));
        assert_eq!(comments[2].kind, CommentKind::Block);
        assert!(!comments[2].is_doc_comment());
        assert!(comments[3].text.contains("trailing"));

        // Source order and exact byte ranges
        for pair in comments.windows(2) {
            assert!(pair[0].span.end <= pair[1].span.start);
        }
        for comment in &comments {
            assert_eq!(&source[comment.span.start..comment.span.end], comment.text);
        }
    }
}
