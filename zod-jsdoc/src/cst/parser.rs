//! Tree-sitter based CST parser for TypeScript and TSX source code.
//!
//! Provides the byte-precise tree and comment list the transform consumes.

use std::path::Path;

use tree_sitter::{Node, Parser};

use super::comments::extract_comments;
use super::lower::lower_program;
use crate::ast::{CommentRecord, Node as AstNode};

/// Grammar used to parse a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// TypeScript without JSX
    TypeScript,
    /// TSX; also used for JavaScript, where JSX may appear in any file
    Tsx,
}

impl Dialect {
    /// Pick the grammar for a file extension, if the extension is supported.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" | "jsx" | "js" | "mjs" | "cjs" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Pick the grammar for a path, if its extension is supported.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    fn language(self) -> tree_sitter::Language {
        match self {
            Self::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Self::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// Error during CST parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Failed to create parser
    #[error("Failed to create CST parser: {0}")]
    ParserCreation(String),
    /// The parser produced no tree at all
    #[error("Failed to parse source")]
    ParseFailed,
    /// The tree contains error or missing nodes
    #[error("Syntax error at line {line}, column {column}")]
    Syntax {
        /// 1-indexed line of the first error
        line: usize,
        /// 1-indexed column (bytes) of the first error
        column: usize,
    },
}

/// Output of a front end: the lowered tree plus every comment in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSource {
    /// Root node of the lowered tree
    pub program: AstNode,
    /// All comments, in source order
    pub comments: Vec<CommentRecord>,
}

/// Tree-sitter based CST parser
pub struct CstParser {
    parser: Parser,
}

impl CstParser {
    /// Create a new CST parser for the given dialect
    ///
    /// # Errors
    /// Returns error if parser creation fails
    pub fn new(dialect: Dialect) -> Result<Self, ParseError> {
        let mut parser = Parser::new();

        parser
            .set_language(&dialect.language())
            .map_err(|e| ParseError::ParserCreation(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into a lowered tree and comment list
    ///
    /// # Errors
    /// Returns error if the source does not parse cleanly
    pub fn parse(&mut self, source: &str) -> Result<ParsedSource, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root).map_or((1, 1), |node| {
                let point = node.start_position();
                (point.row + 1, point.column + 1)
            });
            return Err(ParseError::Syntax { line, column });
        }

        Ok(ParsedSource {
            comments: extract_comments(root, source),
            program: lower_program(root, source),
        })
    }
}

/// Depth-first search for the first error or missing node.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;

    #[test]
    fn test_parse_simple_declaration() {
        let source = "const a = z.string();\n";
        let mut parser = CstParser::new(Dialect::TypeScript).unwrap();
        let parsed = parser.parse(source).unwrap();

        assert_eq!(parsed.program.span.start, 0);
        assert_eq!(parsed.program.span.end, source.len());
        let NodeKind::Other(statements) = &parsed.program.kind else {
            panic!("program should lower to Other");
        };
        assert!(matches!(statements[0].kind, NodeKind::Declaration(_)));
    }

    #[test]
    fn test_syntax_error_reports_location() {
        let source = "const a = z.object({\n  name: z.string(,\n});\n";
        let mut parser = CstParser::new(Dialect::TypeScript).unwrap();
        let err = parser.parse(source).unwrap_err();

        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(
            Dialect::from_path(Path::new("src/schema.ts")),
            Some(Dialect::TypeScript)
        );
        assert_eq!(
            Dialect::from_path(Path::new("src/Form.tsx")),
            Some(Dialect::Tsx)
        );
        assert_eq!(
            Dialect::from_path(Path::new("src/view.js")),
            Some(Dialect::Tsx)
        );
        assert_eq!(
            Dialect::from_path(Path::new("lib/index.mjs")),
            Some(Dialect::Tsx)
        );
        assert_eq!(Dialect::from_path(Path::new("src/App.vue")), None);
        assert_eq!(Dialect::from_path(Path::new("README")), None);
    }

    #[test]
    fn test_tsx_parses_jsx() {
        let source = "const view = <div>{label}</div>;\n";
        let mut parser = CstParser::new(Dialect::Tsx).unwrap();
        assert!(parser.parse(source).is_ok());
    }
}
