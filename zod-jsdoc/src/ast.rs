//! Lowered syntax model consumed by the transform.
//!
//! The front end turns a concrete syntax tree into this closed set of node
//! shapes. Only the shapes that can host a schema expression get their own
//! variant; everything else is kept as [`NodeKind::Other`] so traversal can
//! still reach nested expressions.

use compact_str::CompactString;
use smallvec::SmallVec;

/// A half-open byte range into the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An expression or statement node with its source range.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Shape of the node
    pub kind: NodeKind,
    /// Byte range in the original source
    pub span: Span,
}

/// Closed set of node shapes understood by the transform.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A declaration list such as `const a = x, b = y`.
    ///
    /// The span starts at a wrapping `export` keyword when there is one.
    Declaration(SmallVec<[Declarator; 1]>),
    /// A call with a parenthesised argument list.
    Call {
        /// The called expression
        callee: Box<Node>,
        /// Arguments in source order
        arguments: Vec<Node>,
    },
    /// Member access with an identifier property (`a.b` or `a?.b`).
    Member {
        /// The accessed object
        object: Box<Node>,
        /// Property name
        property: CompactString,
    },
    /// A bare identifier reference.
    Identifier(CompactString),
    /// An array literal.
    Array(Vec<Node>),
    /// An object literal.
    Object(Vec<ObjectMember>),
    /// A getter or setter declaration. The body is never lowered.
    Accessor,
    /// Any other shape, with its lowered children.
    Other(Vec<Node>),
}

/// One binding inside a [`NodeKind::Declaration`].
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    /// Range of the whole `name = value` binding
    pub span: Span,
    /// The bound value, if any. Boxed so declarators can sit inline.
    pub init: Option<Box<Node>>,
}

/// A member of an object literal.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectMember {
    /// A keyed `key: value` member.
    Property {
        /// Range of the whole member, starting at the key
        span: Span,
        /// The member value
        value: Node,
    },
    /// Methods, accessors, spreads and shorthand members.
    Other(Node),
}

impl Node {
    /// Create a new node
    #[must_use]
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the call parts if this node is a call.
    #[must_use]
    pub fn as_call(&self) -> Option<(&Node, &[Node])> {
        match &self.kind {
            NodeKind::Call { callee, arguments } => Some((&**callee, arguments.as_slice())),
            _ => None,
        }
    }

    /// Returns the object and property if this node is a member access.
    #[must_use]
    pub fn as_member(&self) -> Option<(&Node, &str)> {
        match &self.kind {
            NodeKind::Member { object, property } => Some((&**object, property.as_str())),
            _ => None,
        }
    }

    /// Returns the identifier name if this node is an identifier.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Kind of a source comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    /// `/* ... */`
    Block,
    /// `// ...`
    Line,
}

/// A comment extracted from source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    /// Block or line comment
    pub kind: CommentKind,
    /// The comment text, delimiters included
    pub text: String,
    /// Byte range in the original source
    pub span: Span,
}

impl CommentRecord {
    /// Create a comment record, deriving the kind from the delimiter
    #[must_use]
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        let text = text.into();
        let kind = if text.starts_with("/*") {
            CommentKind::Block
        } else {
            CommentKind::Line
        };
        Self { kind, text, span }
    }

    /// The comment body with its delimiters removed.
    #[must_use]
    pub fn value(&self) -> &str {
        match self.kind {
            CommentKind::Block => {
                let inner = self.text.strip_prefix("/*").unwrap_or(&self.text);
                inner.strip_suffix("*/").unwrap_or(inner)
            }
            CommentKind::Line => self.text.strip_prefix("//").unwrap_or(&self.text),
        }
    }

    /// Whether this is a `/** ... */` style documentation comment.
    #[must_use]
    pub fn is_doc_comment(&self) -> bool {
        self.kind == CommentKind::Block && self.value().contains('*')
    }
}
