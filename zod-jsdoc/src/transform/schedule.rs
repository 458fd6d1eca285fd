//! Tree traversal and edit scheduling.
//!
//! The tree is walked once. Four positions are examined for schema
//! expressions: binding initializers, object property values, array elements
//! and call arguments. Accessor bodies are never entered.

use std::fmt;

use rustc_hash::FxHashSet;

use super::associate::find_doc_comment;
use super::classify::{has_existing_metadata, is_schema_expression};
use super::jsdoc::parse_doc_comment;
use super::snippet::build_snippet;
use super::TransformOptions;
use crate::ast::{CommentRecord, Node, NodeKind, ObjectMember};
use crate::rewrite::Edit;

/// A syntactic position that can carry a documented schema expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Initializer of a declared binding
    Binding,
    /// Value of a keyed object member
    Property,
    /// Element of an array or tuple literal
    Element,
    /// Argument of a call
    Argument,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Binding => "binding",
            Self::Property => "property",
            Self::Element => "element",
            Self::Argument => "argument",
        };
        f.write_str(name)
    }
}

/// Walk `program` and produce one edit per documented, unannotated schema
/// expression, in discovery order.
///
/// Offsets in the returned edits refer to `source` as given.
#[must_use]
pub fn schedule_edits(
    program: &Node,
    comments: &[CommentRecord],
    source: &str,
    options: &TransformOptions,
) -> Vec<Edit> {
    let mut scheduler = Scheduler {
        comments,
        source,
        options,
        reserved: options.reserved(),
        edits: Vec::new(),
    };
    scheduler.visit(program);
    scheduler.edits
}

struct Scheduler<'a> {
    comments: &'a [CommentRecord],
    source: &'a str,
    options: &'a TransformOptions,
    reserved: FxHashSet<String>,
    edits: Vec<Edit>,
}

impl Scheduler<'_> {
    fn visit(&mut self, node: &Node) {
        match &node.kind {
            NodeKind::Declaration(declarators) => {
                // Every binding shares the comment above the whole declaration
                for init in declarators.iter().filter_map(|d| d.init.as_deref()) {
                    self.consider(init, node.span.start, Position::Binding);
                    self.visit(init);
                }
            }
            NodeKind::Call { callee, arguments } => {
                self.visit(callee);
                for argument in arguments {
                    self.consider(argument, argument.span.start, Position::Argument);
                    self.visit(argument);
                }
            }
            NodeKind::Member { object, .. } => self.visit(object),
            NodeKind::Array(elements) => {
                for element in elements {
                    self.consider(element, element.span.start, Position::Element);
                    self.visit(element);
                }
            }
            NodeKind::Object(members) => {
                for member in members {
                    match member {
                        ObjectMember::Property { span, value } => {
                            self.consider(value, span.start, Position::Property);
                            self.visit(value);
                        }
                        ObjectMember::Other(other) => self.visit(other),
                    }
                }
            }
            NodeKind::Other(children) => {
                for child in children {
                    self.visit(child);
                }
            }
            NodeKind::Identifier(_) | NodeKind::Accessor => {}
        }
    }

    /// classify, skip annotated, associate, synthesize
    fn consider(&mut self, expr: &Node, anchor: usize, position: Position) {
        if !is_schema_expression(expr, &self.options.entry_identifier) {
            return;
        }
        if has_existing_metadata(expr, &self.reserved) {
            return;
        }
        let Some(comment) = find_doc_comment(anchor, self.comments, self.source) else {
            return;
        };
        let Some(doc) = parse_doc_comment(&comment.text) else {
            return;
        };

        let snippet = build_snippet(&doc, &self.options.meta_method);
        let label = if doc.description.is_empty() {
            position.to_string()
        } else {
            format!("{position}: {}", doc.description)
        };
        self.edits
            .push(Edit::with_description(expr.span.end, snippet, label));
    }
}
