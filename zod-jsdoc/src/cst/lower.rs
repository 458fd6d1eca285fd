//! CST → lowered tree conversion.
//!
//! Maps tree-sitter nodes onto the closed [`NodeKind`] set using byte ranges
//! only. Comment nodes are dropped here; they are extracted separately.
//!
//! # Lowering rules
//!
//! - **Declarations own their `export`**: a declaration wrapped in an
//!   `export` statement takes the export's start offset
//! - **Accessors are opaque**: getter and setter bodies are never lowered
//! - **Unknown shapes are kept**: anything else becomes `Other` with its
//!   named children, so nested expressions stay reachable

use compact_str::CompactString;
use smallvec::SmallVec;
use tree_sitter::Node;

use crate::ast::{Declarator, Node as AstNode, NodeKind, ObjectMember, Span};

/// Lower the root of a CST into the transform's node model
#[must_use]
pub fn lower_program(root: Node<'_>, source: &str) -> AstNode {
    lower(root, source)
}

fn span_of(node: Node<'_>) -> Span {
    Span::new(node.start_byte(), node.end_byte())
}

fn text_of<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

/// Named children, skipping comments.
fn code_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

fn lower(node: Node<'_>, source: &str) -> AstNode {
    let span = span_of(node);
    match node.kind() {
        "lexical_declaration" | "variable_declaration" => lower_declaration(node, span, source),
        "export_statement" => match node.child_by_field_name("declaration") {
            Some(decl)
                if matches!(decl.kind(), "lexical_declaration" | "variable_declaration") =>
            {
                lower_declaration(decl, span, source)
            }
            _ => lower_other(node, span, source),
        },
        "call_expression" => lower_call(node, span, source),
        "member_expression" => lower_member(node, span, source),
        "identifier" => AstNode::new(
            NodeKind::Identifier(CompactString::new(text_of(node, source))),
            span,
        ),
        "array" => AstNode::new(
            NodeKind::Array(
                code_children(node)
                    .into_iter()
                    .map(|child| lower(child, source))
                    .collect(),
            ),
            span,
        ),
        "object" => lower_object(node, span, source),
        "method_definition" if is_accessor(node) => AstNode::new(NodeKind::Accessor, span),
        _ => lower_other(node, span, source),
    }
}

fn lower_other(node: Node<'_>, span: Span, source: &str) -> AstNode {
    let children = code_children(node)
        .into_iter()
        .map(|child| lower(child, source))
        .collect();
    AstNode::new(NodeKind::Other(children), span)
}

fn lower_declaration(decl: Node<'_>, span: Span, source: &str) -> AstNode {
    let declarators: SmallVec<[Declarator; 1]> = code_children(decl)
        .into_iter()
        .filter(|child| child.kind() == "variable_declarator")
        .map(|declarator| Declarator {
            span: span_of(declarator),
            init: declarator
                .child_by_field_name("value")
                .map(|value| Box::new(lower(value, source))),
        })
        .collect();
    AstNode::new(NodeKind::Declaration(declarators), span)
}

fn lower_call(node: Node<'_>, span: Span, source: &str) -> AstNode {
    let callee = node.child_by_field_name("function");
    let arguments = node
        .child_by_field_name("arguments")
        .filter(|args| args.kind() == "arguments");

    match (callee, arguments) {
        (Some(callee), Some(arguments)) => AstNode::new(
            NodeKind::Call {
                callee: Box::new(lower(callee, source)),
                arguments: code_children(arguments)
                    .into_iter()
                    .map(|arg| lower(arg, source))
                    .collect(),
            },
            span,
        ),
        // Tagged templates and other argument shapes
        _ => lower_other(node, span, source),
    }
}

fn lower_member(node: Node<'_>, span: Span, source: &str) -> AstNode {
    let object = node.child_by_field_name("object");
    let property = node
        .child_by_field_name("property")
        .filter(|prop| prop.kind() == "property_identifier");

    match (object, property) {
        (Some(object), Some(property)) => AstNode::new(
            NodeKind::Member {
                object: Box::new(lower(object, source)),
                property: CompactString::new(text_of(property, source)),
            },
            span,
        ),
        _ => lower_other(node, span, source),
    }
}

fn lower_object(node: Node<'_>, span: Span, source: &str) -> AstNode {
    let members = code_children(node)
        .into_iter()
        .map(|member| {
            let value = (member.kind() == "pair")
                .then(|| member.child_by_field_name("value"))
                .flatten();
            match value {
                Some(value) => ObjectMember::Property {
                    span: span_of(member),
                    value: lower(value, source),
                },
                None => ObjectMember::Other(lower(member, source)),
            }
        })
        .collect();
    AstNode::new(NodeKind::Object(members), span)
}

/// `get name() {}` / `set name(v) {}`, as opposed to a method named `get`.
fn is_accessor(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let is_accessor = node
        .children(&mut cursor)
        .any(|child| !child.is_named() && matches!(child.kind(), "get" | "set"));
    is_accessor
}
