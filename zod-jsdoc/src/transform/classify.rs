//! Schema expression predicates.

use rustc_hash::FxHashSet;

use crate::ast::Node;

/// Checks if a node is a schema expression rooted at `entry`.
///
/// True for `entry.kind(...)` and, recursively, for any call whose callee is a
/// member of another schema expression (`entry.kind().optional().default(x)`).
#[must_use]
pub fn is_schema_expression(node: &Node, entry: &str) -> bool {
    let Some((callee, _)) = node.as_call() else {
        return false;
    };
    let Some((object, _)) = callee.as_member() else {
        return false;
    };

    if object.as_identifier() == Some(entry) {
        return true;
    }

    is_schema_expression(object, entry)
}

/// Checks if a schema expression already carries metadata.
///
/// Walks back down the call chain, so `z.string().meta({}).min(1)` counts as
/// documented even though the outermost call is `min`.
#[must_use]
pub fn has_existing_metadata(node: &Node, reserved: &FxHashSet<String>) -> bool {
    let Some((callee, _)) = node.as_call() else {
        return false;
    };
    let Some((object, property)) = callee.as_member() else {
        return false;
    };

    if reserved.contains(property) {
        return true;
    }

    object.as_call().is_some() && has_existing_metadata(object, reserved)
}
