//! Metadata call synthesis.

use std::fmt::Write;

use super::jsdoc::{collapse_whitespace, ParsedDoc};

/// Build the chained call that attaches `doc` as metadata.
///
/// Keys are emitted in a fixed order (`description`, `deprecated`, `title`,
/// `id`, `examples`) and absent keys are left out. The result is a single
/// line, ready to be inserted right after a schema expression:
///
/// ```
/// use zod_jsdoc::transform::{build_snippet, parse_doc_comment};
///
/// let doc = parse_doc_comment("/** Name of the user */").unwrap();
/// assert_eq!(build_snippet(&doc, "meta"), r#".meta({ description: "Name of the user" })"#);
/// ```
#[must_use]
pub fn build_snippet(doc: &ParsedDoc, method: &str) -> String {
    let mut fields = vec![format!("description: {}", quote(&doc.description))];

    if doc.tags.deprecated {
        fields.push("deprecated: true".to_owned());
    }
    if let Some(title) = &doc.tags.title {
        fields.push(format!("title: {}", quote(title)));
    }
    if let Some(id) = &doc.tags.id {
        fields.push(format!("id: {}", quote(id)));
    }
    if !doc.tags.examples.is_empty() {
        let items = doc
            .tags
            .examples
            .iter()
            .map(|example| quote(example))
            .collect::<Vec<_>>()
            .join(", ");
        fields.push(format!("examples: [ {items} ]"));
    }

    let call = format!(".{method}({{ {} }})", fields.join(", "));
    collapse_whitespace(&call)
}

/// Render `value` as a double-quoted string literal.
///
/// Every input has an escaped form: backslashes, quotes, backticks, `$` and
/// control characters are all escaped, so the literal reads back as exactly
/// `value`.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
