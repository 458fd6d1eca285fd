//! JSDoc comment interpretation.
//!
//! Splits a doc comment into its free-text description and `@tag` blocks,
//! then keeps the handful of tags that map onto schema metadata.

/// Tags recognised on a schema doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTags {
    /// `@id` body
    pub id: Option<String>,
    /// `@title` body
    pub title: Option<String>,
    /// Whether `@deprecated` was present
    pub deprecated: bool,
    /// Every `@example` body, in source order
    pub examples: Vec<String>,
}

/// A doc comment reduced to the fields attached as metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDoc {
    /// Leading free text, whitespace collapsed
    pub description: String,
    /// Recognised tags
    pub tags: DocTags,
}

/// A raw `@tag` block before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagBlock {
    tag: String,
    type_expr: String,
    name: String,
    description: String,
}

impl TagBlock {
    /// Rebuild the tag body as `name description {type}`, dropping empty parts.
    fn to_raw(&self) -> String {
        let type_part = if self.type_expr.is_empty() {
            String::new()
        } else {
            format!("{{{}}}", self.type_expr)
        };
        let raw = [self.name.as_str(), self.description.as_str(), type_part.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        collapse_whitespace(&raw)
    }
}

/// Interpret a documentation comment.
///
/// Accepts the comment with or without its `/* */` delimiters. Returns `None`
/// when the comment holds neither a description nor any tag.
#[must_use]
pub fn parse_doc_comment(raw: &str) -> Option<ParsedDoc> {
    let lines = comment_lines(raw);

    let mut description_lines = Vec::new();
    let mut blocks: Vec<(String, Vec<&str>)> = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix('@') {
            let tag_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let (tag, body) = rest.split_at(tag_len);
            if !tag.is_empty() {
                blocks.push((tag.to_owned(), vec![body]));
                continue;
            }
        }
        match blocks.last_mut() {
            Some((_, body)) => body.push(trimmed),
            None => description_lines.push(trimmed),
        }
    }

    let description = collapse_whitespace(&description_lines.join(" "));
    if description.is_empty() && blocks.is_empty() {
        return None;
    }

    let mut tags = DocTags::default();
    for (tag, body) in blocks {
        let block = tokenize_tag(tag, &body.join("\n"));
        match block.tag.as_str() {
            "deprecated" => tags.deprecated = true,
            "title" => tags.title = Some(block.to_raw()),
            "id" => tags.id = Some(block.to_raw()),
            "example" => tags.examples.push(block.to_raw()),
            _ => {}
        }
    }

    Some(ParsedDoc { description, tags })
}

/// Strip comment delimiters and the leading `*` gutter from every line.
fn comment_lines(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix("/*").unwrap_or(trimmed);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    inner
        .lines()
        .map(|line| {
            let line = line.trim_start();
            line.strip_prefix('*').unwrap_or(line)
        })
        .collect()
}

/// Split a tag body into `{type}`, name and description.
fn tokenize_tag(tag: String, body: &str) -> TagBlock {
    let mut rest = body.trim_start();

    let mut type_expr = String::new();
    if rest.starts_with('{') {
        if let Some(end) = matching_close(rest, '{', '}') {
            type_expr = rest[1..end].trim().to_owned();
            rest = rest[end + 1..].trim_start();
        }
    }

    let mut name = String::new();
    if rest.starts_with('[') {
        if let Some(end) = matching_close(rest, '[', ']') {
            let inner = &rest[1..end];
            name = inner.split('=').next().unwrap_or("").trim().to_owned();
            rest = rest[end + 1..].trim_start();
        }
    } else {
        let name_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        name = rest[..name_len].to_owned();
        rest = rest[name_len..].trim_start();
    }

    TagBlock {
        tag,
        type_expr,
        name,
        description: collapse_whitespace(rest),
    }
}

/// Byte index of the bracket closing the one at the start of `text`.
fn matching_close(text: &str, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Collapse every whitespace run to a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_comment() {
        let doc = parse_doc_comment("/** Number schema */").unwrap();
        assert_eq!(doc.description, "Number schema");
        assert_eq!(doc.tags, DocTags::default());
    }

    #[test]
    fn test_multiline_description_is_collapsed() {
        let doc = parse_doc_comment(
            "/**\n * A user schema with validation rules\n * This schema defines   the structure\n */",
        )
        .unwrap();
        assert_eq!(
            doc.description,
            "A user schema with validation rules This schema defines the structure"
        );
    }

    #[test]
    fn test_deprecated_with_text() {
        let doc = parse_doc_comment("Deprecated schema\n@deprecated Use X instead").unwrap();
        assert_eq!(doc.description, "Deprecated schema");
        assert!(doc.tags.deprecated);
    }

    #[test]
    fn test_deprecated_without_text() {
        let doc = parse_doc_comment("/**\n * String schema\n * @deprecated\n */").unwrap();
        assert_eq!(doc.description, "String schema");
        assert!(doc.tags.deprecated);
    }

    #[test]
    fn test_examples_in_source_order() {
        let doc = parse_doc_comment(
            "/**\n * Examples\n * @example\n * const a = z.string();\n * @example\n * ```ts\n * const b = z.string();\n * console.log(b);\n * ```\n */",
        )
        .unwrap();
        assert_eq!(doc.description, "Examples");
        assert_eq!(
            doc.tags.examples,
            vec![
                "const a = z.string();".to_owned(),
                "```ts const b = z.string(); console.log(b); ```".to_owned(),
            ]
        );
    }

    #[test]
    fn test_type_only_example() {
        let doc = parse_doc_comment("/**\n * Typed\n * @example\n * {string}\n */").unwrap();
        assert_eq!(doc.tags.examples, vec!["{string}".to_owned()]);
    }

    #[test]
    fn test_type_goes_last_in_raw_body() {
        let doc = parse_doc_comment("/**\n * Typed\n * @example {number} 42 is fine\n */").unwrap();
        assert_eq!(doc.tags.examples, vec!["42 is fine {number}".to_owned()]);
    }

    #[test]
    fn test_title_and_id() {
        let doc = parse_doc_comment(
            "/**\n * User\n * @title User Record\n * @id user-record\n * @see elsewhere\n */",
        )
        .unwrap();
        assert_eq!(doc.tags.title.as_deref(), Some("User Record"));
        assert_eq!(doc.tags.id.as_deref(), Some("user-record"));
        assert!(!doc.tags.deprecated);
        assert!(doc.tags.examples.is_empty());
    }

    #[test]
    fn test_bracketed_name() {
        let doc = parse_doc_comment("/**\n * X\n * @title [Main=Fallback] heading\n */").unwrap();
        assert_eq!(doc.tags.title.as_deref(), Some("Main heading"));
    }

    #[test]
    fn test_inline_at_sign_is_description() {
        let doc = parse_doc_comment("/** Contact us @ support */").unwrap();
        assert_eq!(doc.description, "Contact us @ support");
    }

    #[test]
    fn test_tag_only_comment_has_empty_description() {
        let doc = parse_doc_comment("/** @deprecated */").unwrap();
        assert_eq!(doc.description, "");
        assert!(doc.tags.deprecated);
    }

    #[test]
    fn test_empty_comment_yields_none() {
        assert!(parse_doc_comment("/** */").is_none());
        assert!(parse_doc_comment("/**\n *\n *\n */").is_none());
    }
}
