//! Fixture-driven tests for the documentation-to-metadata transform.
//!
//! Every fixture under `tests/data/fixtures` holds an input and its expected
//! output, separated by a `// --- result ---` line.
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use zod_jsdoc::cst::{CstParser, Dialect, ParseError};
use zod_jsdoc::rewrite::Origin;
use zod_jsdoc::transform::{transform_source, TransformError, TransformOptions, Transformer};

const SEPARATOR: &str = "// --- result ---";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data/fixtures")
        .join(name)
}

/// Load a fixture as `(input, expected)`.
fn load_fixture(name: &str) -> (String, String) {
    let content = fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {name}: {e}"));
    let (input, expected) = content
        .split_once(SEPARATOR)
        .unwrap_or_else(|| panic!("Fixture {name} has no result section"));
    (input.trim().to_owned(), expected.trim().to_owned())
}

fn parser() -> CstParser {
    CstParser::new(Dialect::TypeScript).unwrap()
}

/// Transform `source`, treating "nothing to do" as an unchanged result.
fn transform(source: &str) -> String {
    match transform_source(source, &mut parser()).unwrap() {
        Some(result) => result.code,
        None => source.to_owned(),
    }
}

fn assert_fixture(name: &str) {
    let (input, expected) = load_fixture(name);
    let actual = transform(&input);
    assert_eq!(actual, expected, "fixture {name} produced unexpected output");

    // The expected output is fully annotated, so a second pass is a no-op
    let again = transform_source(&expected, &mut parser()).unwrap();
    assert!(again.is_none(), "fixture {name} is not idempotent");
}

#[test]
fn test_fixture_array() {
    assert_fixture("basic/array.ts");
}

#[test]
fn test_fixture_chained() {
    assert_fixture("basic/chained.ts");
}

#[test]
fn test_fixture_circular() {
    assert_fixture("basic/circular.ts");
}

#[test]
fn test_fixture_discriminated_union() {
    assert_fixture("basic/discriminated-union.ts");
}

#[test]
fn test_fixture_exported() {
    assert_fixture("basic/exported.ts");
}

#[test]
fn test_fixture_objects() {
    assert_fixture("basic/objects.ts");
}

#[test]
fn test_fixture_primitives() {
    assert_fixture("basic/primitives.ts");
}

#[test]
fn test_fixture_tuples() {
    assert_fixture("basic/tuples.ts");
}

#[test]
fn test_fixture_unions() {
    assert_fixture("basic/unions.ts");
}

#[test]
fn test_fixture_existing_meta() {
    assert_fixture("edge-cases/existing-meta.ts");
}

#[test]
fn test_fixture_special_characters() {
    assert_fixture("edge-cases/special-characters.ts");
}

#[test]
fn test_fixture_not_schemas() {
    let (input, expected) = load_fixture("edge-cases/not-schemas.ts");
    assert_eq!(input, expected);
    assert!(transform_source(&input, &mut parser()).unwrap().is_none());
}

#[test]
fn test_fixture_deprecated() {
    assert_fixture("jsdoc/deprecated.ts");
}

#[test]
fn test_fixture_examples() {
    assert_fixture("jsdoc/examples.ts");
}

#[test]
fn test_fixture_title_and_id() {
    assert_fixture("jsdoc/title-id.ts");
}

#[test]
fn test_copied_text_keeps_its_offsets() {
    let (input, _) = load_fixture("basic/objects.ts");
    let result = transform_source(&input, &mut parser()).unwrap().unwrap();
    let map = result.source_map.expect("source maps are on by default");

    // Every copied range is byte-identical to the original at its offset
    for segment in map.segments() {
        let generated = &result.code[segment.generated.start..segment.generated.end];
        match segment.origin {
            Origin::Copied(start) => {
                assert_eq!(generated, &input[start..start + generated.len()]);
            }
            Origin::Inserted(anchor) => {
                assert!(generated.starts_with(".meta("));
                assert!(result.edits.iter().any(|edit| edit.insert_at == anchor));
            }
        }
    }
    assert_eq!(map.generated_len(), result.code.len());
}

#[test]
fn test_edits_are_reported_in_discovery_order() {
    let source = "/** Outer */\nconst a = z.object({\n  /** Inner */\n  b: z.string(),\n});";
    let result = transform_source(source, &mut parser()).unwrap().unwrap();
    let descriptions: Vec<_> = result
        .edits
        .iter()
        .filter_map(|edit| edit.description.as_deref())
        .collect();
    assert_eq!(descriptions, vec!["binding: Outer", "property: Inner"]);
}

#[test]
fn test_nested_argument_and_binding() {
    let source = "/** Outer */\nconst a = z.array(\n  /** Item */\n  z.string()\n);";
    let actual = transform(source);
    assert_eq!(
        actual,
        "/** Outer */\nconst a = z.array(\n  /** Item */\n  z.string().meta({ description: \"Item\" })\n).meta({ description: \"Outer\" });"
    );
}

#[test]
fn test_custom_names() {
    let transformer = Transformer::new(TransformOptions {
        entry_identifier: "v".to_owned(),
        meta_method: "describe".to_owned(),
        ..TransformOptions::default()
    });
    let source = "/** Age */\nconst age = v.number();\n/** Name */\nconst name = z.string();";
    let result = transformer.transform(source, &mut parser()).unwrap().unwrap();
    assert_eq!(
        result.code,
        "/** Age */\nconst age = v.number().describe({ description: \"Age\" });\n/** Name */\nconst name = z.string();"
    );
}

#[test]
fn test_tsx_dialect() {
    let source = "/** Props */\nexport const Props = z.object({});\nexport const View = () => <div />;";
    let mut parser = CstParser::new(Dialect::Tsx).unwrap();
    let result = transform_source(source, &mut parser).unwrap().unwrap();
    assert!(result
        .code
        .contains("z.object({}).meta({ description: \"Props\" });"));
}

#[test]
fn test_javascript_file_with_jsx() {
    let source = "/** Props */ export const Props = z.object({}); export const View = () => <div />;";
    let dialect = Dialect::from_path(Path::new("view.js")).unwrap();
    let mut parser = CstParser::new(dialect).unwrap();
    let result = transform_source(source, &mut parser).unwrap().unwrap();
    assert_eq!(
        result.code,
        "/** Props */ export const Props = z.object({}).meta({ description: \"Props\" }); export const View = () => <div />;"
    );
}

#[test]
fn test_parse_failure_changes_nothing() {
    let source = "/** Broken */\nconst a = z.object({ b: z.string() ;";
    let result = transform_source(source, &mut parser());
    assert!(matches!(
        result,
        Err(TransformError::Parse(ParseError::Syntax { .. }))
    ));
}

#[test]
fn test_multibyte_text_before_insertion() {
    let source = "/** Größe 📏 */\nconst size = z.number();";
    let actual = transform(source);
    assert_eq!(
        actual,
        "/** Größe 📏 */\nconst size = z.number().meta({ description: \"Größe 📏\" });"
    );
}
