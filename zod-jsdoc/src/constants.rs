use regex::Regex;
use std::sync::OnceLock;

/// Root identifier of a schema chain.
pub const DEFAULT_ENTRY_IDENTIFIER: &str = "z";

/// Method used to attach metadata.
pub const DEFAULT_META_METHOD: &str = "meta";

/// Methods whose presence in a chain means the schema is already documented.
pub const DEFAULT_RESERVED_METHODS: &[&str] = &["meta", "description"];

/// File extensions the front end can parse.
pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

/// Folders never descended into unless explicitly included.
pub const DEFAULT_EXCLUDE_FOLDERS: &[&str] = &[
    "node_modules",
    ".git",
    ".nuxt",
    ".next",
    ".svelte-kit",
    ".turbo",
    "dist",
    "build",
    "coverage",
];

/// Default pattern a file must match to be considered at all.
pub const DEFAULT_IMPORT_PATTERN: &str = r#"from\s*['"]zod(?:/v4)?['"]"#;

/// Name of the dedicated configuration file.
pub const CONFIG_FILENAME: &str = ".zod-jsdoc.toml";

/// Table holding the settings inside [`CONFIG_FILENAME`].
pub const CONFIG_TABLE: &str = "zod-jsdoc";

/// Key holding the settings inside `package.json`.
pub const PACKAGE_JSON_KEY: &str = "zodJsdoc";

/// Regex for the default import filter.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(DEFAULT_IMPORT_PATTERN).expect("Invalid import regex pattern"))
}
