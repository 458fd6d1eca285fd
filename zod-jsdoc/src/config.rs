//! Project configuration.
//!
//! Settings come from the nearest `.zod-jsdoc.toml` (under a `[zod-jsdoc]`
//! table) or a `package.json` key, searched upward from the target path.
//! Command line flags override both.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, PACKAGE_JSON_KEY};
use crate::transform::TransformOptions;

#[derive(Debug, Deserialize, Default, Clone)]
/// Top-level configuration struct.
pub struct Config {
    #[serde(default, rename = "zod-jsdoc")]
    /// The main configuration section.
    pub zod_jsdoc: ZodJsdocConfig,
    /// The path to the configuration file this was loaded from.
    /// Set during `load_from_path`, `None` if using defaults or programmatic config.
    #[serde(skip)]
    pub config_file_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
/// Configuration options for the transform and file discovery.
pub struct ZodJsdocConfig {
    /// Root identifier of a schema chain.
    #[serde(alias = "entryIdentifier")]
    pub entry_identifier: Option<String>,
    /// Method used to attach metadata.
    #[serde(alias = "metaMethod")]
    pub meta_method: Option<String>,
    /// Methods that mark a schema as already documented.
    #[serde(alias = "reservedMethods")]
    pub reserved_methods: Option<Vec<String>>,
    /// File extensions to process.
    pub extensions: Option<Vec<String>>,
    /// List of folders to exclude.
    #[serde(alias = "excludeFolders")]
    pub exclude_folders: Option<Vec<String>>,
    /// List of folders to include even if excluded by default.
    #[serde(alias = "includeFolders")]
    pub include_folders: Option<Vec<String>>,
    /// Regex a file must match to be processed.
    #[serde(alias = "importPattern")]
    pub import_pattern: Option<String>,
    /// Process every file regardless of the import pattern.
    #[serde(alias = "allFiles")]
    pub all_files: Option<bool>,
    /// Whether to produce position maps.
    #[serde(alias = "sourceMap")]
    pub source_map: Option<bool>,
}

impl ZodJsdocConfig {
    /// Transform options with configured values over the defaults.
    #[must_use]
    pub fn transform_options(&self) -> TransformOptions {
        let mut options = TransformOptions::default();
        if let Some(entry) = &self.entry_identifier {
            options.entry_identifier.clone_from(entry);
        }
        if let Some(method) = &self.meta_method {
            options.meta_method.clone_from(method);
        }
        if let Some(reserved) = &self.reserved_methods {
            options.reserved_methods = reserved.iter().cloned().collect();
        }
        if let Some(source_map) = self.source_map {
            options.source_map = source_map;
        }
        options
    }
}

impl Config {
    /// Loads configuration from default locations (.zod-jsdoc.toml or package.json in current dir).
    #[must_use]
    pub fn load() -> Self {
        Self::load_from_path(Path::new("."))
    }

    /// Loads configuration starting from a specific path and traversing up.
    #[must_use]
    pub fn load_from_path(path: &Path) -> Self {
        let mut current = path.to_path_buf();
        if current.is_file() {
            current.pop();
        }

        loop {
            // 1. Try CONFIG_FILENAME
            let config_toml = current.join(CONFIG_FILENAME);
            if config_toml.exists() {
                if let Ok(content) = fs::read_to_string(&config_toml) {
                    if let Ok(mut config) = toml::from_str::<Config>(&content) {
                        config.config_file_path = Some(config_toml);
                        return config;
                    }
                }
            }

            // 2. Try package.json with a settings key
            let package_json = current.join("package.json");
            if package_json.exists() {
                if let Some(settings) = fs::read_to_string(&package_json)
                    .ok()
                    .and_then(|content| package_json_settings(&content))
                {
                    return Config {
                        zod_jsdoc: settings,
                        config_file_path: Some(package_json),
                    };
                }
            }

            if !current.pop() {
                break;
            }
        }

        Config::default()
    }
}

/// Settings object stored under the package.json key, if present and valid.
fn package_json_settings(content: &str) -> Option<ZodJsdocConfig> {
    let mut value = serde_json::from_str::<serde_json::Value>(content).ok()?;
    let settings = value.get_mut(PACKAGE_JSON_KEY)?.take();
    serde_json::from_value(settings).ok()
}

/// Default contents written by `init`.
#[must_use]
pub fn default_config_toml() -> String {
    format!(
        r#"[{table}]
# Root identifier of schema chains
entry_identifier = "z"
# Method used to attach metadata
meta_method = "meta"
# Methods that mark a schema as already documented
reserved_methods = ["meta", "description"]
# Only files matching this pattern are processed
import_pattern = '''{pattern}'''
all_files = false
# Added to the built-in exclusions (node_modules, dist, ...)
exclude_folders = []
"#,
        table = crate::constants::CONFIG_TABLE,
        pattern = crate::constants::DEFAULT_IMPORT_PATTERN
    )
}
