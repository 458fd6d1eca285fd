use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::default_config_toml;
use crate::constants::CONFIG_FILENAME;

/// Executes the init command.
///
/// Writes a default configuration file in the current directory.
pub fn run_init<W: Write>(writer: &mut W) -> Result<i32> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    run_init_in(&current_dir, writer)
}

/// Executes the init command in a specific directory.
///
/// Returns 1 without touching anything if a configuration file already exists.
pub fn run_init_in<W: Write>(root: &Path, writer: &mut W) -> Result<i32> {
    let config_path = root.join(CONFIG_FILENAME);

    if config_path.exists() {
        writeln!(writer, "  • {CONFIG_FILENAME} already exists - not overwriting.")?;
        return Ok(1);
    }

    fs::write(&config_path, default_config_toml())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    writeln!(writer, "  • Created {CONFIG_FILENAME} with default configuration.")?;
    Ok(0)
}
