use crate::cli::{AnnotateArgs, Cli, Commands, NamingOptions};
use crate::commands::{
    run_annotate, run_init, run_transform, AnnotateOptions, TransformFileOptions,
};
use crate::config::{Config, ZodJsdocConfig};
use crate::constants::{get_import_re, DEFAULT_EXTENSIONS};
use crate::transform::{TransformOptions, Transformer};
use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Runs the tool with the given arguments.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Run the tool with the given arguments, writing output to the specified writer.
///
/// This is the testable version of `run_with_args` that allows output capture.
///
/// # Errors
///
/// Returns an error if argument parsing fails, or if the command execution fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["zod-jsdoc".to_owned()];
    program_args.extend(args);
    let cli_var = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    let verbose = cli_var.verbose;
    if verbose {
        eprintln!("[VERBOSE] zod-jsdoc v{}", env!("CARGO_PKG_VERSION"));
        if let Some(ref command) = cli_var.command {
            eprintln!("[VERBOSE] Executing subcommand: {command:?}");
        }
    }

    match cli_var.command {
        Some(Commands::Init) => run_init(writer),
        Some(Commands::Transform {
            file,
            output,
            map,
            naming,
        }) => {
            if !file.is_file() {
                eprintln!("Error: The file '{}' does not exist.", file.display());
                return Ok(1);
            }
            let config = Config::load_from_path(&file);
            log_config_source(&config, verbose);

            let mut options = transform_options(&config.zod_jsdoc, &naming);
            if map.is_some() {
                options.source_map = true;
            }
            run_transform(
                &TransformFileOptions {
                    file,
                    output,
                    map,
                    root: None,
                    transformer: Transformer::new(options),
                    verbose,
                },
                writer,
            )
        }
        Some(Commands::Annotate { args }) => annotate(args, verbose, writer),
        None => annotate(cli_var.annotate, verbose, writer),
    }
}

fn annotate<W: std::io::Write>(args: AnnotateArgs, verbose: bool, writer: &mut W) -> Result<i32> {
    let targets: Vec<PathBuf> = match (&args.paths.root, args.paths.paths.is_empty()) {
        (Some(root), _) => vec![root.clone()],
        (None, true) => vec![PathBuf::from(".")],
        (None, false) => args.paths.paths.clone(),
    };
    for path in &targets {
        if !path.exists() {
            eprintln!(
                "Error: The file or directory '{}' does not exist.",
                path.display()
            );
            return Ok(1);
        }
    }

    let containment_root = match &args.paths.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    // Load config from the first path
    let config_path = targets.first().map_or(Path::new("."), PathBuf::as_path);
    let config = Config::load_from_path(config_path);
    log_config_source(&config, verbose);
    let settings = &config.zod_jsdoc;

    let mut options = transform_options(settings, &args.naming);
    // Maps are only written by the single-file command
    options.source_map = false;

    let extensions = if args.extensions.is_empty() {
        settings.extensions.clone().unwrap_or_else(|| {
            DEFAULT_EXTENSIONS
                .iter()
                .map(|&ext| ext.to_owned())
                .collect()
        })
    } else {
        args.extensions
    };

    let mut exclude_folders = settings.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(args.exclude_folders);
    let mut include_folders = settings.include_folders.clone().unwrap_or_default();
    include_folders.extend(args.include_folders);

    let all_files = args.all_files || settings.all_files.unwrap_or(false);
    let import_filter = if all_files {
        None
    } else {
        match args.import_pattern.as_ref().or(settings.import_pattern.as_ref()) {
            Some(pattern) => Some(
                Regex::new(pattern)
                    .with_context(|| format!("Invalid import pattern '{pattern}'"))?,
            ),
            None => Some(get_import_re().clone()),
        }
    };

    if verbose {
        eprintln!("[VERBOSE] Using {} threads", rayon::current_num_threads());
        eprintln!("[VERBOSE] Configuration:");
        eprintln!("   Entry identifier: {}", options.entry_identifier);
        eprintln!("   Meta method: {}", options.meta_method);
        eprintln!("   Extensions: {extensions:?}");
        eprintln!("   Paths: {targets:?}");
        if !exclude_folders.is_empty() {
            eprintln!("   Exclude folders: {exclude_folders:?}");
        }
        eprintln!();
    }

    run_annotate(
        &AnnotateOptions {
            targets,
            containment_root,
            transformer: Transformer::new(options),
            extensions,
            exclude_folders,
            include_folders,
            import_filter,
            apply: args.apply,
            check: args.check,
            json: args.json,
            verbose,
        },
        writer,
    )
}

/// Config values, then command-line overrides.
fn transform_options(settings: &ZodJsdocConfig, naming: &NamingOptions) -> TransformOptions {
    let mut options = settings.transform_options();
    if let Some(entry) = &naming.entry {
        options.entry_identifier.clone_from(entry);
    }
    if let Some(method) = &naming.meta_method {
        options.meta_method.clone_from(method);
    }
    if !naming.reserved.is_empty() {
        options.reserved_methods = naming.reserved.iter().cloned().collect();
    }
    options
}

fn log_config_source(config: &Config, verbose: bool) {
    if !verbose {
        return;
    }
    match &config.config_file_path {
        Some(path) => eprintln!("[VERBOSE] Config: {}", path.display()),
        None => eprintln!("[VERBOSE] Config: defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_config() {
        let settings = ZodJsdocConfig {
            entry_identifier: Some("v".to_owned()),
            meta_method: Some("doc".to_owned()),
            ..ZodJsdocConfig::default()
        };
        let naming = NamingOptions {
            entry: Some("s".to_owned()),
            meta_method: None,
            reserved: vec!["describe".to_owned()],
        };
        let options = transform_options(&settings, &naming);
        assert_eq!(options.entry_identifier, "s");
        assert_eq!(options.meta_method, "doc");
        assert_eq!(options.reserved_methods.len(), 1);
    }

    #[test]
    fn test_help_goes_to_writer() {
        let mut out = Vec::new();
        let code = run_with_args_to(vec!["--help".to_owned()], &mut out).unwrap();
        assert_eq!(code, 0);
        assert!(String::from_utf8(out).unwrap().contains("annotate"));
    }

    #[test]
    fn test_unknown_flag_is_an_error_code() {
        let mut out = Vec::new();
        let code = run_with_args_to(vec!["--no-such-flag".to_owned()], &mut out).unwrap();
        assert_eq!(code, 1);
    }
}
