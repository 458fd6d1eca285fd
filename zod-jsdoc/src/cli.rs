use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.zod-jsdoc.toml):
  Create this file in your project root to set defaults.
  A \"zodJsdoc\" object in package.json is read the same way.

  [zod-jsdoc]
  entry_identifier = \"z\"                    # Root of schema chains
  meta_method = \"meta\"                      # Method used to attach metadata
  reserved_methods = [\"meta\", \"description\"] # Already-documented markers
  import_pattern = '''from\\s*['\"]zod['\"]'''  # Files must match this
  all_files = false                         # Ignore import_pattern
  extensions = [\"ts\", \"tsx\"]               # File types to process
  exclude_folders = [\"generated\"]
  include_folders = [\"dist\"]                # Force-include these
  source_map = true                         # Build position maps
";

/// Shared path arguments (mutually exclusive paths/root).
#[derive(Args, Debug, Default, Clone)]
pub struct PathArgs {
    /// Paths to process (files or directories).
    /// When no paths are provided, defaults to the current directory.
    /// Cannot be used with --root.
    #[arg(conflicts_with = "root")]
    pub paths: Vec<PathBuf>,

    /// Project root, used both as the target and as the containment boundary
    /// for in-place writes.
    /// Cannot be used together with positional path arguments.
    #[arg(long, conflicts_with = "paths")]
    pub root: Option<PathBuf>,
}

/// Overrides for the names the transform looks for.
#[derive(Args, Debug, Default, Clone)]
pub struct NamingOptions {
    /// Root identifier of schema chains (default: z).
    #[arg(long)]
    pub entry: Option<String>,

    /// Method used to attach metadata (default: meta).
    #[arg(long)]
    pub meta_method: Option<String>,

    /// Methods that mark a schema as already documented (repeatable).
    #[arg(long = "reserved")]
    pub reserved: Vec<String>,
}

/// Options for the annotate command.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are legitimately booleans
pub struct AnnotateArgs {
    /// Path options (paths vs root).
    #[command(flatten)]
    pub paths: PathArgs,

    /// Name overrides.
    #[command(flatten)]
    pub naming: NamingOptions,

    /// Write annotated files in place.
    /// Without this flag, only a preview of the changes is shown.
    #[arg(short = 'a', long)]
    pub apply: bool,

    /// Exit with code 1 if any file would change (for CI).
    #[arg(long, conflicts_with = "apply")]
    pub check: bool,

    /// Output a JSON report.
    #[arg(long)]
    pub json: bool,

    /// Process every file, not only those importing the schema library.
    #[arg(long)]
    pub all_files: bool,

    /// Regex a file must match to be processed.
    #[arg(long)]
    pub import_pattern: Option<String>,

    /// File extensions to process (comma separated).
    #[arg(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Folders to exclude.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,

    /// Folders to force-include (overrides default exclusions).
    #[arg(long, alias = "include-folder")]
    pub include_folders: Vec<String>,
}

/// Command line interface configuration using `clap`.
/// Without a subcommand, the arguments are those of `annotate`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "zod-jsdoc - Attach JSDoc comments to Zod schemas as runtime metadata",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    #[command(subcommand)]
    /// The subcommand to execute.
    pub command: Option<Commands>,

    /// Arguments of the default annotate command.
    #[command(flatten)]
    pub annotate: AnnotateArgs,

    /// Enable verbose output (shows files being processed).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
/// Available subcommands.
pub enum Commands {
    /// Annotate documented schemas across a project (the default)
    Annotate {
        /// Annotate options.
        #[command(flatten)]
        args: AnnotateArgs,
    },
    /// Transform a single file and print the result
    Transform {
        /// File to transform.
        file: PathBuf,

        /// Write the result to this file instead of stdout.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Write a Source Map v3 document to this file.
        #[arg(long)]
        map: Option<PathBuf>,

        /// Name overrides.
        #[command(flatten)]
        naming: NamingOptions,
    },
    /// Write a default .zod-jsdoc.toml in the current directory
    Init,
}
