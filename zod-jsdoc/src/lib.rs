//! Core library for the zod-jsdoc transformer.
//!
//! Finds JSDoc comments that document Zod schema expressions in TypeScript
//! and JavaScript sources, and rewrites the source so each documented schema
//! carries its documentation as a chained `.meta({...})` call.
//!
//! ```
//! use zod_jsdoc::cst::{CstParser, Dialect};
//! use zod_jsdoc::transform::transform_source;
//!
//! let source = "/** User name */\nconst name = z.string();";
//! let mut parser = CstParser::new(Dialect::TypeScript).unwrap();
//! let result = transform_source(source, &mut parser).unwrap().unwrap();
//! assert_eq!(
//!     result.code,
//!     "/** User name */\nconst name = z.string().meta({ description: \"User name\" });"
//! );
//! ```

#![allow(
    clippy::similar_names,
    clippy::format_push_string,
    clippy::map_unwrap_or,
    clippy::items_after_statements
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

/// Lowered syntax model shared by the front end and the transform.
pub mod ast;

/// Tree-sitter front end: parsing, comment extraction and lowering.
pub mod cst;

/// Classification, comment association, doc parsing and edit scheduling.
pub mod transform;

/// Insertion rewriter and position maps.
pub mod rewrite;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module containing utility functions.
pub mod utils;

/// Module defining the entry point logic shared by both binaries.
pub mod entry_point;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
