//! CST (Concrete Syntax Tree) front end.
//!
//! This module provides Tree-sitter based parsing for:
//! - Byte-precise node ranges for position-anchored insertions
//! - Comment extraction with exact offsets
//! - Lowering into the closed node model in [`crate::ast`]
//!
//! # Design Principles
//!
//! - **Byte-range anchored**: every position is an offset into the original text
//! - **All or nothing**: a tree with syntax errors is rejected, never lowered
//! - **Read-only**: the transform never mutates the tree it is given

mod comments;
mod lower;
mod parser;

pub use comments::extract_comments;
pub use lower::lower_program;
pub use parser::{CstParser, Dialect, ParseError, ParsedSource};
