//! Main binary entry point for the `zod-jsdoc` transformer.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so that both binaries in the workspace behave identically.

use anyhow::Result;

fn main() -> Result<()> {
    let code = zod_jsdoc::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
