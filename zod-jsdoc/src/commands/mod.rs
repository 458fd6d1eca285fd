//! Commands module - CLI subcommand implementations.

mod annotate;
mod init;
mod transform;

pub use annotate::{
    run_annotate, AnnotateOptions, AnnotateReport, Annotation, FileChange, FileFailure,
};
pub use init::{run_init, run_init_in};
pub use transform::{run_transform, TransformFileOptions};
