//! CLI logic for the Patchview renderer.
//!
//! This module contains the core CLI logic: load configuration, read a patch
//! document, render it and write the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use patchview::{PatchBuilder, PatchviewError};

/// Run the Patchview CLI application
///
/// This function processes the input file through the Patchview pipeline
/// and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `PatchviewError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed patch documents
/// - Unresolved connections in strict mode
/// - Layout and rendering errors
pub fn run(args: &Args) -> Result<(), PatchviewError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        strict = args.strict;
        "Processing patch"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = PatchBuilder::new(app_config).with_strict(args.strict);
    let patch = builder.parse(&source)?;
    let svg = builder.render_svg(&patch)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
