//! # Build Command Implementation
//!
//! Builds the HTML API documentation of the current library for one version:
//! doxygen extracts the API, sphinx renders the site into
//! `<output-dir>/<version>`. Both tools are checked up front so a missing
//! install is reported before anything is generated.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use docpub::defaults;
use docpub::docs::{self, BuildRequest};
use docpub::output::{Marker, OutputConfig};
use docpub::runner::SystemRunner;

/// Build the API documentation for one version
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Version being documented; becomes the output subdirectory.
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Root directory for built documentation.
    #[arg(long, value_name = "DIR", default_value = defaults::DOCS_DIR)]
    pub output_dir: PathBuf,

    /// Sphinx source directory containing doxygen.conf.
    #[arg(long, value_name = "DIR", default_value = defaults::DOCS_SOURCE_DIR)]
    pub source: PathBuf,
}

/// Execute the `build` command.
pub fn execute(args: BuildArgs, out: &OutputConfig) -> Result<()> {
    let runner = SystemRunner;
    docs::check_dependencies(&runner, docs::DOC_TOOLS)?;

    println!(
        "{}",
        out.status(
            Marker::Build,
            format!("Building documentation for version {}", args.version)
        )
    );

    let request = BuildRequest {
        version: args.version,
        output_dir: args.output_dir,
        source_dir: args.source,
    };
    let site = docs::build_documentation(&runner, &request)
        .with_context(|| format!("Failed to build documentation for {}", request.version))?;

    println!(
        "{}",
        out.status(
            Marker::Ok,
            format!("Documentation written to {}", site.display())
        )
    );
    Ok(())
}
