//! # Regenerate Command Implementation
//!
//! Rebuilds `switcher.json` for one library inside a checkout of the shared
//! documentation repository. Every subdirectory of `DIR` is a published
//! version; the previous manifest is overwritten.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use docpub::catalog::scan;
use docpub::defaults;
use docpub::output::{Marker, OutputConfig};

/// Rebuild switcher.json from the version directories of a library
#[derive(Args, Debug)]
pub struct RegenerateArgs {
    /// Directory whose subdirectories are the published versions.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Name of the library repository, used in the version URLs.
    #[arg(long, value_name = "NAME")]
    pub repo_name: String,

    /// GitHub organization hosting the documentation site.
    #[arg(
        long,
        value_name = "ORG",
        env = "DOCPUB_ORGANIZATION",
        default_value = defaults::ORGANIZATION
    )]
    pub organization: String,
}

/// Execute the `regenerate` command.
pub fn execute(args: RegenerateArgs, out: &OutputConfig) -> Result<()> {
    let catalog = scan::regenerate(&args.dir, &args.organization, &args.repo_name)
        .with_context(|| format!("Failed to regenerate catalog in {}", args.dir.display()))?;

    println!(
        "{}",
        out.status(
            Marker::Ok,
            format!(
                "Wrote {} with {} versions",
                args.dir.join(scan::SWITCHER_FILE).display(),
                catalog.len()
            )
        )
    );
    println!("{}", out.heading("Versions:"));
    for version in catalog.versions() {
        println!("   {}", version);
    }
    Ok(())
}
