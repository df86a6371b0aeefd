//! # Add-Version Command Implementation
//!
//! Records a released version in a library's version-switcher manifest
//! (`docs/switcher.json` by default). The manifest is created if missing and
//! only rewritten when the version was actually added; labels without a digit
//! and versions already listed leave it untouched.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use docpub::catalog::merge::{self, MergeOutcome};
use docpub::catalog::FileStore;
use docpub::defaults;
use docpub::output::{Marker, OutputConfig};

/// Add a released version to a version-switcher manifest
#[derive(Args, Debug)]
pub struct AddVersionArgs {
    /// Version to add, e.g. 1.2.0.
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Base URL of the published documentation; the entry points at
    /// `<URL>/<VERSION>/`.
    #[arg(value_name = "URL")]
    pub base_url: String,

    /// Path of the manifest to update.
    #[arg(long, value_name = "FILE", default_value = defaults::SWITCHER_PATH)]
    pub switcher: PathBuf,
}

/// Execute the `add-version` command.
pub fn execute(args: AddVersionArgs, out: &OutputConfig) -> Result<()> {
    let mut store = FileStore::new(&args.switcher);
    let outcome = merge::add_version(&mut store, &args.version, &args.base_url)
        .with_context(|| format!("Failed to update {}", args.switcher.display()))?;

    let line = match outcome {
        MergeOutcome::Added => out.status(
            Marker::Ok,
            format!("Added {} to {}", args.version, args.switcher.display()),
        ),
        MergeOutcome::AlreadyPresent => out.status(
            Marker::Info,
            format!(
                "{} is already listed in {}",
                args.version,
                args.switcher.display()
            ),
        ),
        MergeOutcome::NotVersioned => out.status(
            Marker::Info,
            format!("{} is not a versioned release, nothing to do", args.version),
        ),
    };
    println!("{}", line);
    Ok(())
}
