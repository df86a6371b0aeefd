//! # docpub CLI
//!
//! This is the binary entry point for the `docpub` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and output styling from the global flags.
//! - Executing the appropriate command and reporting failures with a
//!   non-zero exit status.
//!
//! The core logic lives in the `docpub` library crate; the binary is a thin
//! wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
