//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `docpub`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`. Options that are usually set once per CI job fall
//!   back to environment variables.
//! - An `execute` function that takes the parsed `Args` and the output
//!   configuration, calls into the `docpub` library and prints a short
//!   summary.

pub mod add_version;
pub mod build;
pub mod completions;
pub mod deploy;
pub mod package;
pub mod regenerate;
