//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Env, WriteStyle};

use crate::commands;
use docpub::output::OutputConfig;

/// docpub - Build, publish and index versioned API documentation
#[derive(Parser, Debug)]
#[command(name = "docpub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace). `RUST_LOG` takes
    /// precedence when set.
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "info",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the API documentation for one version
    Build(commands::build::BuildArgs),

    /// Publish built documentation to the shared documentation repository
    Deploy(commands::deploy::DeployArgs),

    /// Add a released version to a version-switcher manifest
    AddVersion(commands::add_version::AddVersionArgs),

    /// Rebuild switcher.json from the version directories of a library
    Regenerate(commands::regenerate::RegenerateArgs),

    /// Build conan packages and upload them to a package repository
    Package(commands::package::PackageArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let out = OutputConfig::from_env_and_flag(&self.color);
        init_logging(&self.log_level, out);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &out),
            Commands::Deploy(args) => commands::deploy::execute(args, &out),
            Commands::AddVersion(args) => commands::add_version::execute(args, &out),
            Commands::Regenerate(args) => commands::regenerate::execute(args, &out),
            Commands::Package(args) => commands::package::execute(args, &out),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str, out: OutputConfig) {
    let write_style = if out.use_color {
        WriteStyle::Auto
    } else {
        WriteStyle::Never
    };
    // Ignore the error if a logger is already installed
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .write_style(write_style)
        .try_init();
}
