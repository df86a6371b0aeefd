//! # API Documentation Build
//!
//! Builds the HTML API documentation of the current repository in two steps:
//!
//! 1. `doxygen <source>/doxygen.conf` extracts the API as XML.
//! 2. `sphinx-build -b html <source> <output>/<version>` renders the site.
//!
//! The version being built is passed to sphinx through the
//! `LIBHAL_API_VERSION` environment variable so the theme's version switcher
//! can highlight it. Both tools are external; this module only checks that
//! they exist, prepares the output directory and invokes them in order.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::{Error, Result};
use crate::runner::{run_checked, CommandRunner, Invocation};

/// Environment variable carrying the version into the sphinx configuration.
pub const VERSION_ENV: &str = "LIBHAL_API_VERSION";

/// Doxygen configuration file name inside the docs source directory.
pub const DOXYGEN_CONFIG: &str = "doxygen.conf";

/// A documentation tool and where to get it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tool {
    pub program: &'static str,
    pub install_hint: &'static str,
}

/// Tools required by [`build_documentation`].
pub const DOC_TOOLS: &[Tool] = &[
    Tool {
        program: "doxygen",
        install_hint: "Doxygen: https://www.doxygen.nl/download.html",
    },
    Tool {
        program: "sphinx-build",
        install_hint: "Sphinx: pip install sphinx",
    },
];

/// Check that every tool in `tools` can report its version.
///
/// All missing tools are reported together in a single error.
pub fn check_dependencies(runner: &dyn CommandRunner, tools: &[Tool]) -> Result<()> {
    let mut missing = Vec::new();
    for tool in tools {
        let available = runner
            .run(&Invocation::new(tool.program).arg("--version").capture_output())
            .map(|outcome| outcome.success())
            .unwrap_or(false);
        if !available {
            missing.push(tool);
        }
    }

    if missing.is_empty() {
        return Ok(());
    }

    let names: Vec<&str> = missing.iter().map(|tool| tool.program).collect();
    let hints: Vec<String> = missing
        .iter()
        .map(|tool| format!("  - {}", tool.install_hint))
        .collect();
    Err(Error::ToolValidation {
        tool: names.join(", "),
        message: format!(
            "missing dependencies, please install:\n{}",
            hints.join("\n")
        ),
    })
}

/// Where a documentation build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub version: String,
    /// Root of the built docs; the site lands in `<output_dir>/<version>`.
    pub output_dir: PathBuf,
    /// Sphinx source directory containing `doxygen.conf`.
    pub source_dir: PathBuf,
}

impl BuildRequest {
    pub fn version_dir(&self) -> PathBuf {
        self.output_dir.join(&self.version)
    }
}

/// Build the documentation described by `request`.
///
/// Returns the directory the HTML site was written to.
pub fn build_documentation(runner: &dyn CommandRunner, request: &BuildRequest) -> Result<PathBuf> {
    let source = &request.source_dir;
    require(source, "Documentation source directory")?;
    let doxyfile = source.join(DOXYGEN_CONFIG);
    require(&doxyfile, "Doxygen configuration")?;

    let version_dir = request.version_dir();
    fs::create_dir_all(&version_dir)?;

    info!("Running doxygen to generate XML files...");
    run_checked(
        runner,
        &Invocation::new("doxygen").arg(doxyfile.to_string_lossy()),
    )?;

    info!("Running sphinx-build to generate HTML documentation...");
    run_checked(
        runner,
        &Invocation::new("sphinx-build")
            .args(["-b", "html"])
            .arg(source.to_string_lossy())
            .arg(version_dir.to_string_lossy())
            .env(VERSION_ENV, request.version.as_str()),
    )?;

    info!("Documentation built successfully in {}", version_dir.display());
    Ok(version_dir)
}

fn require(path: &Path, what: &str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::NotFound {
            what: what.to_string(),
            path: path.to_path_buf(),
        })
    }
}
