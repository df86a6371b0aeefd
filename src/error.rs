//! # Error Handling
//!
//! This module defines the centralized error type for the `docpub` library.
//! It uses `thiserror` to describe every failure mode with enough context to
//! produce a useful one-line diagnostic.
//!
//! ## Key Components
//!
//! - **`Error`**: All failures the library can report. Variants carry the
//!   offending path, command, URL or tool so that the CLI can print a short
//!   message without extra bookkeeping.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Version classification never fails and therefore has no variant here.
//! Everything else (malformed manifests, missing tools or directories,
//! subprocess and network failures) is propagated to the caller as-is; no
//! retries or partial recovery happen inside the library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for docpub operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version-switcher manifest exists but is not a valid catalog.
    #[error("Catalog parsing error in {}: {message}", path.display())]
    CatalogParse { path: PathBuf, message: String },

    /// A catalog could not be rendered as JSON.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A required file or directory does not exist.
    #[error("{what} not found at {}", path.display())]
    NotFound { what: String, path: PathBuf },

    /// A version directory name is not valid UTF-8.
    #[error("Invalid version label: {}", path.display())]
    InvalidLabel { path: PathBuf },

    /// Cloning a Git repository failed.
    ///
    /// Includes an optional hint for the most common causes.
    #[error("Git clone error for {url}: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A Git command other than clone exited unsuccessfully.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An external command exited with a non-zero status.
    #[error("Command failed: {command} (exit status: {status}){}", if stderr.is_empty() { String::new() } else { format!(" - {}", stderr) })]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// A required external tool is missing or could not be started.
    #[error("Tool validation error: {tool} - {message}")]
    ToolValidation { tool: String, message: String },

    /// Credentials needed by an operation are absent.
    #[error("Missing credentials: {message}")]
    Credentials { message: String },

    /// An HTTP request failed or returned a non-success status.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory traversal error, wrapped from `walkdir::Error`.
    #[error("Directory traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
