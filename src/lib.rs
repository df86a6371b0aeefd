//! # docpub
//!
//! This library provides the core functionality for building, publishing and
//! indexing versioned API documentation. It is designed to be used by the
//! `docpub` command-line tool but can also be embedded in other release
//! tooling.
//!
//! ## Quick Example
//!
//! ```
//! use docpub::catalog::merge::{add_version, MergeOutcome};
//! use docpub::catalog::MemoryStore;
//! use docpub::version;
//!
//! // Order a set of published labels: branches first, then versions
//! let labels = vec!["1.10.0".to_string(), "main".to_string(), "1.2.0".to_string()];
//! assert_eq!(version::order(labels), vec!["main", "1.2.0", "1.10.0"]);
//!
//! // Record a new release in a version-switcher manifest
//! let mut store = MemoryStore::with_contents(
//!     r#"[{"name": "main", "version": "main", "url": "https://x.github.io/lib/main/"}]"#,
//! );
//! let outcome = add_version(&mut store, "1.0.0", "https://x.github.io/lib").unwrap();
//! assert_eq!(outcome, MergeOutcome::Added);
//! assert!(store.contents().unwrap().contains("https://x.github.io/lib/1.0.0/"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Versions (`version`)**: Classifies labels as branch names or numeric
//!   versions and orders them by version precedence.
//! - **Catalogs (`catalog`)**: The version-switcher manifest consumed by the
//!   documentation theme. New releases are merged into a library's own
//!   manifest (`catalog::merge`) and the published manifest is rebuilt from
//!   the directory tree of the documentation repository (`catalog::scan`).
//! - **External Tools (`runner`, `git`, `docs`, `package`)**: Every external
//!   program is run through the `CommandRunner` trait, so workflows can be
//!   tested without the tools installed.
//! - **Publishing (`publish`, `github`)**: Pushes a built version to the shared
//!   documentation repository and opens a pull request.
//!
//! ## Execution Flow
//!
//! A release of a library typically runs:
//!
//! 1.  **Build**: `docs::build_documentation` renders the site for a version.
//! 2.  **Record**: `catalog::merge::add_version` adds the release to the
//!     library's own manifest.
//! 3.  **Publish**: `publish::Publisher` copies the site into the
//!     documentation repository, rebuilds its manifest and opens a pull
//!     request.

pub mod catalog;
pub mod defaults;
pub mod docs;
pub mod error;
pub mod git;
pub mod github;
pub mod output;
pub mod package;
pub mod publish;
pub mod runner;
pub mod version;

#[cfg(test)]
mod version_proptest;
