//! Default values for docpub configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication. Most of them can be
//! overridden by a CLI flag or an environment variable.

/// GitHub organization that owns the libraries and the docs repository.
///
/// Overridden by `--organization` or `DOCPUB_ORGANIZATION`.
pub const ORGANIZATION: &str = "libhal";

/// Clone URL of the shared API documentation repository.
///
/// Overridden by `--api-repo` or `DOCPUB_API_REPO`.
pub const API_REPO_URL: &str = "https://github.com/libhal/api.git";

/// Name of the shared docs repository, used when the owner/name pair cannot
/// be derived from the clone URL.
pub const API_REPO_NAME: &str = "api";

/// Where built documentation is written and read from.
pub const DOCS_DIR: &str = "build/api/";

/// Sphinx source directory of a library repository.
pub const DOCS_SOURCE_DIR: &str = "docs";

/// Version-switcher manifest maintained inside a library repository.
pub const SWITCHER_PATH: &str = "docs/switcher.json";

/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Branch pull requests are opened against.
pub const BASE_BRANCH: &str = "main";

/// Remote the publish branch is pushed to.
pub const REMOTE: &str = "origin";

/// Commit identity used in the docs repository.
pub const BOT_NAME: &str = "libhal-bot";
pub const BOT_EMAIL: &str = "libhal-bot@users.noreply.github.com";

/// Fallback `owner/name` of the docs repository for `organization`.
pub fn api_repo_slug(organization: &str) -> String {
    format!("{}/{}", organization, API_REPO_NAME)
}
