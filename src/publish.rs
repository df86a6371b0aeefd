//! # Documentation Publishing
//!
//! Publishes one version of a library's built documentation to the shared
//! documentation repository through a pull request.
//!
//! ## Process
//!
//! 1.  **Check**: the built docs for the version must exist locally before
//!     anything touches the network.
//! 2.  **Clone**: clone the docs repository into a temporary directory and
//!     create the publish branch (`{repo_name}-{version}` by default).
//! 3.  **Stage**: copy the built docs to `{repo_name}/{version}/`, merging into
//!     whatever is already there.
//! 4.  **Catalog**: rebuild `{repo_name}/switcher.json` from the directory
//!     listing, so the new version is included.
//! 5.  **Commit and push**: commit as the bot identity and push the branch.
//! 6.  **Pull request**: with a token, open a pull request against `main`.
//!     Without one, the branch is left for a manual pull request.
//!
//! Git, the network and the filesystem are used directly with no retries; the
//! first failure aborts the workflow.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::catalog::scan;
use crate::defaults;
use crate::error::{Error, Result};
use crate::git::GitClient;
use crate::github::{repo_slug_from_url, NewPullRequest, PullRequest, PullRequestApi};
use crate::runner::CommandRunner;

/// What to publish and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub version: String,
    /// Name of the library repository, also its directory in the docs repo.
    pub repo_name: String,
    /// Root of the built docs; `{docs_dir}/{version}` is published.
    pub docs_dir: PathBuf,
    /// Clone URL of the docs repository.
    pub api_repo_url: String,
    pub organization: String,
    /// Publish branch; defaults to `{repo_name}-{version}`.
    pub branch: Option<String>,
}

impl PublishRequest {
    pub fn branch_name(&self) -> String {
        self.branch
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.repo_name, self.version))
    }

    pub fn commit_message(&self) -> String {
        format!("Add {} {} API documentation", self.repo_name, self.version)
    }

    /// `owner/name` of the docs repository.
    pub fn repo_slug(&self) -> String {
        repo_slug_from_url(&self.api_repo_url)
            .unwrap_or_else(|| defaults::api_repo_slug(&self.organization))
    }

    fn source_dir(&self) -> PathBuf {
        self.docs_dir.join(&self.version)
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub branch: String,
    /// `owner/name` of the docs repository.
    pub repo_slug: String,
    /// The opened pull request, or `None` if no token was available.
    pub pull_request: Option<PullRequest>,
    /// Number of versions listed in the regenerated catalog.
    pub catalog_len: usize,
}

/// Runs the publish workflow against a set of capabilities.
pub struct Publisher<'a> {
    runner: &'a dyn CommandRunner,
    pull_requests: Option<&'a dyn PullRequestApi>,
}

impl<'a> Publisher<'a> {
    /// Create a publisher. Pass `None` for `pull_requests` when no token is
    /// available; the branch is then pushed without a pull request.
    pub fn new(
        runner: &'a dyn CommandRunner,
        pull_requests: Option<&'a dyn PullRequestApi>,
    ) -> Self {
        Self {
            runner,
            pull_requests,
        }
    }

    /// Publish using a fresh temporary working directory.
    pub fn publish(&self, request: &PublishRequest) -> Result<PublishReport> {
        let workspace = TempDir::new()?;
        self.publish_in(request, workspace.path())
    }

    /// Publish using `workspace` as the parent of the clone.
    pub fn publish_in(&self, request: &PublishRequest, workspace: &Path) -> Result<PublishReport> {
        let source = request.source_dir();
        if !source.is_dir() {
            return Err(Error::NotFound {
                what: "Documentation".to_string(),
                path: source,
            });
        }

        let git = GitClient::new(self.runner);
        let clone_dir = workspace.join(defaults::API_REPO_NAME);
        let branch = request.branch_name();

        info!("Cloning {} into temporary directory...", request.api_repo_url);
        git.clone_repo(&request.api_repo_url, &clone_dir)?;

        info!("Creating new branch: {}", branch);
        git.checkout_new_branch(&clone_dir, &branch)?;

        let repo_dir = clone_dir.join(&request.repo_name);
        let dest = repo_dir.join(&request.version);
        info!("Copying documentation from {} to {}", source.display(), dest.display());
        copy_tree(&source, &dest)?;

        let catalog = scan::regenerate(&repo_dir, &request.organization, &request.repo_name)?;

        let commit_message = request.commit_message();
        git.add_all(&clone_dir)?;
        git.set_identity(&clone_dir, defaults::BOT_NAME, defaults::BOT_EMAIL)?;
        git.commit(&clone_dir, &commit_message)?;

        info!("Pushing branch to remote...");
        git.push_upstream(&clone_dir, defaults::REMOTE, &branch)?;

        let repo_slug = request.repo_slug();
        let pull_request = match self.pull_requests {
            Some(api) => {
                let new_pull_request = NewPullRequest {
                    title: commit_message,
                    body: format!(
                        "Adds API documentation for {} version {}",
                        request.repo_name, request.version
                    ),
                    head: branch.clone(),
                    base: defaults::BASE_BRANCH.to_string(),
                };
                Some(api.create_pull_request(&repo_slug, &new_pull_request)?)
            }
            None => {
                warn!("GitHub token not found. Branch pushed but PR not created.");
                None
            }
        };

        Ok(PublishReport {
            branch,
            repo_slug,
            pull_request,
            catalog_len: catalog.len(),
        })
    }
}

/// Recursively copy `src` into `dst`, creating directories as needed and
/// overwriting files that already exist.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(src).map_err(|_| Error::NotFound {
            what: "Copied path".to_string(),
            path: entry.path().to_path_buf(),
        })?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
