//! Git operations used by the publish workflow.
//!
//! All commands go through a [`CommandRunner`] and use the system `git`
//! binary, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig
//!
//! Commands other than `clone` run with `git -C <dir>` so the working copy
//! never has to be the process's current directory.

use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

/// Thin client over the `git` command line.
pub struct GitClient<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> GitClient<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Check that `git` can be executed.
    pub fn ensure_available(&self) -> Result<()> {
        let outcome = self
            .runner
            .run(&Invocation::new("git").arg("--version").capture_output())?;
        if outcome.success() {
            Ok(())
        } else {
            Err(Error::ToolValidation {
                tool: "git".to_string(),
                message: outcome.stderr.trim().to_string(),
            })
        }
    }

    /// Clone `url` into `target_dir`.
    pub fn clone_repo(&self, url: &str, target_dir: &Path) -> Result<()> {
        let invocation = Invocation::new("git")
            .args(["clone", url])
            .arg(target_dir.to_string_lossy())
            .capture_output();

        let outcome = self.runner.run(&invocation)?;
        if outcome.success() {
            return Ok(());
        }

        let stderr = outcome.stderr.trim().to_string();
        // Provide helpful error message for common auth failures
        let hint = if stderr.contains("Authentication failed")
            || stderr.contains("Permission denied")
            || stderr.contains("Could not read from remote repository")
        {
            Some(
                "make sure you have push access to the documentation repository \
                 (SSH key in ssh-agent, git credentials, or a personal access token)"
                    .to_string(),
            )
        } else {
            None
        };

        Err(Error::GitClone {
            url: url.to_string(),
            message: stderr,
            hint,
        })
    }

    /// Create `branch` and switch to it.
    pub fn checkout_new_branch(&self, dir: &Path, branch: &str) -> Result<()> {
        self.git(dir, &["checkout", "-b", branch])
    }

    /// Stage every change in the working copy, including deletions.
    pub fn add_all(&self, dir: &Path) -> Result<()> {
        self.git(dir, &["add", "-A"])
    }

    /// Set the commit identity for this working copy only.
    pub fn set_identity(&self, dir: &Path, name: &str, email: &str) -> Result<()> {
        self.git(dir, &["config", "user.name", name])?;
        self.git(dir, &["config", "user.email", email])
    }

    pub fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        self.git(dir, &["commit", "-m", message])
    }

    /// Push `branch` to `remote` and record it as the upstream.
    pub fn push_upstream(&self, dir: &Path, remote: &str, branch: &str) -> Result<()> {
        self.git(dir, &["push", "--set-upstream", remote, branch])
    }

    fn git(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let invocation = Invocation::new("git")
            .arg("-C")
            .arg(dir.to_string_lossy())
            .args(args.iter().copied())
            .capture_output();
        debug!("git {}", args.join(" "));

        let outcome = self.runner.run(&invocation)?;
        if outcome.success() {
            Ok(())
        } else {
            Err(Error::GitCommand {
                command: args.join(" "),
                stderr: outcome.stderr.trim().to_string(),
            })
        }
    }
}
