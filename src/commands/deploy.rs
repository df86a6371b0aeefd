//! # Deploy Command Implementation
//!
//! Publishes a built documentation version to the shared documentation
//! repository. The docs must already exist under `<docs-dir>/<version>`
//! (see `docpub build`).
//!
//! With `GITHUB_TOKEN` set, a pull request is opened against `main`.
//! Without it, the branch is still pushed and its name is printed so a pull
//! request can be opened by hand.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use docpub::defaults;
use docpub::git::GitClient;
use docpub::github::{GitHubClient, PullRequestApi};
use docpub::output::{Marker, OutputConfig};
use docpub::publish::{PublishRequest, Publisher};
use docpub::runner::SystemRunner;

/// Publish built documentation to the shared documentation repository
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Version to publish.
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Name of the library repository; becomes its directory in the docs
    /// repository.
    #[arg(long, value_name = "NAME")]
    pub repo_name: String,

    /// Root directory of the built documentation.
    #[arg(long, value_name = "DIR", default_value = defaults::DOCS_DIR)]
    pub docs_dir: PathBuf,

    /// Clone URL of the documentation repository.
    #[arg(
        long,
        value_name = "URL",
        env = "DOCPUB_API_REPO",
        default_value = defaults::API_REPO_URL
    )]
    pub api_repo: String,

    /// GitHub organization hosting the documentation site.
    #[arg(
        long,
        value_name = "ORG",
        env = "DOCPUB_ORGANIZATION",
        default_value = defaults::ORGANIZATION
    )]
    pub organization: String,

    /// Branch to push; defaults to `<repo-name>-<version>`.
    #[arg(long, value_name = "BRANCH")]
    pub branch: Option<String>,

    /// Token used to open the pull request.
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API.
    #[arg(
        long,
        value_name = "URL",
        env = "GITHUB_API_URL",
        default_value = defaults::GITHUB_API_BASE,
        hide = true
    )]
    pub github_api: String,
}

/// Execute the `deploy` command.
pub fn execute(args: DeployArgs, out: &OutputConfig) -> Result<()> {
    let runner = SystemRunner;
    GitClient::new(&runner)
        .ensure_available()
        .context("git is required to deploy documentation")?;

    let request = PublishRequest {
        version: args.version,
        repo_name: args.repo_name,
        docs_dir: args.docs_dir,
        api_repo_url: args.api_repo,
        organization: args.organization,
        branch: args.branch,
    };

    let github = args
        .github_token
        .filter(|token| !token.is_empty())
        .map(|token| GitHubClient::new(&args.github_api, token))
        .transpose()
        .with_context(|| format!("Invalid GitHub API URL: {}", args.github_api))?;
    let pull_requests = github.as_ref().map(|client| client as &dyn PullRequestApi);

    println!(
        "{}",
        out.status(
            Marker::Publish,
            format!(
                "Deploying {} {} to {}",
                request.repo_name, request.version, request.api_repo_url
            )
        )
    );

    let report = Publisher::new(&runner, pull_requests)
        .publish(&request)
        .with_context(|| {
            format!(
                "Failed to deploy {} {}",
                request.repo_name, request.version
            )
        })?;

    println!(
        "{}",
        out.status(
            Marker::Ok,
            format!(
                "Pushed branch {} ({} versions listed)",
                report.branch, report.catalog_len
            )
        )
    );
    match report.pull_request {
        Some(pull_request) => println!(
            "{}",
            out.status(
                Marker::Link,
                format!("Pull request #{}: {}", pull_request.number, pull_request.html_url)
            )
        ),
        None => println!(
            "{}",
            out.status(
                Marker::Warn,
                format!(
                    "No GitHub token; open a pull request for {} on {} manually",
                    report.branch, report.repo_slug
                )
            )
        ),
    }
    Ok(())
}
