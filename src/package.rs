//! # Package Build and Upload
//!
//! Builds conan packages of a library for every requested build type and
//! uploads them to a package repository.
//!
//! The pipeline is split in two:
//!
//! - [`plan`] turns a [`PackageRequest`] into an ordered list of [`Step`]s.
//!   It is pure, so the exact command lines can be checked without conan.
//! - [`execute`] runs the steps one after another through a
//!   [`CommandRunner`] and stops at the first failure.
//!
//! Uploads are skipped for the `latest` version, which is only ever built
//! locally. Credentials for the remote are taken from the request, which the
//! CLI fills from `CONAN_REMOTE_USER` and `CONAN_REMOTE_PASSWORD`.

use log::info;

use crate::error::{Error, Result};
use crate::runner::{run_checked, CommandRunner, Invocation};

/// Name of the first (upload) remote.
pub const PRIMARY_REMOTE: &str = "remote-package-repo";

/// Version label that is built but never uploaded.
pub const UNRELEASED_VERSION: &str = "latest";

/// Build types used when none are given.
pub const DEFAULT_BUILD_TYPES: &str = "Debug,MinSizeRel,Release";

/// Login for the package repository.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for RemoteCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteCredentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Everything needed to build and upload one library version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    pub library: String,
    pub version: String,
    pub compiler_profile: String,
    pub os: String,
    pub arch: String,
    pub remote_urls: Vec<String>,
    pub build_types: Vec<String>,
    pub settings_yml_url: Option<String>,
    pub settings_yml_path: String,
    /// Directory containing the conan recipe.
    pub dir: String,
    pub credentials: Option<RemoteCredentials>,
}

/// Which part of the pipeline a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Remote,
    Settings,
    Create,
    Login,
    Upload,
}

/// One command of the pipeline with a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub kind: StepKind,
    pub description: String,
    pub invocation: Invocation,
}

/// Split a comma-separated list, trimming items and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn remote_name(index: usize) -> String {
    if index == 0 {
        PRIMARY_REMOTE.to_string()
    } else {
        format!("remote-{}", index)
    }
}

/// Compute the steps for `request`.
///
/// Fails when the version would be uploaded but no credentials were given,
/// before anything has run.
pub fn plan(request: &PackageRequest) -> Result<Vec<Step>> {
    let mut steps = Vec::new();

    for (index, url) in request.remote_urls.iter().enumerate() {
        let name = remote_name(index);
        steps.push(Step {
            kind: StepKind::Remote,
            description: format!("Add conan remote '{}': {}", name, url),
            invocation: Invocation::new("conan").args([
                "remote",
                "add",
                name.as_str(),
                url.as_str(),
            ]),
        });
    }

    if let Some(settings_url) = &request.settings_yml_url {
        steps.push(Step {
            kind: StepKind::Settings,
            description: "Install settings_user.yml".to_string(),
            invocation: Invocation::new("conan").args([
                "config",
                "install",
                "-sf",
                request.settings_yml_path.as_str(),
                settings_url.as_str(),
            ]),
        });
    }

    for build_type in &request.build_types {
        steps.push(Step {
            kind: StepKind::Create,
            description: format!("Create '{}' package", build_type),
            invocation: Invocation::new("conan").args([
                "create".to_string(),
                request.dir.clone(),
                "-s:h".to_string(),
                format!("build_type={}", build_type),
                "-pr:h".to_string(),
                request.compiler_profile.clone(),
                "-s:h".to_string(),
                format!("os={}", request.os),
                "-s:h".to_string(),
                format!("arch={}", request.arch),
                "--version".to_string(),
                request.version.clone(),
            ]),
        });
    }

    if request.version == UNRELEASED_VERSION {
        info!("Skipping upload for version '{}'", UNRELEASED_VERSION);
        return Ok(steps);
    }

    let credentials = request.credentials.as_ref().ok_or_else(|| Error::Credentials {
        message: "CONAN_REMOTE_USER and CONAN_REMOTE_PASSWORD must be set to upload packages"
            .to_string(),
    })?;

    // Password goes through stdin to keep it out of process listings
    steps.push(Step {
        kind: StepKind::Login,
        description: "Sign into Conan Package Repository".to_string(),
        invocation: Invocation::new("conan")
            .args(["remote", "login", PRIMARY_REMOTE, credentials.user.as_str()])
            .stdin(credentials.password.as_str()),
    });
    steps.push(Step {
        kind: StepKind::Upload,
        description: format!("Upload package version '{}' to conan repo", request.version),
        invocation: Invocation::new("conan").args([
            "upload".to_string(),
            format!("{}/{}", request.library, request.version),
            "--confirm".to_string(),
            format!("-r={}", PRIMARY_REMOTE),
        ]),
    });

    Ok(steps)
}

/// Run `steps` in order, calling `on_step` before each one.
///
/// Stops at the first step that fails and returns its error.
pub fn execute<F>(runner: &dyn CommandRunner, steps: &[Step], mut on_step: F) -> Result<()>
where
    F: FnMut(&Step),
{
    for step in steps {
        on_step(step);
        run_checked(runner, &step.invocation)?;
    }
    Ok(())
}
