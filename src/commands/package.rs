//! # Package Command Implementation
//!
//! Builds conan packages of a library for each build type and, for released
//! versions, uploads them. Remote credentials come from
//! `CONAN_REMOTE_USER` and `CONAN_REMOTE_PASSWORD`; they are only required
//! when uploading.

use anyhow::{Context, Result};
use clap::Args;

use docpub::output::{Marker, OutputConfig};
use docpub::package::{self, PackageRequest, RemoteCredentials, Step, StepKind};
use docpub::runner::SystemRunner;

/// Build conan packages and upload them to a package repository
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Library name, used as the package reference for uploads.
    #[arg(long, value_name = "NAME")]
    pub library: String,

    /// Package version; `latest` is built but never uploaded.
    #[arg(long, value_name = "VERSION", default_value = package::UNRELEASED_VERSION)]
    pub version: String,

    /// Conan host profile.
    #[arg(long, value_name = "PROFILE")]
    pub compiler_profile: String,

    /// Target operating system setting.
    #[arg(long, value_name = "OS")]
    pub os: String,

    /// Target architecture setting.
    #[arg(long, value_name = "ARCH")]
    pub arch: String,

    /// Comma-separated conan remote URLs; the first one receives uploads.
    #[arg(long, value_name = "URLS", default_value = "")]
    pub remote_urls: String,

    /// Comma-separated build types.
    #[arg(long, value_name = "TYPES", default_value = package::DEFAULT_BUILD_TYPES)]
    pub build_types: String,

    /// URL of a conan configuration containing settings_user.yml.
    #[arg(long, value_name = "URL")]
    pub settings_yml_url: Option<String>,

    /// Source folder of settings_user.yml inside that configuration.
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub settings_yml_path: String,

    /// Directory containing the conan recipe.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: String,

    /// User for the package repository.
    #[arg(long, value_name = "USER", env = "CONAN_REMOTE_USER")]
    pub remote_user: Option<String>,

    /// Password for the package repository.
    #[arg(
        long,
        value_name = "PASSWORD",
        env = "CONAN_REMOTE_PASSWORD",
        hide_env_values = true
    )]
    pub remote_password: Option<String>,
}

impl PackageArgs {
    fn credentials(&self) -> Option<RemoteCredentials> {
        match (&self.remote_user, &self.remote_password) {
            (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
                Some(RemoteCredentials {
                    user: user.clone(),
                    password: password.clone(),
                })
            }
            _ => None,
        }
    }
}

fn marker_for(step: &Step) -> Marker {
    match step.kind {
        StepKind::Remote | StepKind::Settings | StepKind::Login => Marker::Info,
        StepKind::Create => Marker::Build,
        StepKind::Upload => Marker::Upload,
    }
}

/// Execute the `package` command.
pub fn execute(args: PackageArgs, out: &OutputConfig) -> Result<()> {
    let credentials = args.credentials();
    let request = PackageRequest {
        library: args.library,
        version: args.version,
        compiler_profile: args.compiler_profile,
        os: args.os,
        arch: args.arch,
        remote_urls: package::split_list(&args.remote_urls),
        build_types: package::split_list(&args.build_types),
        settings_yml_url: args.settings_yml_url,
        settings_yml_path: args.settings_yml_path,
        dir: args.dir,
        credentials,
    };

    let steps = package::plan(&request)?;
    package::execute(&SystemRunner, &steps, |step| {
        println!("{}", out.status(marker_for(step), &step.description));
    })
    .with_context(|| format!("Packaging {} {} failed", request.library, request.version))?;

    println!(
        "{}",
        out.status(
            Marker::Ok,
            format!("Packaged {} {}", request.library, request.version)
        )
    );
    Ok(())
}
