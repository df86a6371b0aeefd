//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_version_dirs("docs", &["main", "1.0.0"]);
//!     fixture.command().arg("regenerate").arg("docs").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::manifests;
    pub use super::TestFixture;
}

/// Version-switcher manifests used across tests.
#[allow(dead_code)]
pub mod manifests {
    /// A manifest listing only the main branch.
    pub const MAIN_ONLY: &str = r#"[
  {
    "name": "main",
    "version": "main",
    "url": "https://libhal.github.io/libhal/main/"
  }
]"#;

    /// A manifest with a released version and an extra theme key.
    pub const WITH_RELEASE: &str = r#"[
  {
    "name": "2.0.0",
    "version": "2.0.0",
    "url": "https://libhal.github.io/libhal/2.0.0/",
    "preferred": true
  },
  {
    "name": "main",
    "version": "main",
    "url": "https://libhal.github.io/libhal/main/"
  }
]"#;

    /// Not a manifest at all.
    pub const MALFORMED: &str = "{ this is not json";
}

/// A temporary directory populated with manifests and version directories.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Create `root/<version>/index.html` for each version.
    #[allow(dead_code)]
    pub fn with_version_dirs(self, root: &str, versions: &[&str]) -> Self {
        for version in versions {
            self.temp_dir
                .child(root)
                .child(version)
                .child("index.html")
                .write_str(version)
                .expect("Failed to create version directory");
        }
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `docpub` command running inside the fixture with plain output.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("docpub");
        cmd.current_dir(self.path())
            .env_remove("RUST_LOG")
            .arg("--color")
            .arg("never");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
