//! Full catalog rebuilds from a published documentation tree.
//!
//! In the shared documentation repository every library has a directory
//! whose immediate subdirectories are the published versions:
//!
//! ```text
//! libhal-arm-mcu/
//! ├── main/
//! ├── 1.2.0/
//! ├── 1.10.0/
//! └── switcher.json
//! ```
//!
//! [`regenerate`] lists those subdirectories, orders them with
//! [`SortStrategy::ScanRule`] and overwrites `switcher.json`. Nothing from the
//! previous manifest survives; running it twice over the same tree produces
//! byte-identical output.

use std::path::Path;

use log::info;
use walkdir::WalkDir;

use super::{Catalog, CatalogEntry, CatalogStore, FileStore, SortStrategy};
use crate::error::{Error, Result};

/// File name of the manifest written into the scanned directory.
pub const SWITCHER_FILE: &str = "switcher.json";

/// Indentation used when a scanned catalog is written.
pub const SCAN_INDENT: usize = 4;

/// Version-control metadata directories that are never version labels.
const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// Public URL of one version of a library's documentation.
pub fn version_url(organization: &str, repo_name: &str, version: &str) -> String {
    format!(
        "https://{}.github.io/api/{}/{}",
        organization, repo_name, version
    )
}

/// List the version labels found directly under `root`, in name order.
pub fn list_versions(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(Error::NotFound {
            what: "Documentation directory".to_string(),
            path: root.to_path_buf(),
        });
    }

    let mut versions = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        // Follows symlinks; a dangling link is not a directory and is skipped
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry
            .file_name()
            .to_str()
            .ok_or_else(|| Error::InvalidLabel {
                path: entry.path().to_path_buf(),
            })?;
        if VCS_DIRS.contains(&name) {
            continue;
        }
        versions.push(name.to_string());
    }

    Ok(versions)
}

/// Build a catalog from the subdirectories of `root`.
pub fn scan(root: &Path, organization: &str, repo_name: &str) -> Result<Catalog> {
    let mut catalog: Catalog = list_versions(root)?
        .into_iter()
        .map(|version| {
            let url = version_url(organization, repo_name, &version);
            CatalogEntry::unnamed(version, url)
        })
        .collect();
    catalog.sort(SortStrategy::ScanRule);
    Ok(catalog)
}

/// Rebuild `{root}/switcher.json` from the subdirectories of `root`.
///
/// Any previous manifest is overwritten unconditionally. If `root` cannot be
/// listed nothing is written.
pub fn regenerate(root: &Path, organization: &str, repo_name: &str) -> Result<Catalog> {
    let catalog = scan(root, organization, repo_name)?;

    let mut store = FileStore::new(root.join(SWITCHER_FILE));
    store.save_catalog(&catalog, SCAN_INDENT)?;

    info!(
        "Generated {} for {} with {} versions",
        SWITCHER_FILE,
        repo_name,
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(dirs: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_version_url() {
        assert_eq!(
            version_url("libhal", "libhal-arm-mcu", "1.2.0"),
            "https://libhal.github.io/api/libhal-arm-mcu/1.2.0"
        );
    }

    #[test]
    fn test_scan_orders_by_precedence() {
        let temp_dir = tree(&["1.2.0", "main", "1.10.0"]);

        let catalog = scan(temp_dir.path(), "libhal", "libhal").unwrap();

        assert_eq!(catalog.versions(), vec!["main", "1.2.0", "1.10.0"]);
    }

    #[test]
    fn test_scan_branches_first_alphabetically() {
        let temp_dir = tree(&["v2", "main", "1.0.0", "0.9.0", "develop"]);

        let catalog = scan(temp_dir.path(), "libhal", "libhal").unwrap();

        assert_eq!(
            catalog.versions(),
            vec!["develop", "main", "v2", "0.9.0", "1.0.0"]
        );
    }

    #[test]
    fn test_scan_skips_vcs_dirs_and_files() {
        let temp_dir = tree(&[".git/objects", "1.0.0", "main"]);
        fs::write(temp_dir.path().join("switcher.json"), "[]").unwrap();
        fs::write(temp_dir.path().join("README.md"), "# docs").unwrap();

        let catalog = scan(temp_dir.path(), "libhal", "libhal").unwrap();

        assert_eq!(catalog.versions(), vec!["main", "1.0.0"]);
    }

    #[test]
    fn test_scan_does_not_descend() {
        let temp_dir = tree(&["1.0.0/_static", "1.0.0/html"]);

        let catalog = scan(temp_dir.path(), "libhal", "libhal").unwrap();

        assert_eq!(catalog.versions(), vec!["1.0.0"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinks_and_skips_dangling_ones() {
        let temp_dir = tree(&["1.0.0", "targets/2.0.0"]);
        std::os::unix::fs::symlink(
            temp_dir.path().join("targets/2.0.0"),
            temp_dir.path().join("2.0.0"),
        )
        .unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), temp_dir.path().join("stale"))
            .unwrap();

        let versions = list_versions(temp_dir.path()).unwrap();

        assert_eq!(versions, vec!["1.0.0", "2.0.0", "targets"]);
    }

    #[test]
    fn test_scan_entries_have_urls_and_no_name() {
        let temp_dir = tree(&["main"]);

        let catalog = scan(temp_dir.path(), "my-org", "my-lib").unwrap();

        let entry = catalog.get("main").unwrap();
        assert_eq!(
            entry.url.as_deref(),
            Some("https://my-org.github.io/api/my-lib/main")
        );
        assert!(entry.name.is_none());
    }

    #[test]
    fn test_scan_missing_directory_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = scan(&temp_dir.path().join("missing"), "libhal", "libhal");
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_regenerate_writes_four_space_json() {
        let temp_dir = tree(&["1.0.0", "main"]);

        regenerate(temp_dir.path(), "libhal", "libhal").unwrap();

        let written = fs::read_to_string(temp_dir.path().join(SWITCHER_FILE)).unwrap();
        assert_eq!(
            written,
            "[\n    {\n        \"version\": \"main\",\n        \"url\": \"https://libhal.github.io/api/libhal/main\"\n    },\n    {\n        \"version\": \"1.0.0\",\n        \"url\": \"https://libhal.github.io/api/libhal/1.0.0\"\n    }\n]"
        );
    }

    #[test]
    fn test_regenerate_overwrites_manual_entries() {
        let temp_dir = tree(&["1.0.0"]);
        let switcher = temp_dir.path().join(SWITCHER_FILE);
        fs::write(
            &switcher,
            r#"[{"name": "old", "version": "0.1.0", "url": "https://manual/"}]"#,
        )
        .unwrap();

        let catalog = regenerate(temp_dir.path(), "libhal", "libhal").unwrap();

        assert_eq!(catalog.versions(), vec!["1.0.0"]);
        let written = fs::read_to_string(&switcher).unwrap();
        assert!(!written.contains("0.1.0"));
    }

    #[test]
    fn test_regenerate_is_byte_identical_on_rerun() {
        let temp_dir = tree(&["2.0.0", "1.2.0", "main", "1.10.0", "1.2.0-rc1", "develop"]);
        let switcher = temp_dir.path().join(SWITCHER_FILE);

        regenerate(temp_dir.path(), "libhal", "libhal").unwrap();
        let first = fs::read(&switcher).unwrap();
        regenerate(temp_dir.path(), "libhal", "libhal").unwrap();
        let second = fs::read(&switcher).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_regenerate_missing_directory_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("missing");

        assert!(regenerate(&root, "libhal", "libhal").is_err());
        assert!(!root.exists());
    }

    #[test]
    fn test_regenerate_empty_directory() {
        let temp_dir = TempDir::new().unwrap();

        let catalog = regenerate(temp_dir.path(), "libhal", "libhal").unwrap();

        assert!(catalog.is_empty());
        let written = fs::read_to_string(temp_dir.path().join(SWITCHER_FILE)).unwrap();
        assert_eq!(written, "[]");
    }
}
