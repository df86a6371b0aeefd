//! Persistence handles for catalogs.
//!
//! A [`CatalogStore`] is the read-modify-write resource a catalog operation
//! works against. Stores only move text around; parsing and rendering happen
//! in [`Catalog`]. Writes replace the whole document and there is no locking,
//! so callers must serialise access to any one store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use tempfile::NamedTempFile;

use super::Catalog;
use crate::error::Result;

/// Trait for catalog persistence - allows substituting an in-memory store in tests
pub trait CatalogStore {
    /// Where the catalog lives, used in diagnostics.
    fn location(&self) -> &Path;

    /// Read the stored document, or `None` if nothing has been stored yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored document.
    fn save(&mut self, contents: &str) -> Result<()>;

    /// Load and parse the catalog, treating an absent document as empty.
    fn load_catalog(&self) -> Result<Catalog> {
        match self.load()? {
            Some(contents) => Catalog::from_json(&contents, self.location()),
            None => Ok(Catalog::new()),
        }
    }

    /// Render the catalog with `indent` spaces and store it.
    fn save_catalog(&mut self, catalog: &Catalog, indent: usize) -> Result<()> {
        let contents = catalog.to_json(indent)?;
        self.save(&contents)
    }
}

/// A catalog stored in a file on disk.
///
/// Saving writes to a temporary file next to the target and renames it into
/// place, so readers never observe a half-written catalog.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for FileStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn save(&mut self, contents: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(contents.as_bytes())?;
        staged.persist(&self.path).map_err(|err| err.error)?;

        debug!("Wrote catalog to {}", self.path.display());
        Ok(())
    }
}

/// A catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    location: PathBuf,
    contents: Option<String>,
    writes: usize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            location: PathBuf::from("<memory>"),
            ..Self::default()
        }
    }

    /// Create a store that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::new()
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of times [`CatalogStore::save`] has been called.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CatalogStore for MemoryStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, contents: &str) -> Result<()> {
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogEntry;
    use crate::error::Error;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_file_loads_empty_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("docs/switcher.json"));

        assert!(store.load().unwrap().is_none());
        assert!(store.load_catalog().unwrap().is_empty());
    }

    #[test]
    fn test_file_store_save_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("deep/nested/switcher.json");
        let mut store = FileStore::new(&path);

        store.save("[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_file_store_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("switcher.json");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        let mut store = FileStore::new(&path);
        store.save("[]").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
        // Only the target file remains; the staging file was renamed away
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_file_store_round_trip_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("switcher.json"));
        let catalog: Catalog = vec![CatalogEntry::named("1.0.0", "https://x/1.0.0/")]
            .into_iter()
            .collect();

        store.save_catalog(&catalog, 2).unwrap();

        assert_eq!(store.load_catalog().unwrap(), catalog);
    }

    #[test]
    fn test_file_store_malformed_catalog_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("switcher.json");
        fs::write(&path, "[{").unwrap();

        let store = FileStore::new(&path);
        match store.load_catalog() {
            Err(Error::CatalogParse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected CatalogParse, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());

        store.save("[]").unwrap();
        store.save("[ ]").unwrap();

        assert_eq!(store.writes(), 2);
        assert_eq!(store.contents(), Some("[ ]"));
    }

    #[test]
    fn test_memory_store_with_contents() {
        let store = MemoryStore::with_contents(r#"[{"version": "main", "url": "u"}]"#);
        let catalog = store.load_catalog().unwrap();
        assert_eq!(catalog.versions(), vec!["main"]);
        assert_eq!(store.writes(), 0);
    }
}
