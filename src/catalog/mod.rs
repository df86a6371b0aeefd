//! # Version Catalog
//!
//! A *catalog* is the ordered list of published documentation versions that
//! a version-switcher UI reads from `switcher.json`. This module owns the data
//! model and its JSON rendering; the two producers live in submodules:
//!
//! - [`merge`]: incremental update of a single manifest, one version at a
//!   time. Entries already present (including hand-written ones) are kept.
//! - [`scan`]: full rebuild from the subdirectories of a published docs tree.
//!   The directory listing is the only source of truth.
//!
//! ## Sort Strategies
//!
//! The two producers deliberately order their output differently, see
//! [`SortStrategy`]. Consumers already depend on both behaviours, so they are
//! kept as two named rules rather than unified.
//!
//! ## Persistence
//!
//! Catalogs are read from and written to a [`CatalogStore`]. The merge path
//! writes two-space indented JSON and the scan path four-space indented JSON;
//! both are valid input for the same switcher UI.

pub mod merge;
pub mod scan;
pub mod store;

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

use crate::error::{Error, Result};
use crate::version;

pub use store::{CatalogStore, FileStore, MemoryStore};

/// The label that the merge rule always pins to the top of a catalog.
pub const MAIN_LABEL: &str = "main";

/// One published documentation version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name. Written by the merge path, omitted by the scan path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version label, unique within a catalog.
    pub version: String,
    /// Location of the rendered documentation for this version. Both
    /// producers always set it; hand-written manifests may leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Any other keys found in an existing manifest (e.g. `preferred`).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogEntry {
    /// Create an entry whose display name is its version label.
    pub fn named(version: impl Into<String>, url: impl Into<String>) -> Self {
        let version = version.into();
        Self {
            name: Some(version.clone()),
            version,
            url: Some(url.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Create an entry without a display name.
    pub fn unnamed(version: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: None,
            version: version.into(),
            url: Some(url.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// The two ordering rules used by catalog producers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortStrategy {
    /// `main` first, every other entry by plain string order of its version.
    ///
    /// This is intentionally *not* semantic-version precedence: `1.10.0`
    /// sorts before `1.2.0` under this rule.
    MergeRule,
    /// Branches alphabetically, then semantic versions ascending by
    /// precedence. See [`version::order`].
    ScanRule,
}

impl SortStrategy {
    /// Sort catalog entries in place. Both rules are stable.
    pub fn sort(self, entries: &mut [CatalogEntry]) {
        match self {
            SortStrategy::MergeRule => entries.sort_by(|a, b| merge_rule(&a.version, &b.version)),
            SortStrategy::ScanRule => entries.sort_by(|a, b| scan_rule(&a.version, &b.version)),
        }
    }
}

fn merge_rule(left: &str, right: &str) -> Ordering {
    match (left == MAIN_LABEL, right == MAIN_LABEL) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => left.cmp(right),
    }
}

fn scan_rule(left: &str, right: &str) -> Ordering {
    match (version::is_semver(left), version::is_semver(right)) {
        (false, false) => left.cmp(right),
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (true, true) => version::compare_versions(left, right),
    }
}

/// An ordered sequence of catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON. `origin` is only used in error messages.
    pub fn from_json(contents: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(contents).map_err(|err| Error::CatalogParse {
            path: origin.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Render the catalog as pretty-printed JSON with the given indentation.
    ///
    /// No trailing newline is written.
    pub fn to_json(&self, indent: usize) -> Result<String> {
        let indent = " ".repeat(indent);
        let formatter = PrettyFormatter::with_indent(indent.as_bytes());
        let mut buffer = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)
            .map_err(|err| Error::Serialization {
                message: format!("Failed to serialize catalog: {}", err),
            })?;
        String::from_utf8(buffer).map_err(|err| Error::Serialization {
            message: format!("Serialized catalog is not valid UTF-8: {}", err),
        })
    }

    /// Look up an entry by version label.
    pub fn get(&self, version: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.version == version)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.get(version).is_some()
    }

    /// Append an entry without re-sorting.
    pub fn push(&mut self, entry: CatalogEntry) {
        self.entries.push(entry);
    }

    /// Re-sort the catalog with the given rule.
    pub fn sort(&mut self, strategy: SortStrategy) {
        strategy.sort(&mut self.entries);
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Version labels in catalog order.
    pub fn versions(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.version.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<CatalogEntry> for Catalog {
    fn from_iter<T: IntoIterator<Item = CatalogEntry>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
