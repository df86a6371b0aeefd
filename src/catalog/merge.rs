//! Incremental catalog updates.
//!
//! Adds one newly published version to an existing manifest. Re-running with
//! a version that is already listed is a no-op, and labels that contain no
//! digit at all (`latest`, `develop`) are not tracked by this manifest.
//!
//! The result is ordered with [`SortStrategy::MergeRule`]: `main` first,
//! then plain string order. This differs from the rebuild path in
//! [`super::scan`], which uses semantic-version precedence.

use std::sync::LazyLock;

use log::info;
use regex::Regex;

use super::{Catalog, CatalogEntry, CatalogStore, SortStrategy};
use crate::error::Result;

/// Indentation used when a merged catalog is written.
pub const MERGE_INDENT: usize = 2;

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is valid"));

/// What [`merge`] did with the requested version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The version was appended and the catalog re-sorted.
    Added,
    /// The catalog already listed the version.
    AlreadyPresent,
    /// The label has no digit and is not a versioned release.
    NotVersioned,
}

/// Returns `true` if `label` names a versioned release, i.e. contains at least
/// one decimal digit anywhere.
///
/// This is looser than [`crate::version::classify`]: `v2` and `release-1`
/// count as versioned here while classifying as branches.
pub fn is_versioned_release(label: &str) -> bool {
    DIGIT.is_match(label)
}

/// URL recorded for `version` under `base_url`.
pub fn entry_url(base_url: &str, version: &str) -> String {
    format!("{}/{}/", base_url, version)
}

/// Merge `version` into `existing`.
///
/// Returns the resulting catalog together with what happened. When the
/// outcome is not [`MergeOutcome::Added`] the catalog is returned untouched,
/// regardless of `base_url`.
///
/// # Example
///
/// ```
/// use docpub::catalog::Catalog;
/// use docpub::catalog::merge::{merge, MergeOutcome};
///
/// let (catalog, outcome) = merge(Catalog::new(), "1.0.0", "https://x");
/// assert_eq!(outcome, MergeOutcome::Added);
/// assert_eq!(catalog.entries()[0].url.as_deref(), Some("https://x/1.0.0/"));
/// ```
pub fn merge(existing: Catalog, version: &str, base_url: &str) -> (Catalog, MergeOutcome) {
    if !is_versioned_release(version) {
        return (existing, MergeOutcome::NotVersioned);
    }
    if existing.contains(version) {
        return (existing, MergeOutcome::AlreadyPresent);
    }

    let mut catalog = existing;
    catalog.push(CatalogEntry::named(version, entry_url(base_url, version)));
    catalog.sort(SortStrategy::MergeRule);
    (catalog, MergeOutcome::Added)
}

/// Load the catalog from `store`, merge `version` into it and write it back.
///
/// The store is only written when the version was actually added.
pub fn add_version<S>(store: &mut S, version: &str, base_url: &str) -> Result<MergeOutcome>
where
    S: CatalogStore + ?Sized,
{
    let existing = store.load_catalog()?;
    let (catalog, outcome) = merge(existing, version, base_url);

    match outcome {
        MergeOutcome::Added => {
            store.save_catalog(&catalog, MERGE_INDENT)?;
            info!("Added version {} to {}", version, store.location().display());
        }
        MergeOutcome::AlreadyPresent => {
            info!(
                "Version {} already exists in {}, skipping",
                version,
                store.location().display()
            );
        }
        MergeOutcome::NotVersioned => {
            info!("{} is not a versioned release, skipping catalog update", version);
        }
    }

    Ok(outcome)
}
