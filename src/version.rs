//! # Version Label Classification and Ordering
//!
//! Every published documentation directory is named after a *version label*.
//! Labels come in two disjoint kinds:
//!
//! - **Semantic versions**: one or more dot-separated groups of ASCII digits,
//!   optionally followed by `-` and free-form suffix text (`1.2.0`, `4.11`,
//!   `1.2.0-rc1`).
//! - **Branches**: anything else (`main`, `develop`, `v2`, the empty string).
//!
//! Classification is purely syntactic and total: it never fails and never looks
//! at tags or directories.
//!
//! ## Ordering
//!
//! [`order`] produces the canonical order used when a catalog is rebuilt from
//! a directory listing: branches first in plain string order, then semantic
//! versions ascending by precedence.
//!
//! Precedence compares numeric components left to right, treating missing
//! trailing components as `0` (so `1.2` and `1.2.0` tie). Components are
//! compared as arbitrarily long decimal numbers. A label with a suffix sorts
//! before the same numeric value without one (`1.2.0-rc1 < 1.2.0`). Among
//! suffixes, an empty one sorts first, then valid semver pre-releases by
//! pre-release precedence, then everything else as plain strings.
//!
//! Sorting is stable: labels with equal keys keep their input order, and
//! duplicate labels are kept. De-duplication belongs to the catalog
//! producers.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use semver::Prerelease;

static SEMVER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+)*(-.*)?$").expect("semantic version label pattern is valid")
});

/// The two kinds of version label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKind {
    /// A development branch or any other opaque name.
    Branch,
    /// A dot-separated numeric version with an optional suffix.
    SemVer,
}

/// Classify a version label.
///
/// # Example
///
/// ```
/// use docpub::version::{classify, LabelKind};
///
/// assert_eq!(classify("1.2.0-rc1"), LabelKind::SemVer);
/// assert_eq!(classify("main"), LabelKind::Branch);
/// assert_eq!(classify("v1.2.0"), LabelKind::Branch);
/// ```
pub fn classify(label: &str) -> LabelKind {
    if SEMVER_LABEL.is_match(label) {
        LabelKind::SemVer
    } else {
        LabelKind::Branch
    }
}

/// Returns `true` if `label` is a semantic version label.
pub fn is_semver(label: &str) -> bool {
    classify(label) == LabelKind::SemVer
}

/// Sort key of a semantic version label, borrowed from the label itself.
#[derive(Debug, Clone, PartialEq, Eq)]
struct VersionKey<'a> {
    components: Vec<&'a str>,
    suffix: Option<&'a str>,
}

impl<'a> VersionKey<'a> {
    /// Split a label that already classified as [`LabelKind::SemVer`].
    fn parse(label: &'a str) -> Self {
        let (numeric, suffix) = match label.split_once('-') {
            Some((numeric, suffix)) => (numeric, Some(suffix)),
            None => (label, None),
        };

        Self {
            components: numeric.split('.').collect(),
            suffix,
        }
    }
}

impl Ord for VersionKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let left = self.components.get(i).copied().unwrap_or("0");
            let right = other.components.get(i).copied().unwrap_or("0");
            match compare_numeric(left, right) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }

        match (self.suffix, other.suffix) {
            (None, None) => Ordering::Equal,
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (Some(left), Some(right)) => compare_suffix(left, right),
        }
    }
}

impl PartialOrd for VersionKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare two runs of ASCII digits by numeric value without parsing them.
fn compare_numeric(left: &str, right: &str) -> Ordering {
    let left = left.trim_start_matches('0');
    let right = right.trim_start_matches('0');
    left.len().cmp(&right.len()).then_with(|| left.cmp(right))
}

/// How a suffix takes part in ordering. Variants are listed in sort order.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SuffixKey<'a> {
    /// `1.2.0-`
    Empty,
    /// A valid semver pre-release, compared by pre-release precedence.
    Prerelease(Prerelease),
    /// Anything else, compared as a plain string.
    Opaque(&'a str),
}

impl<'a> SuffixKey<'a> {
    fn parse(suffix: &'a str) -> Self {
        if suffix.is_empty() {
            return SuffixKey::Empty;
        }
        match Prerelease::new(suffix) {
            Ok(pre) => SuffixKey::Prerelease(pre),
            Err(_) => SuffixKey::Opaque(suffix),
        }
    }
}

fn compare_suffix(left: &str, right: &str) -> Ordering {
    SuffixKey::parse(left).cmp(&SuffixKey::parse(right))
}

/// Compare two semantic version labels by precedence.
///
/// Both labels should classify as [`LabelKind::SemVer`]. Other labels still
/// compare deterministically, but the result carries no meaning.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    VersionKey::parse(left).cmp(&VersionKey::parse(right))
}

/// Produce the canonical order of a set of labels: branches alphabetically,
/// then semantic versions ascending by precedence.
///
/// # Example
///
/// ```
/// use docpub::version::order;
///
/// let ordered = order(["v2", "main", "1.0.0", "0.9.0"].map(String::from));
/// assert_eq!(ordered, ["main", "v2", "0.9.0", "1.0.0"]);
/// ```
pub fn order<I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let (mut versions, mut branches): (Vec<String>, Vec<String>) =
        labels.into_iter().partition(|label| is_semver(label));

    branches.sort();
    versions.sort_by(|a, b| compare_versions(a, b));

    branches.extend(versions);
    branches
}
