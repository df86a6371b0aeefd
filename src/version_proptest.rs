//! Property-based tests for version classification and ordering.
//!
//! These tests use proptest to generate random labels and verify that the
//! ordering invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::version::{classify, compare_versions, order, LabelKind};
    use proptest::prelude::*;
    use std::cmp::Ordering;

    /// Labels drawn from a mix of branch-like names and version-like strings.
    fn any_label() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z][a-z0-9_-]{0,8}",
            "[0-9]{1,3}(\\.[0-9]{1,3}){0,3}",
            "[0-9]{1,2}(\\.[0-9]{1,2}){0,2}-[a-z0-9.]{0,5}",
            ".{0,6}",
        ]
    }

    // ============================================================================
    // classify property tests
    // ============================================================================

    proptest! {
        /// Property: strings without any digit are always branches
        #[test]
        fn classify_digit_free_is_branch(input in "[^0-9]*") {
            prop_assert_eq!(classify(&input), LabelKind::Branch);
        }

        /// Property: the semantic version shape is always recognised
        #[test]
        fn classify_semver_shape(input in "[0-9]+(\\.[0-9]+)*(-[^\n]*)?") {
            prop_assert_eq!(classify(&input), LabelKind::SemVer);
        }
    }

    // ============================================================================
    // order property tests
    // ============================================================================

    proptest! {
        /// Property: ordering an ordered sequence reproduces it
        #[test]
        fn order_is_idempotent(input in prop::collection::vec(any_label(), 0..12)) {
            let once = order(input);
            let twice = order(once.clone());
            prop_assert_eq!(once, twice);
        }

        /// Property: ordering is a permutation (nothing dropped or invented)
        #[test]
        fn order_is_permutation(input in prop::collection::vec(any_label(), 0..12)) {
            let mut expected = input.clone();
            let mut actual = order(input);
            expected.sort();
            actual.sort();
            prop_assert_eq!(expected, actual);
        }

        /// Property: every branch precedes every semantic version
        #[test]
        fn order_puts_branches_first(input in prop::collection::vec(any_label(), 0..12)) {
            let ordered = order(input);
            let first_version = ordered
                .iter()
                .position(|label| classify(label) == LabelKind::SemVer)
                .unwrap_or(ordered.len());
            for label in &ordered[first_version..] {
                prop_assert_eq!(classify(label), LabelKind::SemVer);
            }
        }

        /// Property: adjacent versions are never in descending precedence
        #[test]
        fn order_versions_ascend(input in prop::collection::vec(any_label(), 0..12)) {
            let ordered = order(input);
            let versions: Vec<&String> = ordered
                .iter()
                .filter(|label| classify(label) == LabelKind::SemVer)
                .collect();
            for pair in versions.windows(2) {
                prop_assert_ne!(compare_versions(pair[0], pair[1]), Ordering::Greater);
            }
        }
    }
}
