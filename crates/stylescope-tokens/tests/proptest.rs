//! Property-based tests for the theme merge.

use proptest::prelude::*;
use stylescope_tokens::{resolve, ConflictPolicy, Merger, TokenTable, TokenValue};

// ============================================================================
// Strategies
// ============================================================================

fn leaf_strategy() -> impl Strategy<Value = TokenValue> {
    "#[0-9a-f]{3}".prop_map(|s| TokenValue::from(s.as_str()))
}

fn value_strategy() -> impl Strategy<Value = TokenValue> {
    leaf_strategy().prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(("[a-c]", inner), 0..4)
            .prop_map(|entries| TokenValue::Group(entries.into_iter().collect()))
    })
}

/// Tables whose top-level keys are drawn from `keys`.
fn table_strategy(keys: &'static str) -> impl Strategy<Value = TokenTable> {
    prop::collection::vec((keys, value_strategy()), 0..5)
        .prop_map(|entries| entries.into_iter().collect())
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Merging an empty extension is the identity.
    #[test]
    fn empty_extension_is_identity(base in table_strategy("[a-e]{1,2}")) {
        prop_assert_eq!(resolve(&base, &TokenTable::new()), base);
    }

    /// Every base key survives the merge.
    #[test]
    fn base_keys_survive(
        base in table_strategy("[a-e]{1,2}"),
        ext in table_strategy("[a-e]{1,2}"),
    ) {
        let result = resolve(&base, &ext);
        for key in base.keys() {
            prop_assert!(result.contains_key(key));
        }
    }

    /// Base entries the extension does not mention are unchanged.
    #[test]
    fn untouched_base_entries_preserved(
        base in table_strategy("[a-e]{1,2}"),
        ext in table_strategy("[a-e]{1,2}"),
    ) {
        let result = resolve(&base, &ext);
        for (key, value) in &base {
            if !ext.contains_key(key) {
                prop_assert_eq!(result.get(key), Some(value));
            }
        }
    }

    /// Every extension leaf appears in the result with the extension's value.
    #[test]
    fn extension_leaves_win(
        base in table_strategy("[a-e]{1,2}"),
        ext in table_strategy("[a-e]{1,2}"),
    ) {
        let result = resolve(&base, &ext);
        for (path, value) in ext.leaf_paths() {
            let found = result.get_path(&path).and_then(|v| v.as_leaf());
            prop_assert_eq!(found, Some(value));
        }
    }

    /// Sequential application equals merging the overlaid extensions once,
    /// when the extensions touch disjoint categories.
    #[test]
    fn disjoint_extensions_associate(
        base in table_strategy("[a-m]{1,2}"),
        first in table_strategy("[a-f]{1,2}"),
        second in table_strategy("[g-m]{1,2}"),
    ) {
        let sequential = resolve(&resolve(&base, &first), &second);
        let combined = resolve(&base, &resolve(&first, &second));
        prop_assert_eq!(sequential, combined);
    }

    /// The merge is a pure function of its inputs.
    #[test]
    fn merge_is_deterministic(
        base in table_strategy("[a-e]{1,2}"),
        ext in table_strategy("[a-e]{1,2}"),
    ) {
        prop_assert_eq!(resolve(&base, &ext), resolve(&base, &ext));
    }

    /// The default merger agrees with `resolve`.
    #[test]
    fn merger_default_matches_resolve(
        base in table_strategy("[a-e]{1,2}"),
        ext in table_strategy("[a-e]{1,2}"),
    ) {
        let merged = Merger::new(ConflictPolicy::PreferExtension).merge(&base, &ext).unwrap();
        prop_assert_eq!(merged.table, resolve(&base, &ext));
    }

    /// Rejecting merges either fail or produce the same table with no conflicts.
    #[test]
    fn reject_is_all_or_nothing(
        base in table_strategy("[a-e]{1,2}"),
        ext in table_strategy("[a-e]{1,2}"),
    ) {
        let lenient = Merger::default().merge(&base, &ext).unwrap();
        match Merger::new(ConflictPolicy::Reject).merge(&base, &ext) {
            Ok(strict) => {
                prop_assert!(lenient.conflicts.is_empty());
                prop_assert_eq!(strict.table, lenient.table);
            }
            Err(_) => prop_assert!(!lenient.conflicts.is_empty()),
        }
    }
}
