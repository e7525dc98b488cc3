//! Property tests: normalization, pruning and edit tracking hold for arbitrary
//! paths and data.
mod common;
use common::*;
use musubi::path::normalize;
use musubi::prelude::*;
use musubi::resolver::{prune_paths, resolve_paths};
use proptest::prelude::*;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// One comma-separated part of a raw data path.
fn arb_part() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}(\\.[a-z]{1,6}){0,2}",
        "%[0-3]%(\\.[a-z]{1,6})?",
        Just("%null%".to_string()),
        Just("%%".to_string()),
        Just(String::new()),
        " [a-z]{1,4} ",
    ]
}

fn arb_raw_path() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_part(), 0..4).prop_map(|parts| parts.join(","))
}

fn arb_parent() -> impl Strategy<Value = Option<String>> {
    prop::option::of("%[0-3]%(\\.[a-z]{1,6})?")
}

fn arb_leaf() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        any::<i32>().prop_map(serde_json::Value::from),
        "[a-z]{0,3}".prop_map(serde_json::Value::from),
        any::<bool>().prop_map(serde_json::Value::from),
        Just(serde_json::Value::Null),
    ]
}

fn arb_object() -> impl Strategy<Value = serde_json::Value> {
    let member = prop_oneof![
        arb_leaf(),
        prop::collection::btree_map("[a-c]", arb_leaf(), 0..3)
            .prop_map(|map| serde_json::to_value(map).unwrap_or_default()),
    ];
    prop::collection::btree_map("[a-c]", member, 0..4).prop_map(|map: BTreeMap<_, _>| {
        serde_json::to_value(map).unwrap_or_default()
    })
}

fn arb_data() -> impl Strategy<Value = Vec<DataSlot>> {
    prop::collection::vec(prop::option::of(arb_object()), 0..4)
        .prop_map(|slots| slots.into_iter().map(|slot| slot.and_then(xo)).collect())
}

fn arb_paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            "%[0-3]%(\\.[a-c](\\.[a-c])?)?",
            Just("%null%".to_string()),
            Just("%%".to_string()),
        ],
        1..4,
    )
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every normalized part is anchored or a literal token.
    #[test]
    fn normalized_parts_are_anchored(raw in arb_raw_path(), parent in arb_parent()) {
        for part in normalize(&raw, parent.as_deref()) {
            prop_assert!(part.starts_with('%'), "'{}' from '{}'", part, raw);
        }
    }

    /// Normalization keeps one part per comma-separated part, in order.
    #[test]
    fn normalization_is_positional(raw in arb_raw_path(), parent in arb_parent()) {
        let normalized = normalize(&raw, parent.as_deref());
        if raw.trim().is_empty() {
            prop_assert!(normalized.is_empty());
        } else {
            prop_assert_eq!(normalized.len(), raw.split(',').count());
            for (part, original) in normalized.iter().zip(raw.split(',')) {
                let original = original.trim();
                if original.starts_with('%') {
                    prop_assert_eq!(part.as_str(), original);
                }
            }
        }
    }

    /// Resolving twice against the same data gives the same result.
    #[test]
    fn resolution_is_idempotent(paths in arb_paths(), data in arb_data()) {
        prop_assert_eq!(
            values(resolve_paths(&paths, &data)),
            values(resolve_paths(&paths, &data))
        );
    }

    /// Pruned data still resolves every path to the same value.
    #[test]
    fn pruning_preserves_resolution(paths in arb_paths(), data in arb_data()) {
        let pruned = prune_paths(&paths, &data);
        prop_assert_eq!(pruned.len(), data.len());
        prop_assert_eq!(
            values(resolve_paths(&paths, &pruned)),
            values(resolve_paths(&paths, &data))
        );
    }

    /// A definition has changes iff something in its subtree was marked since
    /// the last clear.
    #[test]
    fn changes_track_marked_subtrees(
        marked in prop::collection::vec(0usize..10, 0..5),
        cleared in prop::option::of(0usize..10),
    ) {
        let mut tree = customer_form();
        let ids: Vec<DefinitionId> = tree.ids().collect();
        for index in &marked {
            tree.set_data_changed(ids[*index]);
        }
        if let Some(index) = cleared {
            tree.clear_data_change_state(ids[index]);
        }

        let dirty: Vec<DefinitionId> = ids
            .iter()
            .copied()
            .filter(|id| tree[*id].is_dirty())
            .collect();
        for id in &ids {
            let expected = tree.subtree(*id).iter().any(|d| dirty.contains(d));
            prop_assert_eq!(tree.has_data_changes(*id), expected);
        }
        if let Some(index) = cleared {
            prop_assert!(!tree.has_data_changes(ids[index]));
        }
    }
}
