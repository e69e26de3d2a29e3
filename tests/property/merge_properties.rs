//! Property-based tests for deep merge

use proptest::prelude::*;
use settings_store::merge::merged;
use settings_store::{merge_nested, SettingValue, SettingsTree};

fn scalar() -> impl Strategy<Value = SettingValue> {
    prop_oneof![
        Just(SettingValue::Null),
        any::<bool>().prop_map(SettingValue::Bool),
        any::<i64>().prop_map(SettingValue::Int),
        (-1.0e6f64..1.0e6).prop_map(SettingValue::Float),
        "[a-z]{0,6}".prop_map(SettingValue::from),
    ]
}

fn value() -> impl Strategy<Value = SettingValue> {
    scalar().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map("[a-c]{1,2}", inner, 0..4).prop_map(SettingValue::Tree)
    })
}

fn tree() -> impl Strategy<Value = SettingsTree> {
    prop::collection::btree_map("[a-c]{1,2}", value(), 0..5)
}

/// Every key of `overlay` is reflected in `result`: trees merged recursively,
/// everything else replaced.
fn check_overlay(base: &SettingsTree, overlay: &SettingsTree, result: &SettingsTree) {
    for (key, incoming) in overlay {
        let got = result.get(key).expect("overlay key missing from result");
        match (incoming, base.get(key)) {
            (SettingValue::Tree(nested), Some(SettingValue::Tree(existing))) => {
                let inner = got.as_tree().expect("merged tree became scalar");
                check_overlay(existing, nested, inner);
            }
            _ => assert_eq!(got, incoming),
        }
    }
}

/// Test that an empty overlay leaves the base unchanged
#[test]
fn test_empty_overlay_is_identity() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree(), |base| {
            assert_eq!(merged(&base, &SettingsTree::new()), base);
            Ok(())
        })
        .unwrap();
}

/// Test that overlay keys win and base-only keys survive
#[test]
fn test_merge_keeps_base_and_applies_overlay() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(tree(), tree()), |(base, overlay)| {
            let result = merged(&base, &overlay);

            for key in base.keys() {
                assert!(result.contains_key(key));
            }
            check_overlay(&base, &overlay, &result);

            let expected_len = base
                .keys()
                .chain(overlay.keys())
                .collect::<std::collections::BTreeSet<_>>()
                .len();
            assert_eq!(result.len(), expected_len);
            Ok(())
        })
        .unwrap();
}

/// Test that applying the same overlay twice changes nothing the second time
#[test]
fn test_merge_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(tree(), tree()), |(base, overlay)| {
            let once = merged(&base, &overlay);
            let mut twice = once.clone();
            merge_nested(&mut twice, overlay);
            assert_eq!(twice, once);
            Ok(())
        })
        .unwrap();
}

/// Test that merging into an empty base reproduces the overlay
#[test]
fn test_merge_into_empty_base() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&tree(), |overlay| {
            assert_eq!(merged(&SettingsTree::new(), &overlay), overlay);
            Ok(())
        })
        .unwrap();
}
