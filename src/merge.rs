//! Merge rules for settings trees.
//!
//! Deep merge recurses wherever both sides hold a tree at the same key and lets
//! the incoming value win everywhere else. Keys present only in the base are
//! never removed.

use crate::value::{SettingValue, SettingsTree};
use tracing::trace;

/// How an incoming tree is applied to an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Recurse into trees present on both sides.
    #[default]
    Deep,
    /// Replace each top-level key wholesale.
    Shallow,
}

impl MergePolicy {
    pub fn apply<'a>(self, base: &'a mut SettingsTree, overlay: SettingsTree) -> &'a mut SettingsTree {
        match self {
            MergePolicy::Deep => merge_nested(base, overlay),
            MergePolicy::Shallow => {
                base.extend(overlay);
                base
            }
        }
    }
}

/// Recursively merge `overlay` into `base`, mutating `base` in place.
///
/// Returns `base` for chaining. Recursion depth equals the nesting depth of
/// `overlay`.
pub fn merge_nested<'a>(base: &'a mut SettingsTree, overlay: SettingsTree) -> &'a mut SettingsTree {
    for (key, incoming) in overlay {
        match incoming {
            SettingValue::Tree(nested) => match base.get_mut(&key) {
                Some(SettingValue::Tree(existing)) => {
                    trace!(key = %key, "Merging nested settings");
                    merge_nested(existing, nested);
                }
                _ => {
                    base.insert(key, SettingValue::Tree(nested));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
    base
}

/// Non-mutating form of [`merge_nested`]: returns a merged copy of `base`.
pub fn merged(base: &SettingsTree, overlay: &SettingsTree) -> SettingsTree {
    let mut result = base.clone();
    merge_nested(&mut result, overlay.clone());
    result
}
