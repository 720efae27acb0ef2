// src/aggregate.rs - Fold rule results into the error tree

use crate::rules::RuleTable;
use crate::tree::{ErrorTree, FieldError};
use tracing::trace;

/// Evaluate every rule and collect the failures.
///
/// Rules run independently and in table order; nothing short-circuits across
/// rules. Several failures at one path share that path's `types` map.
pub fn aggregate(table: &RuleTable<'_>) -> ErrorTree {
    let mut tree = ErrorTree::new();

    for rule in table.iter() {
        for kind in rule.evaluate() {
            trace!("{} ({}): {}", rule.path, rule.label, kind);
            tree.insert(FieldError {
                kind,
                label: rule.label.clone(),
                path: rule.path.clone(),
            });
        }
    }

    tree
}
