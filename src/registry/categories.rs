use std::collections::BTreeMap;

use super::{ModCategory, UNASSIGNED_INDEX};
use crate::logging::log_reconcile;

/// Give every unassigned category a position after the current maximum.
///
/// Categories are visited in name order, so the first unassigned one gets
/// `max + 1`, the next `max + 2`, and so on.
pub fn assign_category_indices(categories: &mut BTreeMap<String, ModCategory>) {
    let Some(mut index) = categories.values().map(|c| c.index).max() else {
        return;
    };

    for (name, category) in categories.iter_mut() {
        if category.index == UNASSIGNED_INDEX {
            index += 1;
            category.index = index;
            log_reconcile(&format!("Category '{}' assigned index {}", name, index));
        }
    }
}
