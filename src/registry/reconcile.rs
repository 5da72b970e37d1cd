use super::{
    assign_category_indices, evaluate_mod_state, prune_tags, reconcile_mod_paths,
    report_broken_mods, Registry,
};
use crate::fs_probe::FileSystem;
use crate::logging::log_info;

/// Reconcile the whole registry against the filesystem.
///
/// Runs, in order: mod root reconciliation, category indexing, per-mod state
/// evaluation and tag pruning, and breakage reporting. Returns the message to
/// show the user if any mod was hidden by this pass.
pub fn reconcile_all<F: FileSystem + ?Sized>(
    registry: &mut Registry,
    discovered: &[String],
    fs: &F,
) -> Option<String> {
    reconcile_mod_paths(&mut registry.mod_paths, discovered, fs);

    if registry.mods.entries.is_empty() {
        return None;
    }

    assign_category_indices(&mut registry.mods.entries);

    let Registry {
        mod_paths,
        mods,
        tags,
    } = registry;

    for entry in mods.all_mut() {
        evaluate_mod_state(entry, mod_paths, fs);
        prune_tags(entry, tags);
    }

    let notification = report_broken_mods(mods.all_mut());

    log_info(&format!(
        "Registry reconciled: {} mod paths, {} categories, {} mods",
        mod_paths.len(),
        mods.entries.len(),
        mods.len()
    ));

    notification
}
