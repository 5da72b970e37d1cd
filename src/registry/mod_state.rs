use super::mod_paths::{is_separator, path_key};
use super::{normalize_dir_path, ModEntry, ModPathSet, ModState, DESCRIPTOR_EXTENSION};
use crate::fs_probe::FileSystem;

/// Path of the `<id>.XComMod` file inside the mod's directory
pub fn descriptor_file_path(entry: &ModEntry) -> String {
    format!(
        "{}{}.{}",
        normalize_dir_path(&entry.path),
        entry.id,
        DESCRIPTOR_EXTENSION
    )
}

/// Whether the mod's directory lies under the root `mod_path`.
///
/// The root must be followed by a separator in the mod's path, so `/mods2/`
/// is not under `/mods/`.
pub fn is_in_mod_path(entry: &ModEntry, mod_path: &str) -> bool {
    let path = normalize_dir_path(&entry.path);
    path.strip_prefix(path_key(mod_path))
        .is_some_and(|rest| rest.starts_with(is_separator))
}

/// Recompute the `NOT_LOADED` and `NOT_INSTALLED` bits of `entry`.
///
/// Both bits are overwritten on every call; all other bits are left alone.
pub fn evaluate_mod_state<F: FileSystem + ?Sized>(
    entry: &mut ModEntry,
    mod_paths: &ModPathSet,
    fs: &F,
) {
    let loaded = mod_paths.iter().any(|root| is_in_mod_path(entry, root));
    let installed =
        fs.dir_exists(&entry.path) && fs.file_exists(&descriptor_file_path(entry));

    entry.state.set(ModState::NOT_LOADED, !loaded);
    entry.state.set(ModState::NOT_INSTALLED, !installed);
}
