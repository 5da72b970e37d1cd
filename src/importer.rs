//! Import of newly installed mods
//!
//! Scans every mod root for sub-directories carrying a `*.XComMod`
//! descriptor and registers the ones the registry does not know yet.

use chrono::Utc;
use std::path::Path;
use walkdir::WalkDir;

use crate::logging::log_info;
use crate::registry::{
    normalize_dir_path, ModEntry, ModSource, Registry, DESCRIPTOR_EXTENSION, UNSORTED_CATEGORY,
};

/// Direct children of `dir` matching `keep`, sorted by file name
fn children<F>(dir: &Path, keep: F) -> impl Iterator<Item = walkdir::DirEntry>
where
    F: Fn(&walkdir::DirEntry) -> bool,
{
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(move |e| keep(e))
}

/// Identifier of the mod in `dir`, taken from its descriptor file name
fn find_descriptor_id(dir: &Path) -> Option<String> {
    children(dir, |e| {
        e.file_type().is_file()
            && e.path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DESCRIPTOR_EXTENSION))
    })
    .find_map(|e| {
        e.path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
    })
}

fn is_workshop_root(root: &str) -> bool {
    root.replace('\\', "/").contains("steamapps/workshop/content/")
}

/// Register mods found under the registry's mod roots.
///
/// New mods go to the `Unsorted` category. Returns how many were added.
pub fn import_mods(registry: &mut Registry) -> usize {
    let roots: Vec<String> = registry.mod_paths.iter().cloned().collect();
    let mut imported = 0;

    for root in roots {
        let workshop = is_workshop_root(&root);

        for dir in children(Path::new(&root), |e| e.file_type().is_dir()) {
            let path = normalize_dir_path(&dir.path().to_string_lossy());
            if registry.mods.find_by_path(&path).is_some() {
                continue;
            }
            let Some(id) = find_descriptor_id(dir.path()) else {
                continue;
            };

            let mut entry = ModEntry::new(&id, &id, &path);
            entry.date_added = Some(Utc::now());
            if workshop {
                entry.source = ModSource::SteamWorkshop;
                entry.workshop_id = dir.file_name().to_string_lossy().parse().ok();
            } else {
                entry.source = ModSource::Local;
            }

            log_info(&format!("Imported new mod '{}' from {}", id, path));
            registry.mods.add_mod(UNSORTED_CATEGORY, entry);
            imported += 1;
        }
    }

    imported
}
