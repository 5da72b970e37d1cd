//! Mod root directories
//!
//! Roots are compared without their trailing separators, so `C:\Mods`,
//! `C:\Mods\` and `C:\Mods/` are the same root while `C:\Mods` and `C:\Mods2` stay distinct.

use serde::{Deserialize, Serialize};
use std::path::MAIN_SEPARATOR;

use crate::fs_probe::FileSystem;
use crate::logging::log_reconcile;

pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// `path` without any trailing separators.
///
/// Two directory paths name the same directory when their keys are equal,
/// whichever separator style they end with.
pub(crate) fn path_key(path: &str) -> &str {
    path.trim_end_matches(is_separator)
}

/// Return `path` ending in exactly one trailing separator.
///
/// Both `/` and `\` count as separators. A run of trailing separators collapses
/// to its last character; a path without one gets [`MAIN_SEPARATOR`].
pub fn normalize_dir_path(path: &str) -> String {
    let trimmed = path_key(path);
    let separator = path[trimmed.len()..]
        .chars()
        .next_back()
        .unwrap_or(MAIN_SEPARATOR);

    let mut normalized = String::with_capacity(trimmed.len() + 1);
    normalized.push_str(trimmed);
    normalized.push(separator);
    normalized
}

/// Ordered set of mod root directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModPathSet {
    paths: Vec<String>,
}

impl ModPathSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Membership with or without a trailing separator
    pub fn contains(&self, path: &str) -> bool {
        let wanted = path_key(path);
        self.paths.iter().any(|p| path_key(p) == wanted)
    }

    /// Append `path` as given unless an equivalent root is already present
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Remove exactly `path`
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p != path);
        self.paths.len() != before
    }

    /// Rewrite every member into its normalized form.
    ///
    /// Members that are already normalized keep their position; rewritten
    /// members move to the end. Equivalent duplicates are dropped.
    fn migrate_to_normalized(&mut self) {
        let (kept, stale): (Vec<String>, Vec<String>) = std::mem::take(&mut self.paths)
            .into_iter()
            .partition(|p| normalize_dir_path(p) == *p);

        for path in kept {
            self.insert(path);
        }
        for path in stale {
            let normalized = normalize_dir_path(&path);
            log_reconcile(&format!("Mod path '{}' rewritten as '{}'", path, normalized));
            self.insert(normalized);
        }
    }
}

impl<S: Into<String>> FromIterator<S> for ModPathSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.insert(path);
        }
        set
    }
}

/// Bring the persisted root set up to date with the filesystem.
///
/// 1. stale spellings are normalized,
/// 2. roots that no longer exist are dropped,
/// 3. newly `discovered` roots are added in normalized form.
pub fn reconcile_mod_paths<F: FileSystem + ?Sized>(
    mod_paths: &mut ModPathSet,
    discovered: &[String],
    fs: &F,
) {
    mod_paths.migrate_to_normalized();

    mod_paths.paths.retain(|path| {
        let exists = fs.dir_exists(path);
        if !exists {
            log_reconcile(&format!("Mod path '{}' no longer exists, removing", path));
        }
        exists
    });

    for path in discovered {
        if !mod_paths.contains(path) {
            log_reconcile(&format!("Detected new mod path '{}'", path));
            mod_paths.insert(normalize_dir_path(path));
        }
    }
}
