//! Mod registry and startup reconciliation
//!
//! The registry is the persisted catalog of mod roots, categorized mods and
//! user-defined tags. Every startup it is reconciled against the live
//! filesystem by [`reconcile_all`] before anything else looks at it.
//!
//! # Example
//!
//! ```rust,ignore
//! use x2launch::fs_probe::HostFs;
//! use x2launch::registry::{reconcile_all, Registry};
//!
//! let mut registry = Registry::default();
//! if let Some(message) = reconcile_all(&mut registry, &discovered, &HostFs) {
//!     println!("{}", message);
//! }
//! ```

mod breakage;
mod categories;
mod mod_paths;
mod mod_state;
mod reconcile;
mod tags;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use breakage::report_broken_mods;
pub use categories::assign_category_indices;
pub use mod_paths::{normalize_dir_path, reconcile_mod_paths, ModPathSet};
pub use mod_state::{descriptor_file_path, evaluate_mod_state, is_in_mod_path};
pub use reconcile::reconcile_all;
pub use tags::prune_tags;

/// Extension of the descriptor file every installed mod carries
pub const DESCRIPTOR_EXTENSION: &str = "XComMod";

/// Category that freshly imported mods are placed in
pub const UNSORTED_CATEGORY: &str = "Unsorted";

/// Index of a category that has not been given a position yet
pub const UNASSIGNED_INDEX: i32 = -1;

// ============================================================================
// Mod State
// ============================================================================

bitflags::bitflags! {
    /// Problems detected for a mod. The empty set is the healthy state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ModState: u32 {
        /// The mod's directory is not under any known mod root
        const NOT_LOADED = 1;
        /// The mod's directory or its descriptor file is missing
        const NOT_INSTALLED = 1 << 1;
        const DUPLICATE_ID = 1 << 2;
        const DUPLICATE_PREVIOUS = 1 << 3;
        const DUPLICATE_CONFLICT = 1 << 4;
        const MISSING_DEPENDENCIES = 1 << 5;
    }
}

impl Default for ModState {
    fn default() -> Self {
        Self::empty()
    }
}

// ============================================================================
// Mod Entries
// ============================================================================

/// Where a mod was installed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModSource {
    #[default]
    Unknown,
    Local,
    SteamWorkshop,
}

/// A single known mod
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModEntry {
    /// Mod identifier; also the stem of its descriptor file
    pub id: String,
    pub name: String,
    /// Installation directory
    pub path: String,
    #[serde(default)]
    pub source: ModSource,
    #[serde(default)]
    pub workshop_id: Option<u64>,
    #[serde(default)]
    pub state: ModState,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
}

impl ModEntry {
    pub fn new(id: &str, name: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            source: ModSource::Unknown,
            workshop_id: None,
            state: ModState::empty(),
            is_active: false,
            is_hidden: false,
            tags: Vec::new(),
            date_added: None,
        }
    }
}

// ============================================================================
// Categories and Tags
// ============================================================================

/// A user-defined group of mods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModCategory {
    /// Display position, or [`UNASSIGNED_INDEX`]
    pub index: i32,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub entries: Vec<ModEntry>,
}

impl ModCategory {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            collapsed: false,
            entries: Vec::new(),
        }
    }
}

impl Default for ModCategory {
    fn default() -> Self {
        Self::new(UNASSIGNED_INDEX)
    }
}

/// A user-defined label attachable to mods
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModTag {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
}

/// Valid tags, keyed by identifier
pub type TagSet = BTreeMap<String, ModTag>;

/// All known mods, grouped by category name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModList {
    pub entries: BTreeMap<String, ModCategory>,
}

impl ModList {
    /// Every mod of every category, in category order
    pub fn all(&self) -> impl Iterator<Item = &ModEntry> {
        self.entries.values().flat_map(|c| c.entries.iter())
    }

    pub fn all_mut(&mut self) -> impl Iterator<Item = &mut ModEntry> {
        self.entries.values_mut().flat_map(|c| c.entries.iter_mut())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a mod by its installation directory, ignoring the trailing separator
    pub fn find_by_path(&self, path: &str) -> Option<&ModEntry> {
        let wanted = mod_paths::path_key(path);
        self.all().find(|m| mod_paths::path_key(&m.path) == wanted)
    }

    /// Add a mod to `category`, creating the category after the last one if needed
    pub fn add_mod(&mut self, category: &str, entry: ModEntry) {
        let next_index = self
            .entries
            .values()
            .map(|c| c.index)
            .max()
            .map_or(0, |max| max + 1);

        self.entries
            .entry(category.to_string())
            .or_insert_with(|| ModCategory::new(next_index))
            .entries
            .push(entry);
    }
}

// ============================================================================
// Registry
// ============================================================================

/// The reconciled catalog: mod roots, mods and tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub mod_paths: ModPathSet,
    #[serde(default)]
    pub mods: ModList,
    #[serde(default)]
    pub tags: TagSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_mod_creates_category_after_the_last_one() {
        let mut list = ModList::default();
        list.entries.insert("Gameplay".into(), ModCategory::new(4));

        list.add_mod(UNSORTED_CATEGORY, ModEntry::new("A", "A", "/mods/A/"));
        list.add_mod(UNSORTED_CATEGORY, ModEntry::new("B", "B", "/mods/B/"));

        let unsorted = &list.entries[UNSORTED_CATEGORY];
        assert_eq!(unsorted.index, 5);
        assert_eq!(unsorted.entries.len(), 2);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn find_by_path_ignores_trailing_separator() {
        let mut list = ModList::default();
        list.add_mod("Unsorted", ModEntry::new("A", "A", "/mods/A"));
        assert!(list.find_by_path("/mods/A/").is_some());
        assert!(list.find_by_path("/mods/AB/").is_none());
    }

    #[test]
    fn find_by_path_ignores_separator_style() {
        let mut list = ModList::default();
        list.add_mod("Unsorted", ModEntry::new("A", "A", "/mods/A\\"));
        assert!(list.find_by_path("/mods/A/").is_some());
        assert!(list.find_by_path("/mods/A").is_some());
    }

    #[test]
    fn mod_state_serializes_by_flag_name() {
        let state = ModState::NOT_LOADED | ModState::NOT_INSTALLED;
        let json = serde_json::to_string(&state).unwrap();
        let back: ModState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(json.contains("NOT_LOADED"));
    }

    #[test]
    fn registry_deserializes_with_missing_sections() {
        let registry: Registry = serde_json::from_str("{}").unwrap();
        assert!(registry.mod_paths.is_empty());
        assert!(registry.mods.is_empty());
        assert!(registry.tags.is_empty());
    }
}
