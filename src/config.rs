use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LauncherError, Result};
use crate::registry::Registry;

// ============================================================================
// Launcher Settings
// ============================================================================

/// Everything the launcher persists between runs
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Game installation directory, empty if unknown
    pub game_path: String,
    pub check_for_updates: bool,
    pub show_upgrade_warning: bool,
    pub close_after_launch: bool,
    /// Extra command line passed to the game
    pub arguments: String,
    #[serde(flatten)]
    pub registry: Registry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_path: String::new(),
            check_for_updates: true,
            show_upgrade_warning: true,
            close_after_launch: false,
            arguments: "-review -noRedScreens".to_string(),
            registry: Registry::default(),
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn default_path() -> PathBuf {
        crate::launcher_path!("settings.json")
    }

    /// `true` if no settings have been saved at `path` yet
    pub fn is_first_run(path: &Path) -> bool {
        !path.exists()
    }

    /// Load settings from `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if Self::is_first_run(path) {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| LauncherError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| LauncherError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings to `path` as pretty JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| LauncherError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(LauncherError::Serialize)?;
        fs::write(path, json).map_err(|e| LauncherError::io(path, e))
    }
}
