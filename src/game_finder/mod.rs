//! Game detection module
//!
//! Finds where the game is installed and where its mods conventionally live.
//! Detection goes through Steam (native, Flatpak, Snap) by parsing
//! `libraryfolders.vdf` and `appmanifest_*.acf`.
//!
//! # Example
//!
//! ```rust,ignore
//! use x2launch::game_finder::{GameLocator, SteamLocator};
//!
//! let locator = SteamLocator::new();
//! for dir in locator.detect_mod_dirs() {
//!     println!("Mod directory: {}", dir);
//! }
//! ```

pub mod known_games;
mod steam;
mod vdf;

use std::fs;
use std::path::{Path, PathBuf};

pub use known_games::{KnownGame, XCOM2};
pub use steam::{find_game, find_steam_installations, get_library_folders, SteamGameLocation};
pub use vdf::{parse_library_folders, parse_vdf, AppManifest, LibraryFolder, VdfValue};

use crate::logging::{log_info, log_warning};

// ============================================================================
// Locator Interface
// ============================================================================

/// Environment-specific discovery of the game and its mod directories.
///
/// Implementations never fail: anything that cannot be found is reported as
/// `None` or an empty list.
pub trait GameLocator {
    /// Game installation directory
    fn detect_game_dir(&self) -> Option<String>;
    /// Directories under which mods are installed
    fn detect_mod_dirs(&self) -> Vec<String>;
    /// The game's user config directory (holding `DefaultModOptions.ini`)
    fn detect_config_dir(&self) -> Option<PathBuf>;
}

// ============================================================================
// Steam Locator
// ============================================================================

/// Locates XCOM 2 through the user's Steam libraries
#[derive(Debug, Clone)]
pub struct SteamLocator {
    home: PathBuf,
    game: &'static KnownGame,
}

impl Default for SteamLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl SteamLocator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_home(dirs::home_dir().unwrap_or_default())
    }

    /// Search Steam installations under `home` instead of the user's home directory
    #[must_use]
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            game: &XCOM2,
        }
    }

    fn locate(&self) -> Option<SteamGameLocation> {
        let location = find_game(&self.home, self.game.steam_app_id);
        if location.is_none() {
            log_warning(&format!("{} not found in any Steam library", self.game.name));
        }
        location
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// The Windows user directory inside a Proton prefix
fn prefix_user_path(prefix: &Path) -> PathBuf {
    let users_dir = prefix.join("drive_c/users");

    if let Ok(entries) = fs::read_dir(&users_dir) {
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name != "Public" && name != "root" {
                return users_dir.join(name);
            }
        }
    }

    // Fallback to steamuser
    users_dir.join("steamuser")
}

impl GameLocator for SteamLocator {
    fn detect_game_dir(&self) -> Option<String> {
        self.locate().map(|l| path_string(&l.install_path))
    }

    fn detect_mod_dirs(&self) -> Vec<String> {
        let Some(location) = self.locate() else {
            return Vec::new();
        };

        let mut candidates: Vec<PathBuf> = self
            .game
            .mod_dirs
            .iter()
            .map(|relative| location.install_path.join(relative))
            .collect();
        candidates.push(location.workshop_dir(self.game.steam_app_id));

        let found: Vec<String> = candidates
            .into_iter()
            .filter(|d| d.is_dir())
            .map(|d| path_string(&d))
            .collect();

        log_info(&format!("Detected {} mod directories", found.len()));
        found
    }

    fn detect_config_dir(&self) -> Option<PathBuf> {
        let location = self.locate()?;
        let prefix = location.prefix_path(self.game.steam_app_id);
        if !prefix.is_dir() {
            return None;
        }

        let config_dir = prefix_user_path(&prefix)
            .join("Documents/My Games")
            .join(self.game.my_games_folder)
            .join(self.game.config_subdir);
        config_dir.is_dir().then_some(config_dir)
    }
}
