//! Known games configuration
//!
//! Contains the metadata the launcher needs to find a game and its mods:
//! - Steam App ID
//! - Mod directories relative to the install directory
//! - My Games folder name (Documents/My Games/*)

/// Configuration for a known game
#[derive(Debug, Clone)]
pub struct KnownGame {
    /// Display name
    pub name: &'static str,
    /// Steam App ID
    pub steam_app_id: &'static str,
    /// Mod directories relative to the install directory
    pub mod_dirs: &'static [&'static str],
    /// Folder name in Documents/My Games
    pub my_games_folder: &'static str,
    /// Config directory relative to the My Games folder
    pub config_subdir: &'static str,
}

/// XCOM 2, including the War of the Chosen expansion that shares its install
pub const XCOM2: KnownGame = KnownGame {
    name: "XCOM 2",
    steam_app_id: "268500",
    mod_dirs: &["XComGame/Mods", "XCom2-WarOfTheChosen/XComGame/Mods"],
    my_games_folder: "XCOM2",
    config_subdir: "XComGame/Config",
};
