//! Steam game detection
//!
//! Locates a game through Steam's library folders and app manifests.
//! Supports native, Flatpak, and Snap Steam installations.

use std::fs;
use std::path::{Path, PathBuf};

use super::vdf::{parse_library_folders, AppManifest, LibraryFolder};
use crate::logging::log_info;

/// All possible Steam installation paths to check, relative to $HOME
const STEAM_PATHS: &[&str] = &[
    ".local/share/Steam",
    ".steam/debian-installation",
    ".steam/steam",
    ".var/app/com.valvesoftware.Steam/data/Steam",
    ".var/app/com.valvesoftware.Steam/.local/share/Steam",
    "snap/steam/common/.local/share/Steam",
];

/// Where an installed Steam game lives
#[derive(Debug, Clone, PartialEq)]
pub struct SteamGameLocation {
    /// Library root (the directory containing `steamapps/`)
    pub library: PathBuf,
    /// `steamapps/common/<installdir>`
    pub install_path: PathBuf,
}

impl SteamGameLocation {
    /// Workshop download directory for `app_id` in this library
    pub fn workshop_dir(&self, app_id: &str) -> PathBuf {
        self.library
            .join("steamapps/workshop/content")
            .join(app_id)
    }

    /// Proton prefix for `app_id` in this library
    pub fn prefix_path(&self, app_id: &str) -> PathBuf {
        self.library
            .join("steamapps/compatdata")
            .join(app_id)
            .join("pfx")
    }
}

/// Find all Steam installation directories under `home`
pub fn find_steam_installations(home: &Path) -> Vec<PathBuf> {
    let mut installations: Vec<PathBuf> = Vec::new();

    for relative_path in STEAM_PATHS {
        let full_path = home.join(relative_path);

        if full_path.join("steamapps").exists() || full_path.join("steam.pid").exists() {
            // Symlinks can make the same installation appear twice
            let canonical = full_path.canonicalize().unwrap_or(full_path.clone());
            if !installations
                .iter()
                .any(|i| i.canonicalize().unwrap_or(i.clone()) == canonical)
            {
                log_info(&format!("Found Steam installation: {}", full_path.display()));
                installations.push(full_path);
            }
        }
    }

    installations
}

/// Get all library folders for a Steam installation.
///
/// The installation directory itself comes first. A library whose `apps`
/// list is empty was not described by `libraryfolders.vdf` and may hold anything.
pub fn get_library_folders(steam_path: &Path) -> Vec<LibraryFolder> {
    let mut folders = vec![LibraryFolder {
        path: steam_path.to_string_lossy().to_string(),
        apps: Vec::new(),
    }];

    // Newer location first, then the older config/ copy
    for vdf_path in [
        steam_path.join("steamapps/libraryfolders.vdf"),
        steam_path.join("config/libraryfolders.vdf"),
    ] {
        let Ok(content) = fs::read_to_string(&vdf_path) else {
            continue;
        };
        for folder in parse_library_folders(&content) {
            let path = Path::new(&folder.path);
            if !path.exists() {
                continue;
            }
            match folders.iter_mut().find(|f| Path::new(&f.path) == path) {
                Some(known) if known.apps.is_empty() => known.apps = folder.apps,
                Some(_) => {}
                None => folders.push(folder),
            }
        }
    }

    folders
}

/// Read the manifest of `app_id` in `library` if the game is fully installed
fn installed_manifest(library: &Path, app_id: &str) -> Option<AppManifest> {
    let manifest_path = library
        .join("steamapps")
        .join(format!("appmanifest_{}.acf", app_id));
    let content = fs::read_to_string(manifest_path).ok()?;
    AppManifest::from_vdf(&content).filter(AppManifest::is_installed)
}

/// Find the library and install directory of a Steam game by App ID
pub fn find_game(home: &Path, app_id: &str) -> Option<SteamGameLocation> {
    for steam_path in find_steam_installations(home) {
        for folder in get_library_folders(&steam_path) {
            if !folder.apps.is_empty() && !folder.has_app(app_id) {
                continue;
            }
            let library = PathBuf::from(&folder.path);
            let Some(manifest) = installed_manifest(&library, app_id) else {
                continue;
            };

            let install_path = library
                .join("steamapps/common")
                .join(&manifest.install_dir);
            if install_path.is_dir() {
                log_info(&format!(
                    "Steam: {} installed at {}",
                    manifest.name,
                    install_path.display()
                ));
                return Some(SteamGameLocation {
                    library,
                    install_path,
                });
            }
        }
    }

    None
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Lay out a native Steam install under `home` with `app_id` installed
    /// as `install_dir`. Returns the game's install directory.
    pub fn fake_steam_game(home: &Path, app_id: &str, install_dir: &str) -> PathBuf {
        let steamapps = home.join(".local/share/Steam/steamapps");
        let install_path = steamapps.join("common").join(install_dir);
        fs::create_dir_all(&install_path).unwrap();
        fs::write(
            steamapps.join(format!("appmanifest_{}.acf", app_id)),
            format!(
                "\"AppState\"\n{{\n\t\"appid\"\t\"{}\"\n\t\"name\"\t\"{}\"\n\t\"StateFlags\"\t\"4\"\n\t\"installdir\"\t\"{}\"\n}}\n",
                app_id, install_dir, install_dir
            ),
        )
        .unwrap();
        install_path
    }
}
