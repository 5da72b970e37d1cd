//! Startup sequence
//!
//! Everything that has to happen to the settings before the launcher shows
//! anything: verify the game path, reconcile the mod registry, import new
//! mods and clean up files an interrupted launch left behind.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::error::{LauncherError, Result};
use crate::fs_probe::FileSystem;
use crate::game_finder::{GameLocator, XCOM2};
use crate::importer::import_mods;
use crate::logging::{log_info, log_warning};
use crate::registry::reconcile_all;

const MOD_OPTIONS_FILE: &str = "DefaultModOptions.ini";
const MOD_OPTIONS_BACKUP: &str = "DefaultModOptions.ini.bak";

const UPGRADE_WARNING: &str = "WARNING!!\n\n\
This launcher is NOT COMPATIBLE with the old 'settings.json' file.\n\
Stop NOW and launch the old version to export a profile of your mods WITH GROUPS!\n\
Once that is done, move the old 'settings.json' file to a SAFE PLACE and then proceed.\n\
After loading, import the profile you saved to recover groups.";

/// Something the user should be told after startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Settings written by an incompatible earlier launcher were loaded
    UpgradeWarning,
    GameDirNotFound,
    ModDirsNotFound,
    /// Mods hidden because they broke; carries the full message
    BrokenMods(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::UpgradeWarning => f.write_str(UPGRADE_WARNING),
            Notice::GameDirNotFound => write!(
                f,
                "Could not find {} installation path. Please fill it manually in the settings.",
                XCOM2.name
            ),
            Notice::ModDirsNotFound => write!(
                f,
                "Could not find {} mod directories. Please fill them in manually in the settings.",
                XCOM2.name
            ),
            Notice::BrokenMods(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// No settings file existed before this run
    pub first_run: bool,
    /// Register mods found under the mod roots that are not known yet
    pub import_new_mods: bool,
    /// Put back a `DefaultModOptions.ini` left as `.bak` by an interrupted launch
    pub restore_mod_options: bool,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            first_run: false,
            import_new_mods: true,
            restore_mod_options: true,
        }
    }
}

impl StartupOptions {
    /// Leave every file on disk untouched; only the settings value changes
    #[must_use]
    pub fn without_file_changes(mut self) -> Self {
        self.restore_mod_options = false;
        self
    }
}

/// Outcome of [`initialize`]
#[derive(Debug, Clone, Default)]
pub struct StartupReport {
    pub notices: Vec<Notice>,
    pub imported: usize,
    pub restored_mod_options: bool,
}

/// Whether `settings` came from a launcher whose format this one cannot read
/// faithfully, so the user should be warned before anything is changed
pub fn upgrade_warning_pending(settings: &Settings, first_run: bool) -> bool {
    settings.show_upgrade_warning && !first_run
}

/// Bring `settings` in line with the current machine.
///
/// Never fails: missing directories turn into notices and flagged mods,
/// and file clean-up problems are logged.
pub fn initialize<L, F>(
    settings: &mut Settings,
    locator: &L,
    fs: &F,
    options: &StartupOptions,
) -> StartupReport
where
    L: GameLocator + ?Sized,
    F: FileSystem + ?Sized,
{
    let mut report = StartupReport::default();
    if upgrade_warning_pending(settings, options.first_run) {
        log_warning("Settings were written by an incompatible launcher version");
        report.notices.push(Notice::UpgradeWarning);
    }
    settings.show_upgrade_warning = false;

    if !fs.dir_exists(&settings.game_path) {
        settings.game_path = locator.detect_game_dir().unwrap_or_default();
        log_info(&format!("Game path set to '{}'", settings.game_path));
    }
    if settings.game_path.is_empty() {
        log_warning("Game installation not found");
        report.notices.push(Notice::GameDirNotFound);
    }

    let discovered = locator.detect_mod_dirs();
    let broken = reconcile_all(&mut settings.registry, &discovered, fs);

    if settings.registry.mod_paths.is_empty() {
        log_warning("No mod directories known");
        report.notices.push(Notice::ModDirsNotFound);
    }
    if let Some(message) = broken {
        report.notices.push(Notice::BrokenMods(message));
    }

    if options.import_new_mods {
        report.imported = import_mods(&mut settings.registry);
    }

    if options.restore_mod_options {
        if let Some(config_dir) = locator.detect_config_dir() {
            match restore_mod_options_backup(&config_dir) {
                Ok(restored) => report.restored_mod_options = restored,
                Err(e) => log_warning(&format!("Could not restore mod options backup: {}", e)),
            }
        }
    }

    report
}

/// Restore `DefaultModOptions.ini` from its `.bak` copy in `config_dir`.
///
/// Returns `Ok(false)` if there was no backup.
pub fn restore_mod_options_backup(config_dir: &Path) -> Result<bool> {
    let backup = config_dir.join(MOD_OPTIONS_BACKUP);
    if !backup.is_file() {
        return Ok(false);
    }

    let target = config_dir.join(MOD_OPTIONS_FILE);
    fs::copy(&backup, &target).map_err(|e| LauncherError::io(&target, e))?;
    fs::remove_file(&backup).map_err(|e| LauncherError::io(&backup, e))?;

    log_info(&format!("Restored {} from backup", target.display()));
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_probe::fake::MemoryFs;
    use crate::registry::{ModCategory, ModEntry, ModState};
    use std::path::PathBuf;

    #[derive(Default)]
    struct FixedLocator {
        game_dir: Option<String>,
        mod_dirs: Vec<String>,
        config_dir: Option<PathBuf>,
    }

    impl GameLocator for FixedLocator {
        fn detect_game_dir(&self) -> Option<String> {
            self.game_dir.clone()
        }

        fn detect_mod_dirs(&self) -> Vec<String> {
            self.mod_dirs.clone()
        }

        fn detect_config_dir(&self) -> Option<PathBuf> {
            self.config_dir.clone()
        }
    }

    fn no_side_effects() -> StartupOptions {
        StartupOptions {
            first_run: true,
            import_new_mods: false,
            restore_mod_options: false,
        }
    }

    #[test]
    fn missing_game_path_is_redetected() {
        let fs = MemoryFs::new().with_dir("/games/XCOM 2");
        let locator = FixedLocator {
            game_dir: Some("/games/XCOM 2".into()),
            mod_dirs: vec!["/games/XCOM 2/XComGame/Mods/".into()],
            ..Default::default()
        };
        let mut settings = Settings {
            game_path: "/old/XCOM 2".into(),
            ..Settings::default()
        };

        let report = initialize(&mut settings, &locator, &fs, &no_side_effects());

        assert_eq!(settings.game_path, "/games/XCOM 2");
        assert!(report.notices.is_empty());
        assert!(!settings.show_upgrade_warning);
    }

    #[test]
    fn upgrade_warning_is_shown_once_for_existing_settings() {
        let fs = MemoryFs::new().with_dir("/g/").with_dir("/g/Mods/");
        let locator = FixedLocator {
            game_dir: Some("/g/".into()),
            mod_dirs: vec!["/g/Mods/".into()],
            ..Default::default()
        };
        let options = StartupOptions {
            first_run: false,
            ..no_side_effects()
        };
        let mut settings = Settings {
            game_path: "/g/".into(),
            ..Settings::default()
        };

        let report = initialize(&mut settings, &locator, &fs, &options);
        assert_eq!(report.notices, vec![Notice::UpgradeWarning]);
        assert!(report.notices[0].to_string().contains("NOT COMPATIBLE"));
        assert!(!settings.show_upgrade_warning);

        let again = initialize(&mut settings, &locator, &fs, &options);
        assert!(again.notices.is_empty());
    }

    #[test]
    fn first_run_never_shows_the_upgrade_warning() {
        let settings = Settings::default();
        assert!(settings.show_upgrade_warning);
        assert!(!upgrade_warning_pending(&settings, true));
        assert!(upgrade_warning_pending(&settings, false));
    }

    #[test]
    fn undetectable_game_and_mods_produce_notices() {
        let fs = MemoryFs::new();
        let mut settings = Settings::default();

        let report = initialize(&mut settings, &FixedLocator::default(), &fs, &no_side_effects());

        assert_eq!(
            report.notices,
            vec![Notice::GameDirNotFound, Notice::ModDirsNotFound]
        );
        assert!(report.notices[0].to_string().starts_with("Could not find XCOM 2"));
    }

    #[test]
    fn broken_mods_are_reported_after_path_notices() {
        let fs = MemoryFs::new().with_dir("/g/").with_mod("/elsewhere/Foo/", "Foo");
        let locator = FixedLocator {
            game_dir: Some("/g/".into()),
            ..Default::default()
        };
        let mut settings = Settings::default();
        let mut category = ModCategory::new(0);
        category.entries.push(ModEntry::new("Foo", "Foo", "/elsewhere/Foo/"));
        category.entries.push(ModEntry::new("Gone", "Gone", "/gone/Gone/"));
        settings.registry.mods.entries.insert("Unsorted".into(), category);

        let report = initialize(&mut settings, &locator, &fs, &no_side_effects());

        assert_eq!(
            report.notices,
            vec![
                Notice::ModDirsNotFound,
                Notice::BrokenMods("The mod 'Foo' no longer exists and has been hidden.".into()),
            ]
        );
        // Both bits set: flagged but never auto-hidden
        let gone = settings.registry.mods.all().nth(1).unwrap();
        assert_eq!(gone.state, ModState::NOT_LOADED | ModState::NOT_INSTALLED);
        assert!(!gone.is_hidden);
    }

    #[test]
    fn backup_is_restored_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MOD_OPTIONS_FILE), "broken").unwrap();
        fs::write(dir.path().join(MOD_OPTIONS_BACKUP), "original").unwrap();

        assert!(restore_mod_options_backup(dir.path()).unwrap());

        let restored = fs::read_to_string(dir.path().join(MOD_OPTIONS_FILE)).unwrap();
        assert_eq!(restored, "original");
        assert!(!dir.path().join(MOD_OPTIONS_BACKUP).exists());
        assert!(!restore_mod_options_backup(dir.path()).unwrap());
    }

    #[test]
    fn dry_run_leaves_the_backup_in_place() {
        let config = tempfile::tempdir().unwrap();
        fs::write(config.path().join(MOD_OPTIONS_BACKUP), "original").unwrap();
        let locator = FixedLocator {
            config_dir: Some(config.path().to_path_buf()),
            ..Default::default()
        };
        let options = StartupOptions {
            first_run: true,
            import_new_mods: false,
            ..StartupOptions::default()
        }
        .without_file_changes();

        let report = initialize(&mut Settings::default(), &locator, &MemoryFs::new(), &options);

        assert!(!report.restored_mod_options);
        assert!(config.path().join(MOD_OPTIONS_BACKUP).exists());
    }

    #[test]
    fn startup_imports_and_restores_when_asked() {
        let mods = tempfile::tempdir().unwrap();
        let mod_dir = mods.path().join("Foo");
        fs::create_dir_all(&mod_dir).unwrap();
        fs::write(mod_dir.join("Foo.XComMod"), "").unwrap();
        let config = tempfile::tempdir().unwrap();
        fs::write(config.path().join(MOD_OPTIONS_BACKUP), "original").unwrap();

        let root = mods.path().to_string_lossy().to_string();
        let locator = FixedLocator {
            game_dir: Some(root.clone()),
            mod_dirs: vec![root],
            config_dir: Some(config.path().to_path_buf()),
        };
        let mut settings = Settings::default();

        let report = initialize(
            &mut settings,
            &locator,
            &crate::fs_probe::HostFs,
            &StartupOptions {
                first_run: true,
                ..StartupOptions::default()
            },
        );

        assert_eq!(report.imported, 1);
        assert!(report.restored_mod_options);
        assert!(report.notices.is_empty());
    }
}
