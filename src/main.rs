//! X2Launch - XCOM 2 launcher for Linux
//!
//! Runs the startup reconciliation of the mod registry from the command line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use x2launch::config::Settings;
use x2launch::fs_probe::HostFs;
use x2launch::game_finder::SteamLocator;
use x2launch::logging::{init_logger, log_error, log_info};
use x2launch::startup::{initialize, upgrade_warning_pending, Notice, StartupOptions};
use x2launch::version::current_version;

#[derive(Parser)]
#[command(name = "x2launch", version, about = "XCOM 2 launcher and mod registry")]
struct Cli {
    /// Settings file to use instead of ~/X2Launch/settings.json
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile the mod registry with the filesystem and report problems
    Check {
        /// Do not write the reconciled settings back
        #[arg(long)]
        dry_run: bool,
        /// Skip registering newly installed mods
        #[arg(long)]
        no_import: bool,
        /// Continue past the warning about settings from an incompatible launcher
        #[arg(long)]
        accept_upgrade: bool,
    },
    /// Print the launcher version
    Version,
}

fn check(settings_path: PathBuf, dry_run: bool, no_import: bool, accept_upgrade: bool) -> ExitCode {
    let first_run = Settings::is_first_run(&settings_path);
    let mut settings = match Settings::load(&settings_path) {
        Ok(settings) => settings,
        Err(e) => {
            log_error(&format!("Failed to load settings: {}", e));
            return ExitCode::FAILURE;
        }
    };

    if upgrade_warning_pending(&settings, first_run) && !accept_upgrade {
        println!("{}", Notice::UpgradeWarning);
        println!("\nRun again with --accept-upgrade to continue. Nothing was changed.");
        return ExitCode::FAILURE;
    }

    let mut options = StartupOptions {
        first_run,
        import_new_mods: !no_import,
        ..StartupOptions::default()
    };
    if dry_run {
        options = options.without_file_changes();
    }
    let report = initialize(&mut settings, &SteamLocator::new(), &HostFs, &options);

    // Already acknowledged through --accept-upgrade
    for notice in report.notices.iter().filter(|n| **n != Notice::UpgradeWarning) {
        println!("{}", notice);
    }
    if report.imported > 0 {
        println!("Imported {} new mods.", report.imported);
    }

    if dry_run {
        return ExitCode::SUCCESS;
    }
    match settings.save(&settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error(&format!("Failed to save settings: {}", e));
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(Command::Version) = cli.command {
        println!("{}", current_version());
        return ExitCode::SUCCESS;
    }

    // Initialize logging (writes to ~/X2Launch/logs/)
    init_logger();
    log_info("X2Launch starting up...");

    let settings_path = cli.settings.unwrap_or_else(Settings::default_path);
    match cli.command {
        Some(Command::Check {
            dry_run,
            no_import,
            accept_upgrade,
        }) => check(settings_path, dry_run, no_import, accept_upgrade),
        _ => check(settings_path, false, false, false),
    }
}
