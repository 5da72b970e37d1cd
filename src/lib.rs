//! X2Launch - XCOM 2 launcher for Linux
//!
//! Library crate for the launcher core: the mod registry and its startup
//! reconciliation, Steam-based game discovery, settings and logging.
//! The command line front end lives in the binary behind the `cli` feature.

pub mod config;
pub mod error;
pub mod fs_probe;
pub mod game_finder;
pub mod importer;
pub mod logging;
pub mod paths;
pub mod registry;
pub mod startup;
pub mod version;
