//! X2Launch Logging System
//!
//! Provides structured logging with system information header

use chrono::Local;
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::Command;
use std::sync::{Arc, OnceLock};

use crate::version::current_version;

static LOGGER: OnceLock<Arc<Mutex<LauncherLogger>>> = OnceLock::new();

// ============================================================================
// System Information Detection
// ============================================================================

#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub app_version: String,
    pub distro: String,
    pub distro_version: String,
    pub kernel: String,
    pub session_type: String,
}

impl SystemInfo {
    pub fn detect() -> Self {
        Self {
            app_version: current_version(),
            distro: read_os_release("NAME").unwrap_or_else(|| "Unknown".to_string()),
            distro_version: read_os_release("VERSION_ID").unwrap_or_default(),
            kernel: detect_kernel(),
            session_type: std::env::var("XDG_SESSION_TYPE")
                .unwrap_or_else(|_| "Unknown".to_string()),
        }
    }

    pub fn to_log_header(&self) -> String {
        format!(
r#"================================================================================
X2Launch Log - {}
================================================================================
Application:   X2Launch {}
System Info:
  Distro:      {} {}
  Kernel:      {}
  Session:     {}
================================================================================
"#,
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            self.app_version,
            self.distro,
            self.distro_version,
            self.kernel,
            self.session_type,
        )
    }
}

fn read_os_release(key: &str) -> Option<String> {
    let file = File::open("/etc/os-release").ok()?;
    let prefix = format!("{}=", key);
    BufReader::new(file)
        .lines()
        .map_while(Result::ok)
        .find(|line| line.starts_with(&prefix))
        .map(|line| line.trim_start_matches(&prefix).trim_matches('"').to_string())
}

fn detect_kernel() -> String {
    if let Ok(output) = Command::new("uname").arg("-r").output() {
        if output.status.success() {
            return String::from_utf8_lossy(&output.stdout).trim().to_string();
        }
    }
    "Unknown".to_string()
}

// ============================================================================
// Log Levels
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Info,
    Reconcile, // Registry changes made during startup
    Warning,
    Error,
}

impl LogLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Info => "[INFO]",
            LogLevel::Reconcile => "[RECONCILE]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Error => "[ERROR]",
        }
    }
}

// ============================================================================
// Launcher Logger
// ============================================================================

pub struct LauncherLogger {
    log_file: Option<File>,
    echo: bool,
}

impl LauncherLogger {
    pub fn new() -> Self {
        Self::in_dir(&crate::launcher_path!("logs"))
    }

    /// Create a logger writing a fresh timestamped file inside `log_dir`
    pub fn in_dir(log_dir: &Path) -> Self {
        let _ = fs::create_dir_all(log_dir);

        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let log_path = log_dir.join(format!("x2launch_{}.log", timestamp));

        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .ok();

        let mut logger = Self {
            log_file,
            echo: true,
        };

        let header = SystemInfo::detect().to_log_header();
        logger.write_raw(&header);

        logger
    }

    /// Stop mirroring log lines to stdout
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.log_file {
            let _ = writeln!(file, "{}", msg);
            let _ = file.flush();
        }

        if self.echo {
            println!("{}", msg);
        }
    }

    pub fn log(&mut self, level: LogLevel, message: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        let formatted = format!("[{}] {} {}", timestamp, level.prefix(), message);
        self.write_raw(&formatted);
    }
}

impl Default for LauncherLogger {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Global Logger Access
// ============================================================================

/// Initialize the global logger (call once at startup)
pub fn init_logger() {
    LOGGER.get_or_init(|| Arc::new(Mutex::new(default_logger())));
}

/// Install a specific logger as the global one.
///
/// Returns `false` if a logger was already initialized.
pub fn install_logger(logger: LauncherLogger) -> bool {
    LOGGER.set(Arc::new(Mutex::new(logger))).is_ok()
}

fn logger() -> Arc<Mutex<LauncherLogger>> {
    LOGGER
        .get_or_init(|| Arc::new(Mutex::new(default_logger())))
        .clone()
}

#[cfg(not(test))]
fn default_logger() -> LauncherLogger {
    LauncherLogger::new()
}

// Unit tests never touch the real data directory
#[cfg(test)]
fn default_logger() -> LauncherLogger {
    LauncherLogger::in_dir(&std::env::temp_dir().join("x2launch-test-logs")).quiet()
}

// ============================================================================
// Convenience Logging Functions
// ============================================================================

pub fn log_info(message: &str) {
    logger().lock().log(LogLevel::Info, message);
}

pub fn log_reconcile(message: &str) {
    logger().lock().log(LogLevel::Reconcile, message);
}

pub fn log_warning(message: &str) {
    logger().lock().log(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    logger().lock().log(LogLevel::Error, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_names_the_application_version() {
        let info = SystemInfo::detect();
        let header = info.to_log_header();
        assert!(header.contains(&format!("X2Launch {}", info.app_version)));
        assert!(header.starts_with("====="));
    }

    #[test]
    fn logger_writes_prefixed_lines_to_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = LauncherLogger::in_dir(dir.path()).quiet();
        logger.log(LogLevel::Warning, "mod path vanished");

        let entry = fs::read_dir(dir.path()).unwrap().flatten().next().unwrap();
        let content = fs::read_to_string(entry.path()).unwrap();
        assert!(content.contains("[WARNING] mod path vanished"));
    }
}
