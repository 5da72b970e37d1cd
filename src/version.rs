//! Compile-time version information

pub const VERSION_MAJOR: &str = env!("CARGO_PKG_VERSION_MAJOR");
pub const VERSION_MINOR: &str = env!("CARGO_PKG_VERSION_MINOR");
pub const VERSION_PATCH: &str = env!("CARGO_PKG_VERSION_PATCH");

/// Version string shown to users, e.g. `v0.3.0`
pub fn current_version() -> String {
    format!("v{}.{}.{}", VERSION_MAJOR, VERSION_MINOR, VERSION_PATCH)
}
