//! Filesystem existence probes
//!
//! Reconciliation never reads the disk directly; it asks a [`FileSystem`]
//! whether a directory or file is present. Probes never fail: anything that
//! cannot be confirmed to exist reports `false`.

use std::fs;

/// Existence checks used by registry reconciliation
pub trait FileSystem {
    /// `true` only if `path` exists and is a directory
    fn dir_exists(&self, path: &str) -> bool;
    /// `true` only if `path` exists and is a regular file
    fn file_exists(&self, path: &str) -> bool;
}

/// The real filesystem of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FileSystem for HostFs {
    fn dir_exists(&self, path: &str) -> bool {
        fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    fn file_exists(&self, path: &str) -> bool {
        fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::FileSystem;
    use std::collections::BTreeSet;

    /// In-memory filesystem for reconciliation tests. Paths are matched verbatim.
    #[derive(Debug, Default, Clone)]
    pub struct MemoryFs {
        dirs: BTreeSet<String>,
        files: BTreeSet<String>,
    }

    impl MemoryFs {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dir(mut self, path: &str) -> Self {
            self.dirs.insert(path.to_string());
            self
        }

        pub fn with_file(mut self, path: &str) -> Self {
            self.files.insert(path.to_string());
            self
        }

        /// Add an installed mod: its directory plus `<id>.XComMod` inside it
        pub fn with_mod(self, dir: &str, id: &str) -> Self {
            let descriptor = format!("{}{}.XComMod", dir, id);
            self.with_dir(dir).with_file(&descriptor)
        }

        pub fn remove_dir(&mut self, path: &str) {
            self.dirs.remove(path);
        }
    }

    impl FileSystem for MemoryFs {
        fn dir_exists(&self, path: &str) -> bool {
            self.dirs.contains(path)
        }

        fn file_exists(&self, path: &str) -> bool {
            self.files.contains(path)
        }
    }
}
