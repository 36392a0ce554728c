//! The minimal read-only filesystem capability the detector and scanner need.
//!
//! Kept as a narrow trait, the way the dependency graph is, so tests can
//! supply a fake clock/mtime table instead of touching real files.

use std::path::Path;
use std::time::SystemTime;

/// File metadata the scheduler cares about: only the modification time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileInfo {
    pub mod_time: SystemTime,
}

/// Read-only filesystem access, injected by the driver.
///
/// A missing file or unreadable metadata is represented as `None` rather
/// than an `io::Error`: an input missing a current mtime is simply treated
/// as "infinitely future" by the caller, not as a hard error.
pub trait FileSystem {
    fn get_file_info(&self, path: &Path) -> Option<FileInfo>;
}

/// An in-memory filesystem double for tests.
#[derive(Debug, Clone, Default)]
pub struct FakeFileSystem {
    mod_times: std::collections::HashMap<std::path::PathBuf, SystemTime>,
}

impl FakeFileSystem {
    pub fn new() -> FakeFileSystem {
        FakeFileSystem::default()
    }

    pub fn set_mod_time(&mut self, path: impl Into<std::path::PathBuf>, time: SystemTime) {
        self.mod_times.insert(path.into(), time);
    }
}

impl FileSystem for FakeFileSystem {
    fn get_file_info(&self, path: &Path) -> Option<FileInfo> {
        self.mod_times.get(path).map(|&mod_time| FileInfo { mod_time })
    }
}

/// Helper to build `SystemTime` values from small integer "ticks", handy
/// for tests that only care about relative ordering (e.g. `build_time=100`).
pub fn tick(n: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(n)
}
