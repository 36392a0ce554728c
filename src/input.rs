//! Source inputs considered by the incremental scheduler.

use std::fmt;
use std::path::{Path, PathBuf};

/// Whether an `Input`'s type tag participates in compilation at all.
///
/// Only `Source` inputs are considered by the scheduler; everything else
/// (e.g. a linker script or a resource file swept up by the same file list)
/// is filtered out before the change detector ever sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    Source,
    NonCompiling,
}

/// An abstract reference to a source file: a logical path plus a type tag.
///
/// Cheap to clone (an `Arc`-free `PathBuf` clone) since the scheduler passes
/// inputs around by value through several sets over the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Input {
    path: PathBuf,
    kind: InputKind,
}

impl Input {
    pub fn new(path: impl Into<PathBuf>, kind: InputKind) -> Input {
        Input { path: path.into(), kind }
    }

    pub fn source(path: impl Into<PathBuf>) -> Input {
        Input::new(path, InputKind::Source)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Only inputs of a compiling type participate in the scheduler.
    pub fn participates_in_compilation(&self) -> bool {
        matches!(self.kind, InputKind::Source)
    }

    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl AsRef<Path> for Input {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Sort a collection of inputs by path name, the deterministic ordering
/// required throughout the scheduler.
pub fn sort_by_path(inputs: &mut Vec<Input>) {
    inputs.sort_by(|a, b| a.path.cmp(&b.path));
}
