//! The per-input prior-build status recorded in a `BuildRecord`.

/// Prior state of a single input, as recorded by the previous build.
///
/// A closed, four-case sum type: the change detector's classification
/// is total over these cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputStatus {
    /// Compiled successfully last time; only rebuilt if its mtime moved.
    UpToDate,
    /// Present in this invocation, absent from the prior build record.
    NewlyAdded,
    /// Must rebuild, and its dependents must be rechecked (interface may
    /// have changed in a way the graph can't yet characterize).
    NeedsCascadingBuild,
    /// Must rebuild; dependents don't need to be preemptively scheduled.
    NeedsNonCascadingBuild,
}
