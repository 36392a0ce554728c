//! A parsed snapshot of the previous build, as handed to the scheduler.
//!
//! The persistence format that produces this snapshot is someone else's
//! problem: the scheduler only ever consumes an already-parsed `BuildRecord`,
//! read once at construction and never again.

use std::collections::HashMap;
use std::time::SystemTime;

use crate::input::Input;
use crate::status::InputStatus;

/// Prior state recorded for one input: its last-known status and mtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputInfo {
    pub previous_status: InputStatus,
    pub previous_mod_time: SystemTime,
}

/// Snapshot of the previous build, as loaded by a `BuildRecordLoader`.
#[derive(Debug, Clone)]
pub struct BuildRecord {
    /// Wall-clock timestamp of the last successful build's start.
    pub build_time: SystemTime,

    /// Per-input prior status and previous mtime.
    input_infos: HashMap<Input, InputInfo>,

    /// Current mtime at driver startup, as sampled once up front. This is
    /// the authoritative "current mtime" the change detector compares
    /// against — not a second filesystem read.
    current_mod_times: HashMap<Input, SystemTime>,
}

impl BuildRecord {
    pub fn new(
        build_time: SystemTime,
        input_infos: HashMap<Input, InputInfo>,
        current_mod_times: HashMap<Input, SystemTime>,
    ) -> BuildRecord {
        BuildRecord { build_time, input_infos, current_mod_times }
    }

    pub fn previous_status(&self, input: &Input) -> Option<InputStatus> {
        self.input_infos.get(input).map(|info| info.previous_status)
    }

    pub fn current_mod_time(&self, input: &Input) -> Option<SystemTime> {
        self.current_mod_times.get(input).copied()
    }

    /// All inputs this build record has any knowledge of (i.e. candidates
    /// for the skipped set — the universe minus the first wave).
    pub fn known_inputs(&self) -> impl Iterator<Item = &Input> {
        self.current_mod_times.keys()
    }
}

/// Loads a `BuildRecord` from wherever the driver persists it.
///
/// The persistence format itself is someone else's problem; this trait is
/// the seam the scheduler's construction code depends on, so tests can
/// supply an in-memory record without touching disk.
pub trait BuildRecordLoader {
    fn load(&self) -> Result<BuildRecord, String>;
}

/// A loader that always hands back a pre-built record, for tests and for
/// drivers that have already parsed the record themselves.
pub struct StaticBuildRecordLoader(pub BuildRecord);

impl BuildRecordLoader for StaticBuildRecordLoader {
    fn load(&self) -> Result<BuildRecord, String> {
        Ok(self.0.clone())
    }
}
