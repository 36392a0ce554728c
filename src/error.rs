//! The decline-reason type for the incremental scheduler's eligibility gate.

use std::fmt;

/// Why the scheduler declined to be constructed.
///
/// Carries exactly the information needed to render the
/// `"Incremental compilation has been disabled, because <reason>"` remark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclineReason {
    /// `-incremental` was not passed.
    NotRequested,
    /// The compiler mode (whole-module, repl, ...) doesn't support incrementality.
    ModeUnsupported,
    /// `-embed-bitcode` is active.
    BitcodeEmbedding,
    /// No output-file-map was supplied.
    NoOutputFileMap,
    /// The prior build record couldn't be read or parsed.
    UnreadableBuildRecord(String),
    /// Dependency-graph construction failed.
    GraphConstructionFailed,
}

impl fmt::Display for DeclineReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclineReason::NotRequested => write!(f, "incremental compilation was not requested"),
            DeclineReason::ModeUnsupported => {
                write!(f, "the current compilation mode does not support incremental compilation")
            }
            DeclineReason::BitcodeEmbedding => {
                write!(f, "it is not compatible with embedding LLVM IR bitcode")
            }
            DeclineReason::NoOutputFileMap => write!(f, "no output file map was specified"),
            DeclineReason::UnreadableBuildRecord(reason) => {
                write!(f, "the build record could not be read: {}", reason)
            }
            DeclineReason::GraphConstructionFailed => {
                write!(f, "the dependency graph could not be constructed")
            }
        }
    }
}
