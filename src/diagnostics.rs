//! Diagnostic messages emitted by the scheduler.
//!
//! Exact wording is a user-facing contract: the identifiers below are
//! the stable strings, not just a label. Formatting/rendering to a terminal
//! or log file is out of scope — this module only produces the structured
//! message and forwards it to an injected sink, never holding a
//! back-reference to the driver's diagnostic engine.

use std::fmt;

use crate::error::DeclineReason;
use crate::input::Input;

/// Severity of a diagnostic, matching the driver's `warning | remark` levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Remark,
}

/// One incremental-compilation decision, reported under the
/// `"Incremental compilation:"` remark when enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    QueuingInitial,
    QueuingDependent,
    Skipping,
    SkippingCurrent,
    SchedulingNew,
    SchedulingCascadingBuild,
    SchedulingNoncascadingBuild,
    SchedulingExternallyDependentOnNewer(String),
    QueuingBecauseOfDependenciesDiscoveredLater,
    SchedulingForSecondWave,
    TriedToScheduleSecondWaveInputAgain,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::QueuingInitial => write!(f, "Queuing (initial):"),
            Decision::QueuingDependent => write!(f, "Queuing (dependent):"),
            Decision::Skipping => write!(f, "Skipping:"),
            Decision::SkippingCurrent => write!(f, "Skipping current"),
            Decision::SchedulingNew => write!(f, "Scheduling new"),
            Decision::SchedulingCascadingBuild => write!(f, "Scheduling cascading build"),
            Decision::SchedulingNoncascadingBuild => write!(f, "Scheduling noncascading build"),
            Decision::SchedulingExternallyDependentOnNewer(name) => {
                write!(f, "Scheduling externally-dependent on newer {}", name)
            }
            Decision::QueuingBecauseOfDependenciesDiscoveredLater => {
                write!(f, "Queuing because of dependencies discovered later:")
            }
            Decision::SchedulingForSecondWave => write!(f, "Scheduling for 2nd wave"),
            Decision::TriedToScheduleSecondWaveInputAgain => {
                write!(f, "Tried to schedule 2nd wave input again")
            }
        }
    }
}

/// A diagnostic message, keyed by stable identifier, optionally attached to
/// an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// `"ignoring -incremental (currently requires an output file map)"`
    NoOutputFileMap,
    /// `"Incremental compilation has been disabled, because <reason>"`
    Disabled(DeclineReason),
    /// `"Incremental compilation: <message>"`, optionally about a specific input.
    Decision { decision: Decision, input: Option<Input> },
}

impl Message {
    pub fn severity(&self) -> Severity {
        match self {
            Message::NoOutputFileMap => Severity::Warning,
            Message::Disabled(_) => Severity::Remark,
            Message::Decision { .. } => Severity::Remark,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::NoOutputFileMap => {
                write!(f, "ignoring -incremental (currently requires an output file map)")
            }
            Message::Disabled(reason) => {
                write!(f, "Incremental compilation has been disabled, because {}", reason)
            }
            Message::Decision { decision, input } => match input {
                Some(input) => write!(f, "Incremental compilation: {} {}", decision, input),
                None => write!(f, "Incremental compilation: {}", decision),
            },
        }
    }
}

/// Sink for diagnostics, injected by the driver. Never implemented by the
/// scheduler itself — it only ever produces `Message`s and hands them off.
pub trait Diagnostics {
    fn emit(&self, message: Message);
}

/// A `Diagnostics` sink that forwards every message to the `log` crate, at a
/// level matched to its severity, and drops it (no structured forwarding).
/// This is what a driver without `-driver-show-incremental` effectively
/// gets: the decisions are still logged for debugging, just not reported as
/// user-facing remarks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDiagnostics;

impl Diagnostics for LoggingDiagnostics {
    fn emit(&self, message: Message) {
        match message.severity() {
            Severity::Warning => log::warn!("{}", message),
            Severity::Remark => log::debug!("{}", message),
        }
    }
}

/// A `Diagnostics` sink that forwards `Message::Decision` to an inner sink
/// only when enabled, while always forwarding `NoOutputFileMap`/`Disabled`
/// (those aren't gated by `-driver-show-incremental`). Used by the scheduler
/// to honor `IncrementalOptions::should_report_incremental_decisions`
/// without every component function having to check the flag itself.
pub struct GatedDiagnostics {
    inner: std::sync::Arc<dyn Diagnostics + Send + Sync>,
    report_decisions: bool,
}

impl GatedDiagnostics {
    pub fn new(
        inner: std::sync::Arc<dyn Diagnostics + Send + Sync>,
        report_decisions: bool,
    ) -> GatedDiagnostics {
        GatedDiagnostics { inner, report_decisions }
    }
}

impl Diagnostics for GatedDiagnostics {
    fn emit(&self, message: Message) {
        if matches!(message, Message::Decision { .. }) && !self.report_decisions {
            return;
        }
        self.inner.emit(message);
    }
}

/// A `Diagnostics` sink that records every message it receives, for tests.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    messages: std::sync::Mutex<Vec<Message>>,
}

impl RecordingDiagnostics {
    pub fn new() -> RecordingDiagnostics {
        RecordingDiagnostics::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }

    pub fn contains_decision(&self, decision: &Decision) -> bool {
        self.messages().iter().any(|m| matches!(m, Message::Decision { decision: d, .. } if d == decision))
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn emit(&self, message: Message) {
        log::trace!("{}", message);
        self.messages.lock().unwrap().push(message);
    }
}
