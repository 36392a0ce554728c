//! Change detector: classifies each compiling input against the prior
//! build record.

use crate::build_record::BuildRecord;
use crate::diagnostics::{Decision, Diagnostics, Message};
use crate::input::Input;
use crate::status::InputStatus;

/// The detector's verdict for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Up to date and older than the last build; not scheduled.
    Skip,
    /// Up to date but touched since the last build; the nature of the
    /// change is unknown, so this does *not* cascade speculatively.
    ScheduleChanged,
    /// New to this invocation; the graph has no prior knowledge of it.
    ScheduleNew,
    /// Carried over from a cascading rebuild request.
    ScheduleCascading,
    /// Carried over from a non-cascading rebuild request.
    ScheduleNonCascading,
}

impl Classification {
    pub fn is_scheduled(self) -> bool {
        !matches!(self, Classification::Skip)
    }

    /// Whether this classification, on its own, drives speculative
    /// expansion.
    pub fn triggers_speculative_expansion(self) -> bool {
        matches!(self, Classification::ScheduleCascading)
    }
}

/// One classified input, preserving the prior status the classification was
/// derived from (the speculative expander needs it to find the cascading
/// subset again without re-deriving it).
#[derive(Debug, Clone)]
pub struct Classified {
    pub input: Input,
    pub classification: Classification,
}

/// Classify every input against `record`, preserving the order `inputs` was
/// given in. Emits the per-input diagnostic for each classification as it
/// goes (a scheduled-or-skipped decision per classification); a missing
/// record entry or missing current mtime is folded into the classification
/// itself rather than reported separately.
pub fn classify_inputs(
    inputs: &[Input],
    record: &BuildRecord,
    diagnostics: &dyn Diagnostics,
) -> Vec<Classified> {
    inputs
        .iter()
        .filter(|input| input.participates_in_compilation())
        .map(|input| {
            let classification = classify_one(input, record);
            report(input, classification, diagnostics);
            Classified { input: input.clone(), classification }
        })
        .collect()
}

fn classify_one(input: &Input, record: &BuildRecord) -> Classification {
    // Rule 6: an input missing from the build record is newly added.
    let previous_status = record.previous_status(input).unwrap_or(InputStatus::NewlyAdded);

    match previous_status {
        InputStatus::UpToDate => {
            // Rule 7: a missing current mtime is "infinitely future", which
            // always satisfies `current >= build_time`.
            match record.current_mod_time(input) {
                Some(current) if current < record.build_time => Classification::Skip,
                _ => Classification::ScheduleChanged,
            }
        }
        InputStatus::NewlyAdded => Classification::ScheduleNew,
        InputStatus::NeedsCascadingBuild => Classification::ScheduleCascading,
        InputStatus::NeedsNonCascadingBuild => Classification::ScheduleNonCascading,
    }
}

fn report(input: &Input, classification: Classification, diagnostics: &dyn Diagnostics) {
    match classification {
        Classification::Skip => {
            diagnostics.emit(Message::Decision {
                decision: Decision::SkippingCurrent,
                input: Some(input.clone()),
            });
        }
        Classification::ScheduleChanged => {
            // Not part of the stable diagnostic contract in the
            // source this is modeled on; logged for debugging only.
            log::trace!("Scheduling changed input: {}", input);
        }
        Classification::ScheduleNew => {
            diagnostics.emit(Message::Decision {
                decision: Decision::SchedulingNew,
                input: Some(input.clone()),
            });
        }
        Classification::ScheduleCascading => {
            diagnostics.emit(Message::Decision {
                decision: Decision::SchedulingCascadingBuild,
                input: Some(input.clone()),
            });
        }
        Classification::ScheduleNonCascading => {
            diagnostics.emit(Message::Decision {
                decision: Decision::SchedulingNoncascadingBuild,
                input: Some(input.clone()),
            });
        }
    }
}
