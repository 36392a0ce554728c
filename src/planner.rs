//! First-wave planner: merges the change detector, external-dep
//! scanner, and speculative expander outputs into the deterministic first
//! wave, plus the skipped set.

use std::collections::HashSet;

use crate::build_record::BuildRecord;
use crate::detector::Classified;
use crate::diagnostics::{Decision, Diagnostics, Message};
use crate::input::{sort_by_path, Input};

/// The result of planning the first wave: the inputs to compile immediately,
/// and everything else the build record knows about that wasn't selected.
#[derive(Debug, Clone)]
pub struct FirstWavePlan {
    pub first_wave: Vec<Input>,
    pub skipped: Vec<Input>,
}

/// The first wave is the union of changed and externally-dependent inputs,
/// plus whatever the speculative set adds beyond those two, sorted by path
/// name. The skipped set is every input the build record knows about that
/// didn't make the first wave.
pub fn plan_first_wave(
    classified: &[Classified],
    externally_dependent: &[Input],
    speculative: &[Input],
    record: &BuildRecord,
    diagnostics: &dyn Diagnostics,
) -> FirstWavePlan {
    let changed: HashSet<Input> =
        classified.iter().filter(|c| c.classification.is_scheduled()).map(|c| c.input.clone()).collect();

    let external_set: HashSet<Input> = externally_dependent.iter().cloned().collect();

    let initial: HashSet<Input> = changed.union(&external_set).cloned().collect();

    let mut first_wave_set = initial.clone();
    for input in speculative {
        if !initial.contains(input) {
            first_wave_set.insert(input.clone());
        }
    }

    let mut first_wave: Vec<Input> = first_wave_set.iter().cloned().collect();
    sort_by_path(&mut first_wave);

    for input in &first_wave {
        let decision =
            if initial.contains(input) { Decision::QueuingInitial } else { Decision::QueuingDependent };
        diagnostics.emit(Message::Decision { decision, input: Some(input.clone()) });
    }

    let mut skipped: Vec<Input> =
        record.known_inputs().filter(|input| !first_wave_set.contains(*input)).cloned().collect();
    sort_by_path(&mut skipped);

    for input in &skipped {
        diagnostics
            .emit(Message::Decision { decision: Decision::Skipping, input: Some(input.clone()) });
    }

    FirstWavePlan { first_wave, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_record::InputInfo;
    use crate::detector::Classification;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::filesystem::tick;
    use crate::status::InputStatus;
    use std::collections::HashMap;

    fn record_with(inputs: &[Input], build_time: u64) -> BuildRecord {
        let mut infos = HashMap::new();
        let mut current = HashMap::new();
        for input in inputs {
            infos.insert(
                input.clone(),
                InputInfo { previous_status: InputStatus::UpToDate, previous_mod_time: tick(0) },
            );
            current.insert(input.clone(), tick(0));
        }
        BuildRecord::new(tick(build_time), infos, current)
    }

    #[test]
    fn cascading_change_pulls_in_its_dependent() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let classified =
            vec![Classified { input: a.clone(), classification: Classification::ScheduleCascading }];
        let record = record_with(&[a.clone(), b.clone()], 100);
        let diags = RecordingDiagnostics::new();

        let plan = plan_first_wave(&classified, &[], &[b.clone()], &record, &diags);

        assert_eq!(plan.first_wave, vec![a, b]);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn no_changes_yields_empty_first_wave() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let classified = vec![
            Classified { input: a.clone(), classification: Classification::Skip },
            Classified { input: b.clone(), classification: Classification::Skip },
        ];
        let record = record_with(&[a.clone(), b.clone()], 100);
        let diags = RecordingDiagnostics::new();

        let plan = plan_first_wave(&classified, &[], &[], &record, &diags);

        assert!(plan.first_wave.is_empty());
        assert_eq!(plan.skipped, vec![a, b]);
    }

    #[test]
    fn an_input_is_never_both_initial_and_dependent() {
        let a = Input::source("a.src");
        let classified =
            vec![Classified { input: a.clone(), classification: Classification::ScheduleCascading }];
        let record = record_with(&[a.clone()], 100);
        let diags = RecordingDiagnostics::new();

        // a is simultaneously "changed" and speculatively proposed (e.g. by
        // some other cascading input); it must be reported once, as initial.
        let plan = plan_first_wave(&classified, &[], &[a.clone()], &record, &diags);

        assert_eq!(plan.first_wave, vec![a.clone()]);
        let messages = diags.messages();
        let initial_count = messages
            .iter()
            .filter(|m| matches!(m, Message::Decision { decision: Decision::QueuingInitial, input } if input.as_ref() == Some(&a)))
            .count();
        let dependent_count = messages
            .iter()
            .filter(|m| matches!(m, Message::Decision { decision: Decision::QueuingDependent, input } if input.as_ref() == Some(&a)))
            .count();
        assert_eq!(initial_count, 1);
        assert_eq!(dependent_count, 0);
    }
}
