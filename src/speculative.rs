//! Speculative expander: eagerly widens the first wave with the
//! dependents of inputs whose interface is suspect, ahead of having their
//! freshly-produced dependency summaries to check precisely.
//!
//! The resulting set is deliberately approximate, not exact. Correctness
//! relies on the second-wave scheduler (`scheduler.rs`) to converge once
//! real dependency summaries become available.

use std::collections::HashSet;

use crate::detector::Classified;
use crate::graph::DependencyGraph;
use crate::input::Input;

/// Compute the speculative set from the detector's classifications.
///
/// Only inputs classified `ScheduleCascading` contribute; the other
/// classifications already emitted their own distinctive report in the
/// change detector and are not reconsidered here. The final "Queuing
/// (initial)"/"Queuing (dependent)" tagging and reporting happens in the
/// first-wave planner, once this set is merged with the others.
pub fn expand_speculative(classified: &[Classified], graph: &dyn DependencyGraph) -> Vec<Input> {
    let cascading: HashSet<Input> = classified
        .iter()
        .filter(|c| c.classification.triggers_speculative_expansion())
        .map(|c| c.input.clone())
        .collect();

    let mut speculative = HashSet::new();
    let mut ordered = Vec::new();

    for cascading_input in &cascading {
        for dependent in graph.find_dependent_sources(cascading_input) {
            if cascading.contains(&dependent) {
                continue;
            }
            if speculative.insert(dependent.clone()) {
                log::trace!(
                    "speculatively adding {} as a dependent of cascading input {}",
                    dependent,
                    cascading_input
                );
                ordered.push(dependent);
            }
        }
    }

    ordered
}
