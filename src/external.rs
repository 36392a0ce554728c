//! External-dependency scanner: walks external deps whose mtime is
//! newer than the last build and marks their dependents for rebuilding.

use std::time::SystemTime;

use crate::diagnostics::{Decision, Diagnostics, Message};
use crate::filesystem::FileSystem;
use crate::graph::DependencyGraph;
use crate::input::Input;

/// Scan the graph's external dependencies and return every input implicated
/// by a newer-than-last-build external dependency.
///
/// Each returned input is reported once via `"Scheduling externally-dependent
/// on newer <basename>"`. Whether a given dependency-summary node has
/// already been traced (and so is skipped here) is tracked by the graph
/// itself — this function never resets
/// that state.
pub fn scan_external_dependencies(
    graph: &dyn DependencyGraph,
    filesystem: &dyn FileSystem,
    build_time: SystemTime,
    diagnostics: &dyn Diagnostics,
) -> Vec<Input> {
    let mut implicated = Vec::new();

    for ext in graph.external_dependencies() {
        let is_newer = match ext.path().and_then(|path| filesystem.get_file_info(path)) {
            // `>=`: a dependency with mtime exactly equal to build_time
            // still schedules its dependents.
            Some(info) => info.mod_time >= build_time,
            // Absent mtime is treated as "infinitely future".
            None => true,
        };

        if !is_newer {
            continue;
        }

        for node in graph.untraced_dependents_of(&ext) {
            let Some(input) = graph.source_for(&node) else {
                // A summary with no owning input is dropped.
                log::trace!("dependency-summary node {:?} has no owning input", node);
                continue;
            };

            diagnostics.emit(Message::Decision {
                decision: Decision::SchedulingExternallyDependentOnNewer(ext.basename()),
                input: Some(input.clone()),
            });
            implicated.push(input);
        }
    }

    implicated
}
