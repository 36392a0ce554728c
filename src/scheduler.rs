//! The incremental compilation scheduler: ties the eligibility gate,
//! first-wave planning, and second-wave discovery
//! together into the object the driver actually holds.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::build_record::BuildRecordLoader;
use crate::detector::classify_inputs;
use crate::diagnostics::{Decision, Diagnostics, GatedDiagnostics, Message};
use crate::external::scan_external_dependencies;
use crate::filesystem::FileSystem;
use crate::graph::{AfterCompile, DependencyGraph};
use crate::input::Input;
use crate::job::Job;
use crate::options::{CompilerMode, IncrementalOptions};
use crate::planner::plan_first_wave;
use crate::queue::JobQueue;
use crate::speculative::expand_speculative;
use crate::status::InputStatus;

pub use crate::error::DeclineReason;

/// The two-wave incremental compilation scheduler.
///
/// Holds a shared reference to the dependency graph and diagnostics sink
/// (it does not own either — the driver does, and outlives it) plus all of
/// the bookkeeping state tracking which inputs are pending, skipped, or
/// done. `Payload` is the driver-defined unit of compile work attached to
/// each `Job` (see `job.rs`).
pub struct Scheduler<Payload> {
    graph: Arc<dyn DependencyGraph + Send + Sync>,
    diagnostics: Arc<dyn Diagnostics + Send + Sync>,

    first_wave: Vec<Input>,

    pending_inputs: HashSet<Input>,
    skipped_inputs: HashSet<Input>,
    skipped_jobs: HashMap<Input, Job<Payload>>,
    post_compile_jobs: Vec<Job<Payload>>,

    queue: JobQueue<Payload>,
    /// Set once `maybe_finished_with_compilations` has appended the
    /// accumulated post-compile jobs and closed the queue. After
    /// this point, `add_post_compile_jobs` appends directly.
    concluded: bool,

    /// Plain reentry guard: `job_finished` must never observe
    /// concurrent entry. A `Mutex` would serialize instead of catching the
    /// bug; this is deliberately a trap, not a queue.
    in_job_finished: AtomicBool,
}

impl<Payload> Scheduler<Payload> {
    /// Attempt to construct a scheduler for this invocation.
    ///
    /// Returns `None` when any eligibility check fails; every such decline
    /// (other than graph construction, which the graph itself reports) is
    /// accompanied by a diagnostic emitted to `diagnostics` before
    /// returning. Recoverable failures never propagate as `Err`.
    ///
    /// `graph` is `None` when dependency-graph construction already failed
    /// upstream: the scheduler then declines silently, since the graph has
    /// already emitted its own remark.
    #[allow(clippy::too_many_arguments)]
    pub fn construct(
        options: IncrementalOptions,
        mode: CompilerMode,
        has_output_file_map: bool,
        build_record_loader: &dyn BuildRecordLoader,
        graph: Option<Arc<dyn DependencyGraph + Send + Sync>>,
        inputs: &[Input],
        filesystem: &dyn FileSystem,
        diagnostics: Arc<dyn Diagnostics + Send + Sync>,
    ) -> Option<Scheduler<Payload>> {
        if !options.incremental {
            diagnostics.emit(Message::Disabled(DeclineReason::NotRequested));
            return None;
        }

        if !mode.supports_incrementality() {
            diagnostics.emit(Message::Disabled(DeclineReason::ModeUnsupported));
            return None;
        }

        if options.embed_bitcode {
            diagnostics.emit(Message::Disabled(DeclineReason::BitcodeEmbedding));
            return None;
        }

        if !has_output_file_map {
            diagnostics.emit(Message::NoOutputFileMap);
            return None;
        }

        let record = match build_record_loader.load() {
            Ok(record) => record,
            Err(reason) => {
                diagnostics.emit(Message::Disabled(DeclineReason::UnreadableBuildRecord(reason)));
                return None;
            }
        };

        let graph = graph?;

        // Decision reports are gated on `-driver-show-incremental`; the
        // declines above aren't decisions and always go to `diagnostics`
        // directly.
        let diagnostics: Arc<dyn Diagnostics + Send + Sync> = Arc::new(GatedDiagnostics::new(
            diagnostics,
            options.should_report_incremental_decisions(),
        ));

        let classified = classify_inputs(inputs, &record, diagnostics.as_ref());
        let externally_dependent = scan_external_dependencies(
            graph.as_ref(),
            filesystem,
            record.build_time,
            diagnostics.as_ref(),
        );
        let speculative = expand_speculative(&classified, graph.as_ref());
        let plan = plan_first_wave(
            &classified,
            &externally_dependent,
            &speculative,
            &record,
            diagnostics.as_ref(),
        );

        let pending_inputs: HashSet<Input> = plan.first_wave.iter().cloned().collect();
        let skipped_inputs: HashSet<Input> = plan.skipped.iter().cloned().collect();

        let mut scheduler = Scheduler {
            graph,
            diagnostics,
            first_wave: plan.first_wave,
            pending_inputs,
            skipped_inputs,
            skipped_jobs: HashMap::new(),
            post_compile_jobs: Vec::new(),
            queue: JobQueue::new(),
            concluded: false,
            in_job_finished: AtomicBool::new(false),
        };

        // Handles the edge case where nothing needs to compile: the queue closes immediately.
        scheduler.maybe_finished_with_compilations();

        Some(scheduler)
    }

    /// The initial compile set, in path-name sort order.
    pub fn first_wave_inputs(&self) -> &[Input] {
        &self.first_wave
    }

    /// A cloneable handle onto the dynamically-discovered job stream; the
    /// driver drains this until it closes.
    pub fn queue(&self) -> JobQueue<Payload> {
        self.queue.clone()
    }

    pub fn is_pending(&self, input: &Input) -> bool {
        self.pending_inputs.contains(input)
    }

    pub fn pending_count(&self) -> usize {
        self.pending_inputs.len()
    }

    /// Register the jobs the driver prepared for currently-skipped inputs,
    /// so the second-wave scheduler can promote them later.
    ///
    /// Each job is expected to have exactly one primary input — the
    /// registry is keyed one job per input. Registering a second job for an already-registered
    /// input is a programming error and aborts the process.
    pub fn add_skipped_compile_jobs(&mut self, jobs: impl IntoIterator<Item = Job<Payload>>) {
        for job in jobs {
            let primary_inputs = job.primary_inputs();
            assert_eq!(
                primary_inputs.len(),
                1,
                "a skipped compile job must have exactly one primary input"
            );
            let input = primary_inputs[0].clone();

            assert!(
                !self.skipped_jobs.contains_key(&input),
                "attempted to register a duplicate skipped job for input {}",
                input
            );

            self.skipped_inputs.insert(input.clone());
            self.skipped_jobs.insert(input, job);
        }
    }

    /// Queue post-compile jobs (linking, module merging, ...). Released
    /// once the pending set has fully drained.
    pub fn add_post_compile_jobs(&mut self, jobs: impl IntoIterator<Item = Job<Payload>>) {
        for job in jobs {
            if self.concluded {
                // The queue is already closed: no more compile work will
                // ever arrive, so this late addition is delivered directly
                // rather than buffered.
                self.queue.append(job);
            } else {
                self.post_compile_jobs.push(job);
            }
        }
    }

    /// Called by the executor when a job completes, successfully or not.
    /// Drives second-wave discovery and, possibly, closes the queue.
    pub fn job_finished(&mut self, job: &Job<Payload>, result: crate::job::JobResult) {
        let already_running = self.in_job_finished.swap(true, Ordering::SeqCst);
        assert!(
            !already_running,
            "job_finished was reentered; the executor must serialize completion callbacks"
        );

        self.job_finished_locked(job, result);

        self.in_job_finished.store(false, Ordering::SeqCst);
    }

    fn job_finished_locked(&mut self, job: &Job<Payload>, _result: crate::job::JobResult) {
        let primary_inputs = job.primary_inputs();

        // Union `find_sources_to_compile_after` over every primary input,
        // falling back to everything currently skipped whenever the graph
        // can't determine precisely.
        let mut discovered: BTreeSet<Input> = BTreeSet::new();
        for input in primary_inputs {
            match self.graph.find_sources_to_compile_after(input) {
                AfterCompile::Precise(found) => discovered.extend(found),
                AfterCompile::CannotDetermine => discovered.extend(self.skipped_inputs.iter().cloned()),
            }
        }

        // Tag the newly-discovered set itself, the way the first-wave
        // planner tags "Queuing (initial)"/"Queuing (dependent)", before
        // attempting to promote each one's skipped job below.
        for input in &discovered {
            self.diagnostics.emit(Message::Decision {
                decision: Decision::QueuingBecauseOfDependenciesDiscoveredLater,
                input: Some(input.clone()),
            });
        }

        // Promote each newly-discovered input's skipped job, in sorted
        // order (`discovered` is a BTreeSet, keyed on `Input`'s path-based
        // `Ord`).
        let mut promoted = Vec::new();
        for input in &discovered {
            match self.skipped_jobs.remove(input) {
                Some(promoted_job) => {
                    for promoted_input in promoted_job.primary_inputs() {
                        self.skipped_inputs.remove(promoted_input);
                    }
                    self.diagnostics.emit(Message::Decision {
                        decision: Decision::SchedulingForSecondWave,
                        input: Some(input.clone()),
                    });
                    self.pending_inputs.insert(input.clone());
                    promoted.push(promoted_job);
                }
                None => {
                    // Not an error: it was already scheduled by an
                    // earlier wave-2 promotion this run.
                    self.diagnostics.emit(Message::Decision {
                        decision: Decision::TriedToScheduleSecondWaveInputAgain,
                        input: Some(input.clone()),
                    });
                }
            }
        }

        if !promoted.is_empty() {
            self.queue.append_all(promoted);
        }

        // The finished job's own primary inputs leave `pending_inputs`
        // exactly once.
        for input in primary_inputs {
            self.pending_inputs.remove(input);
        }

        self.maybe_finished_with_compilations();
    }

    /// Once `pending_inputs` is empty, flush accumulated post-compile
    /// jobs and close the queue. Only ever performs the append once.
    fn maybe_finished_with_compilations(&mut self) {
        if self.concluded || !self.pending_inputs.is_empty() {
            return;
        }

        let post_compile = std::mem::take(&mut self.post_compile_jobs);
        self.queue.append_all(post_compile);
        self.queue.close();
        self.concluded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_record::{BuildRecord, InputInfo, StaticBuildRecordLoader};
    use crate::diagnostics::RecordingDiagnostics;
    use crate::filesystem::{tick, FakeFileSystem};
    use crate::graph::{AfterCompile, DepsNode, ExternalDependency, SimpleDependencyGraph};
    use crate::job::JobResult;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn options() -> IncrementalOptions {
        IncrementalOptions { incremental: true, driver_show_incremental: true, embed_bitcode: false }
    }

    fn build_record(
        entries: Vec<(Input, InputStatus, u64)>,
        current: Vec<(Input, u64)>,
        build_time: u64,
    ) -> BuildRecord {
        let mut infos = HashMap::new();
        for (input, status, mtime) in entries {
            infos.insert(
                input,
                InputInfo { previous_status: status, previous_mod_time: tick(mtime) },
            );
        }
        let mut current_map = HashMap::new();
        for (input, mtime) in current {
            current_map.insert(input, tick(mtime));
        }
        BuildRecord::new(tick(build_time), infos, current_map)
    }

    #[test]
    fn scenario_1_no_changes_closes_immediately() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let record = build_record(
            vec![
                (a.clone(), InputStatus::UpToDate, 90),
                (b.clone(), InputStatus::UpToDate, 80),
            ],
            vec![(a.clone(), 90), (b.clone(), 80)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let scheduler = Scheduler::<()>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a, b],
            &fs,
            diagnostics.clone(),
        )
        .expect("incremental build should be eligible");

        assert!(scheduler.first_wave_inputs().is_empty());
        assert!(!scheduler.queue().is_open());
        assert!(scheduler.queue().next().is_none());
        assert_eq!(
            diagnostics.messages().iter().filter(|m| matches!(m, Message::Decision { decision: Decision::SkippingCurrent, .. })).count(),
            2
        );
    }

    #[test]
    fn decisions_are_suppressed_without_driver_show_incremental() {
        let a = Input::source("a.src");
        let record = build_record(
            vec![(a.clone(), InputStatus::UpToDate, 90)],
            vec![(a.clone(), 90)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut opts = options();
        opts.driver_show_incremental = false;

        Scheduler::<()>::construct(
            opts,
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a],
            &fs,
            diagnostics.clone(),
        )
        .expect("incremental build should be eligible");

        assert!(diagnostics.messages().iter().all(|m| !matches!(m, Message::Decision { .. })));
    }

    #[test]
    fn scenario_2_one_noncascading_change() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let record = build_record(
            vec![
                (a.clone(), InputStatus::NeedsNonCascadingBuild, 0),
                (b.clone(), InputStatus::UpToDate, 80),
            ],
            vec![(a.clone(), 200), (b.clone(), 80)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let scheduler = Scheduler::<()>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a.clone(), b.clone()],
            &fs,
            diagnostics,
        )
        .unwrap();

        assert_eq!(scheduler.first_wave_inputs(), &[a]);
    }

    #[test]
    fn scenario_3_cascading_change_pulls_dependent_and_promotes_its_skipped_job() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let record = build_record(
            vec![(a.clone(), InputStatus::NeedsCascadingBuild, 0)],
            vec![(a.clone(), 0), (b.clone(), 0)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        let mut graph = SimpleDependencyGraph::new();
        graph.add_dependency(b.clone(), a.clone());
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(graph);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut scheduler = Scheduler::<&'static str>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a.clone(), b.clone()],
            &fs,
            diagnostics,
        )
        .unwrap();

        assert_eq!(scheduler.first_wave_inputs(), &[a.clone(), b.clone()]);

        // b is also a first-wave input here (no skipped job to promote in
        // this variant); confirm it starts out pending.
        assert!(scheduler.is_pending(&b));
    }

    #[test]
    fn scenario_4_external_dependency_change() {
        let c = Input::source("c.src");
        let record = build_record(
            vec![(c.clone(), InputStatus::UpToDate, 10)],
            vec![(c.clone(), 10)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        let mut graph = SimpleDependencyGraph::new();
        let ext = ExternalDependency::new("Ext", Some(PathBuf::from("Ext.h")));
        graph.add_external_dependent(ext, DepsNode::new("c.src#deps"), c.clone());
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(graph);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let mut fs = FakeFileSystem::new();
        fs.set_mod_time("Ext.h", tick(150));

        let scheduler = Scheduler::<()>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[c.clone()],
            &fs,
            diagnostics.clone(),
        )
        .unwrap();

        assert_eq!(scheduler.first_wave_inputs(), &[c]);
        assert!(diagnostics
            .messages()
            .iter()
            .any(|m| matches!(m, Message::Decision { decision: Decision::SchedulingExternallyDependentOnNewer(name), .. } if name == "Ext.h")));
    }

    #[test]
    fn scenario_5_second_wave_promotion_drains_and_closes() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let record = build_record(
            vec![(a.clone(), InputStatus::NeedsCascadingBuild, 0)],
            vec![(a.clone(), 0), (b.clone(), 0)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        // No static dependency edge: b is *not* pulled in speculatively, so
        // it starts out skipped with a registered job, and is promoted only
        // once `find_sources_to_compile_after(a)` names it.
        let mut graph = SimpleDependencyGraph::new();
        graph.set_post_compile_result(a.clone(), AfterCompile::Precise(vec![b.clone()]));
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(graph);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut scheduler = Scheduler::<&'static str>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a.clone(), b.clone()],
            &fs,
            diagnostics.clone(),
        )
        .unwrap();

        assert_eq!(scheduler.first_wave_inputs(), &[a.clone()]);

        let b_job = Job::compile(vec![b.clone()], "compile b");
        scheduler.add_skipped_compile_jobs(vec![b_job]);

        let a_job = Job::compile(vec![a.clone()], "compile a");
        scheduler.job_finished(&a_job, JobResult::Success);

        assert!(!scheduler.is_pending(&a));
        assert!(scheduler.is_pending(&b));

        let promoted = scheduler.queue().next().expect("b's job should have been promoted");
        assert_eq!(promoted.into_payload(), "compile b");

        let b_job_handle = Job::compile(vec![b.clone()], "compile b (again)");
        scheduler.job_finished(&b_job_handle, JobResult::Success);

        assert_eq!(scheduler.pending_count(), 0);
        assert!(!scheduler.queue().is_open());
        assert!(diagnostics
            .messages()
            .iter()
            .any(|m| matches!(m, Message::Decision { decision: Decision::SchedulingForSecondWave, .. })));
        assert!(diagnostics.messages().iter().any(|m| matches!(
            m,
            Message::Decision {
                decision: Decision::QueuingBecauseOfDependenciesDiscoveredLater,
                input: Some(input),
            } if input == &b
        )));
    }

    #[test]
    fn scenario_6_graph_pessimism_promotes_everything_skipped() {
        let a = Input::source("a.src");
        let b = Input::source("b.src");
        let c = Input::source("c.src");
        let record = build_record(
            vec![(a.clone(), InputStatus::NeedsCascadingBuild, 0)],
            vec![(a.clone(), 0), (b.clone(), 0), (c.clone(), 0)],
            100,
        );
        let loader = StaticBuildRecordLoader(record);
        let mut graph = SimpleDependencyGraph::new();
        graph.set_post_compile_result(a.clone(), AfterCompile::CannotDetermine);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(graph);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut scheduler = Scheduler::<&'static str>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a.clone(), b.clone(), c.clone()],
            &fs,
            diagnostics,
        )
        .unwrap();

        scheduler.add_skipped_compile_jobs(vec![
            Job::compile(vec![b.clone()], "compile b"),
            Job::compile(vec![c.clone()], "compile c"),
        ]);

        scheduler.job_finished(&Job::compile(vec![a.clone()], "compile a"), JobResult::Success);

        assert!(scheduler.is_pending(&b));
        assert!(scheduler.is_pending(&c));

        let mut promoted = Vec::new();
        while let Some(job) = scheduler.queue().try_next() {
            promoted.push(job.into_payload());
        }
        promoted.sort();
        assert_eq!(promoted, vec!["compile b", "compile c"]);

        scheduler.job_finished(&Job::compile(vec![b.clone()], "compile b"), JobResult::Success);
        assert!(scheduler.queue().is_open(), "c is still pending; the queue must stay open");
        scheduler.job_finished(&Job::compile(vec![c.clone()], "compile c"), JobResult::Success);

        assert_eq!(scheduler.pending_count(), 0);
        assert!(!scheduler.queue().is_open());
    }

    #[test]
    #[should_panic(expected = "reentered")]
    fn reentrant_job_finished_aborts() {
        let a = Input::source("a.src");
        let record = build_record(vec![], vec![(a.clone(), 0)], 100);
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut scheduler = Scheduler::<()>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[a.clone()],
            &fs,
            diagnostics,
        )
        .unwrap();

        // Simulate reentrancy directly against the guard, since safe Rust
        // can't otherwise invoke `job_finished` concurrently on `&mut self`.
        scheduler.in_job_finished.store(true, Ordering::SeqCst);
        scheduler.job_finished(&Job::compile(vec![a], ()), JobResult::Success);
    }

    #[test]
    #[should_panic(expected = "duplicate skipped job")]
    fn duplicate_skipped_job_registration_aborts() {
        let a = Input::source("a.src");
        let record = build_record(vec![], vec![], 100);
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut scheduler = Scheduler::<&'static str>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[],
            &fs,
            diagnostics,
        )
        .unwrap();

        scheduler.add_skipped_compile_jobs(vec![Job::compile(vec![a.clone()], "first")]);
        scheduler.add_skipped_compile_jobs(vec![Job::compile(vec![a], "second")]);
    }

    #[test]
    fn declines_when_incremental_not_requested() {
        let record = build_record(vec![], vec![], 0);
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let mut opts = options();
        opts.incremental = false;

        let scheduler = Scheduler::<()>::construct(
            opts,
            CompilerMode::StandardCompile,
            true,
            &loader,
            Some(graph),
            &[],
            &fs,
            diagnostics.clone(),
        );

        assert!(scheduler.is_none());
        assert!(diagnostics
            .messages()
            .iter()
            .any(|m| matches!(m, Message::Disabled(DeclineReason::NotRequested))));
    }

    #[test]
    fn declines_without_output_file_map() {
        let record = build_record(vec![], vec![], 0);
        let loader = StaticBuildRecordLoader(record);
        let graph: Arc<dyn DependencyGraph + Send + Sync> = Arc::new(SimpleDependencyGraph::new());
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let scheduler = Scheduler::<()>::construct(
            options(),
            CompilerMode::StandardCompile,
            false,
            &loader,
            Some(graph),
            &[],
            &fs,
            diagnostics.clone(),
        );

        assert!(scheduler.is_none());
        assert!(diagnostics.messages().iter().any(|m| matches!(m, Message::NoOutputFileMap)));
    }

    #[test]
    fn declines_silently_when_graph_construction_failed() {
        let record = build_record(vec![], vec![], 0);
        let loader = StaticBuildRecordLoader(record);
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let fs = FakeFileSystem::new();

        let scheduler = Scheduler::<()>::construct(
            options(),
            CompilerMode::StandardCompile,
            true,
            &loader,
            None,
            &[],
            &fs,
            diagnostics.clone(),
        );

        assert!(scheduler.is_none());
        assert!(diagnostics.messages().is_empty());
    }
}
