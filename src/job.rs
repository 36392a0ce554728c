//! Jobs scheduled by the incremental compilation scheduler.
//!
//! What a job actually *does* (invoking the compiler, linking, ...) is out
//! of scope — the scheduler only needs to know a job's primary inputs, so
//! it can track pending and skipped inputs and key the skipped-job
//! registry. `Payload` is whatever opaque unit of work the driver wants
//! delivered to its executor.

use std::fmt;

use crate::input::Input;

/// A unit of work the scheduler hands to the executor.
#[derive(Clone)]
pub enum Job<Payload> {
    /// Compile one or more primary inputs. Most jobs have exactly one
    /// primary input; a whole-module batch job may have several.
    Compile { primary_inputs: Vec<Input>, payload: Payload },
    /// Runs after every compile job has completed (linking, module
    /// merging, ...). Never appears in the pending-inputs set.
    PostCompile { payload: Payload },
}

impl<Payload> Job<Payload> {
    pub fn compile(primary_inputs: Vec<Input>, payload: Payload) -> Job<Payload> {
        Job::Compile { primary_inputs, payload }
    }

    pub fn post_compile(payload: Payload) -> Job<Payload> {
        Job::PostCompile { payload }
    }

    /// The inputs this job is primarily responsible for compiling. Empty
    /// for post-compile jobs, which never participate in the pending set.
    pub fn primary_inputs(&self) -> &[Input] {
        match self {
            Job::Compile { primary_inputs, .. } => primary_inputs,
            Job::PostCompile { .. } => &[],
        }
    }

    pub fn payload(&self) -> &Payload {
        match self {
            Job::Compile { payload, .. } => payload,
            Job::PostCompile { payload } => payload,
        }
    }

    pub fn into_payload(self) -> Payload {
        match self {
            Job::Compile { payload, .. } => payload,
            Job::PostCompile { payload } => payload,
        }
    }
}

impl<Payload> fmt::Debug for Job<Payload> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::Compile { primary_inputs, .. } => {
                write!(f, "Job::Compile({:?})", primary_inputs)
            }
            Job::PostCompile { .. } => write!(f, "Job::PostCompile"),
        }
    }
}

/// The result of executing a job, as reported back via `job_finished`.
///
/// A cancelled job is treated identically to a successful one for
/// state-machine purposes: its inputs still leave the pending set. Only
/// the driver decides whether a non-success result should abort the overall
/// build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobResult {
    Success,
    Failure,
    Cancelled,
}

impl JobResult {
    pub fn is_success(self) -> bool {
        matches!(self, JobResult::Success)
    }
}
