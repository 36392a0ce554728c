//! Driver-level options and compiler mode, as consumed (not parsed) by the
//! scheduler. Option parsing proper is out of scope.

/// The compiler's overall mode of operation. Only a subset is eligible for
/// incremental compilation; the rest disable incrementality outright
/// and are out of scope here beyond that eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerMode {
    StandardCompile,
    Immediate,
    Repl,
    BatchCompile,
    WholeModule,
    PrecompiledModule,
}

impl CompilerMode {
    /// Whether this mode supports incremental compilation at all.
    pub fn supports_incrementality(self) -> bool {
        matches!(
            self,
            CompilerMode::StandardCompile
                | CompilerMode::Immediate
                | CompilerMode::Repl
                | CompilerMode::BatchCompile
        )
    }
}

/// The subset of driver options the scheduler reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalOptions {
    /// `-incremental`
    pub incremental: bool,
    /// `-driver-show-incremental`
    pub driver_show_incremental: bool,
    /// `-embed-bitcode`
    pub embed_bitcode: bool,
}

impl IncrementalOptions {
    pub fn new() -> IncrementalOptions {
        IncrementalOptions::default()
    }

    /// Whether decisions should additionally be forwarded to
    /// `reportIncrementalDecision`: enabled by `-driver-show-incremental`
    /// or any show-job-lifecycle flag. This component only models the
    /// former; a driver-level lifecycle flag, if any, is ORed in by the
    /// caller before constructing the scheduler.
    pub fn should_report_incremental_decisions(&self) -> bool {
        self.driver_show_incremental
    }
}
