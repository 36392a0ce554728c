//! The module dependency graph: an external oracle the scheduler consumes
//! but neither owns nor constructs.
//!
//! The real graph's construction and traversal algorithms are out of scope;
//! this module defines the narrow capability interface the scheduler
//! depends on (`DependencyGraph`), plus `SimpleDependencyGraph`, a fixture
//! implementation for tests and for driving the scheduler end to end. It's
//! a pair of BTreeMap-backed edge/reverse-edge maps, widened from plain
//! node dependencies to carry external-dependency tracking and the
//! per-input traced bits the scanner relies on.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::input::Input;

/// An opaque handle to an external dependency (a header, interface file, or
/// other file outside the module). Only its optional filesystem path is
/// ever inspected by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalDependency {
    id: String,
    path: Option<PathBuf>,
}

impl ExternalDependency {
    pub fn new(id: impl Into<String>, path: Option<PathBuf>) -> ExternalDependency {
        ExternalDependency { id: id.into(), path }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Display name used in the `"Scheduling externally-dependent on newer
    /// <name>"` report: the file's basename if it has a path, else
    /// its opaque id.
    pub fn basename(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.id.clone())
    }
}

/// An opaque handle to a per-input dependency-summary node. Meaningful only
/// via `DependencyGraph::source_for`, which maps it back to the `Input`
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DepsNode(String);

impl DepsNode {
    pub fn new(id: impl Into<String>) -> DepsNode {
        DepsNode(id.into())
    }
}

/// The result of asking the graph what to compile after a given input just
/// finished compiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfterCompile {
    /// The graph can say precisely what else is now known to need compiling.
    Precise(Vec<Input>),
    /// The graph cannot determine this precisely; the caller must fall back
    /// to treating everything currently skipped as potentially required.
    CannotDetermine,
}

/// The narrow capability set the scheduler requires of a dependency graph.
/// Implementations may be backed by anything; the scheduler only ever
/// calls through this trait.
pub trait DependencyGraph {
    /// All external dependencies known to the graph.
    fn external_dependencies(&self) -> Vec<ExternalDependency>;

    /// Every dependency-summary node directly dependent on `ext` that has
    /// not yet been traced during this process's lifetime, marking each one
    /// traced as a side effect so a later scan (even from a different
    /// scheduler instance) does not revisit it.
    fn untraced_dependents_of(&self, ext: &ExternalDependency) -> Vec<DepsNode>;

    /// Inputs transitively reachable as dependents of `input`.
    fn find_dependent_sources(&self, input: &Input) -> Vec<Input>;

    /// What else is now known to need compiling, now that `input` has just
    /// finished compiling and its fresh dependency summary is available.
    fn find_sources_to_compile_after(&self, input: &Input) -> AfterCompile;

    /// Reverse lookup from a dependency-summary node to its owning input.
    fn source_for(&self, node: &DepsNode) -> Option<Input>;
}

/// A simple, in-memory `DependencyGraph` fixture.
///
/// A pair of BTreeMap-backed edge maps (forward and reverse) over `Input`
/// nodes, plus a side table of external-dependency dependents.
#[derive(Debug, Default)]
pub struct SimpleDependencyGraph {
    /// input -> the set of inputs that depend on it (dependents).
    dependents: HashMap<Input, BTreeSet<Input>>,

    /// external dependency -> the deps-summary nodes directly depending on it.
    external_dependents: HashMap<ExternalDependency, BTreeSet<DepsNode>>,

    /// reverse lookup: deps-summary node -> owning input.
    node_to_input: HashMap<DepsNode, Input>,

    /// canned answers for `find_sources_to_compile_after`, keyed by the
    /// input that just finished compiling. Defaults to `Precise(vec![])`
    /// for an input with no entry.
    post_compile: HashMap<Input, AfterCompile>,

    /// the set of deps-summary nodes already visited by a prior
    /// `untraced_dependents_of` call, across the lifetime of this graph.
    traced: Mutex<HashSet<DepsNode>>,
}

impl SimpleDependencyGraph {
    pub fn new() -> SimpleDependencyGraph {
        SimpleDependencyGraph::default()
    }

    /// Register that `dependent` depends on `dependency` (so `dependency`'s
    /// dependents include `dependent`).
    pub fn add_dependency(&mut self, dependent: Input, dependency: Input) {
        self.dependents.entry(dependency).or_default().insert(dependent);
    }

    /// Register `node` as the deps-summary node belonging to `input`, and
    /// as a dependent of `ext`.
    pub fn add_external_dependent(
        &mut self,
        ext: ExternalDependency,
        node: DepsNode,
        input: Input,
    ) {
        self.external_dependents.entry(ext).or_default().insert(node.clone());
        self.node_to_input.insert(node, input);
    }

    /// Register the canned answer for `find_sources_to_compile_after(input)`.
    pub fn set_post_compile_result(&mut self, input: Input, result: AfterCompile) {
        self.post_compile.insert(input, result);
    }
}

impl DependencyGraph for SimpleDependencyGraph {
    fn external_dependencies(&self) -> Vec<ExternalDependency> {
        self.external_dependents.keys().cloned().collect()
    }

    fn untraced_dependents_of(&self, ext: &ExternalDependency) -> Vec<DepsNode> {
        let Some(nodes) = self.external_dependents.get(ext) else { return Vec::new() };
        let mut traced = self.traced.lock().unwrap();
        let mut untraced = Vec::new();
        for node in nodes {
            if traced.insert(node.clone()) {
                untraced.push(node.clone());
            }
        }
        untraced
    }

    fn find_dependent_sources(&self, input: &Input) -> Vec<Input> {
        // Transitive closure via breadth-first traversal of `dependents`.
        let mut seen = HashSet::new();
        let mut queue: std::collections::VecDeque<Input> = std::collections::VecDeque::new();
        queue.push_back(input.clone());
        let mut result = Vec::new();

        while let Some(current) = queue.pop_front() {
            if let Some(direct) = self.dependents.get(&current) {
                for dependent in direct {
                    if seen.insert(dependent.clone()) {
                        result.push(dependent.clone());
                        queue.push_back(dependent.clone());
                    }
                }
            }
        }

        result
    }

    fn find_sources_to_compile_after(&self, input: &Input) -> AfterCompile {
        self.post_compile
            .get(input)
            .cloned()
            .unwrap_or(AfterCompile::Precise(Vec::new()))
    }

    fn source_for(&self, node: &DepsNode) -> Option<Input> {
        self.node_to_input.get(node).cloned()
    }
}
