//! The domain-agnostic deduction and backtracking engine.
//!
//! A puzzle plugs in by implementing [`Domain`] and registering its rules on an [`Engine`].
//! [`Engine::solve`] then alternates two phases:
//!
//! 1. *Propagation* ([`Engine::propagate`]): local rules run to a fixpoint, the board's topology is recomputed and
//!    global rules get a look at it, until neither changes anything.
//! 2. *Search*: if propagation stalls, hypotheses are tried on duplicates of the board. A hypothesis leading to a
//!    contradiction is excluded on the parent, which is then propagated again; surviving hypotheses are ranked and
//!    explored depth first.

use std::fmt::Debug;
use std::hash::Hash;

use strum::Display;
use tracing::{debug, info, trace};

pub use config::EngineConfig;
pub use fingerprint::FingerprintCache;
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use rule::{Rule, TopologicalRule};

use crate::error::{Contradiction, Deduction};
use rule::{apply_all, apply_all_topological};

mod config;
pub(crate) mod fingerprint;
mod observer;
mod rule;
mod tests;

/// Where a board stands after propagation.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum CompletionStatus {
    /// Undetermined, more deduction or search is needed.
    Incomplete,
    /// Solved.
    Complete,
    /// Admits no solution.
    Contradiction,
}

/// A board together with the topology last computed from it and its status.
#[derive(Clone, Debug)]
pub struct BoardState<B, P> {
    /// The puzzle state itself.
    pub board: B,
    /// Structure derived from `board` by the last propagation; empty before the first.
    pub topology: P,
    /// Where `board` stood after the last propagation.
    pub status: CompletionStatus,
}

impl<B, P: Default> BoardState<B, P> {
    /// An unpropagated state holding `board`.
    pub fn new(board: B) -> Self {
        Self {
            board,
            topology: P::default(),
            status: CompletionStatus::Incomplete,
        }
    }
}

/// The state reached by applying `assumption` to a duplicate of some parent board and propagating it.
#[derive(Clone, Debug)]
pub struct Trial<B, P, A> {
    /// The duplicate board after propagation.
    pub state: BoardState<B, P>,
    /// The hypothesis that was applied.
    pub assumption: A,
}

/// The [`BoardState`] of a [`Domain`].
pub type StateOf<D> = BoardState<<D as Domain>::Board, <D as Domain>::Topology>;
/// The [`Trial`] of a [`Domain`].
pub type TrialOf<D> = Trial<<D as Domain>::Board, <D as Domain>::Topology, <D as Domain>::Assumption>;

/// Everything the engine needs to know about a puzzle.
///
/// The engine never looks inside boards, topologies or assumptions; it only passes them back to these operations.
pub trait Domain {
    /// Mutable puzzle state.
    type Board;
    /// Global structure derived from a board, recomputed every time local propagation converges.
    type Topology: Default;
    /// A hypothesis that can be applied to, or excluded from, a board.
    type Assumption: Debug;
    /// An exact, compact encoding of a board. Boards that could lead to different outcomes must never share one.
    type Fingerprint: Hash + Eq + Clone;

    /// An independent copy of `board`.
    fn duplicate_board(&self, board: &Self::Board) -> Self::Board;

    /// Extract the global structure of `board`.
    fn analyze_topology(&self, board: &Self::Board) -> Self::Topology;

    /// Whether `board` is solved. Raises a contradiction if it provably cannot be.
    fn check_completion(&self, board: &Self::Board, topology: &Self::Topology) -> Deduction;

    /// Candidate hypotheses for a stalled board, in the order they should be tried.
    ///
    /// `last` is a hint naming the hypothesis that produced `board`; the engine currently always passes `None`.
    fn make_assumptions(&self, board: &Self::Board, topology: &Self::Topology, last: Option<&Self::Assumption>) -> Vec<Self::Assumption>;

    /// Record on `board` that `assumption` is false. Returns whether the board changed.
    fn exclude_assumption(&self, board: &mut Self::Board, assumption: &Self::Assumption) -> Deduction;

    /// Make `assumption` true on `board`.
    fn apply_assumption(&self, board: &mut Self::Board, assumption: &Self::Assumption) -> Deduction<()>;

    /// Whether trying `assumption` on `state` is pointless given the `trials` already collected.
    fn invalid_assumption(&self, trials: &[TrialOf<Self>], state: &StateOf<Self>, assumption: &Self::Assumption) -> bool;

    /// Order `trials` so the most promising come first. This is a pure heuristic.
    fn sort_trials(&self, trials: &mut [TrialOf<Self>]);

    /// The [`Self::Fingerprint`] of `board`.
    fn fingerprint(&self, board: &Self::Board) -> Self::Fingerprint;

    /// Start a new change-tracking generation on `board`, for rules that only revisit what changed.
    fn snapshot_dirty_flags(&self, board: &mut Self::Board);
}

/// Counters describing the work done by the last [`Engine::solve`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Runs of the propagation driver.
    pub propagations: usize,
    /// Hypotheses applied to a duplicate board.
    pub trials: usize,
    /// Failed hypotheses recorded on a parent board.
    pub exclusions: usize,
    /// Deepest search level entered.
    pub deepest: usize,
}

/// The solver proper, generic over the puzzle [`Domain`] and an [`Observer`].
pub struct Engine<D: Domain, O = NoopObserver> {
    domain: D,
    observer: O,
    initial_rules: Vec<Box<dyn Rule<D::Board>>>,
    cell_rules: Vec<Box<dyn Rule<D::Board>>>,
    topological_rules: Vec<Box<dyn TopologicalRule<D::Board, D::Topology>>>,
    cache: FingerprintCache<D::Fingerprint>,
    stats: SearchStats,
}

impl<D: Domain> Engine<D> {
    /// An engine for `domain` with no rules, the default configuration and no observer.
    pub fn new(domain: D) -> Self {
        Self::with_config(domain, EngineConfig::default())
    }

    /// Like [`Self::new`], configured by `config`.
    pub fn with_config(domain: D, config: EngineConfig) -> Self {
        Self {
            domain,
            observer: NoopObserver,
            initial_rules: Vec::new(),
            cell_rules: Vec::new(),
            topological_rules: Vec::new(),
            cache: FingerprintCache::with_capacity(config.get_fingerprint_capacity()),
            stats: SearchStats::default(),
        }
    }
}

impl<D: Domain, O: Observer<D>> Engine<D, O> {
    /// Replace the observer, keeping the domain, rules and configuration.
    pub fn with_observer<O2: Observer<D>>(self, observer: O2) -> Engine<D, O2> {
        Engine {
            domain: self.domain,
            observer,
            initial_rules: self.initial_rules,
            cell_rules: self.cell_rules,
            topological_rules: self.topological_rules,
            cache: self.cache,
            stats: self.stats,
        }
    }

    /// Register a rule applied to a fixpoint once, on the root board only.
    pub fn add_initial_rule(&mut self, rule: impl Rule<D::Board> + 'static) -> &mut Self {
        self.initial_rules.push(Box::new(rule));
        self
    }

    /// Register a local rule. Cell rules run in registration order, repeatedly, until none changes the board.
    pub fn add_cell_rule(&mut self, rule: impl Rule<D::Board> + 'static) -> &mut Self {
        self.cell_rules.push(Box::new(rule));
        self
    }

    /// Register a global rule, consulted once per convergence cycle with a freshly computed topology.
    pub fn add_topological_rule(&mut self, rule: impl TopologicalRule<D::Board, D::Topology> + 'static) -> &mut Self {
        self.topological_rules.push(Box::new(rule));
        self
    }

    /// The puzzle this engine solves.
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// The observer receiving search events.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Work done by the last [`Self::solve`].
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Number of board fingerprints the search currently remembers.
    pub fn remembered(&self) -> usize {
        self.cache.len()
    }

    /// Solve `board`, returning the final state.
    ///
    /// The status is [`Complete`](CompletionStatus::Complete) if a solution was found and
    /// [`Contradiction`](CompletionStatus::Contradiction) if every hypothesis failed. Search only starts when
    /// propagation alone stalls.
    pub fn solve(&mut self, board: D::Board) -> StateOf<D> {
        self.cache.clear();
        self.stats = SearchStats::default();

        let mut state = BoardState::new(board);
        info!("solve started");
        self.propagate(&mut state, 0);
        if state.status == CompletionStatus::Incomplete {
            // depth 0 belongs to the root's first propagation, which alone runs the initial rules
            self.descend(&mut state, 1);
        }

        info!(
            status = %state.status,
            propagations = self.stats.propagations,
            trials = self.stats.trials,
            exclusions = self.stats.exclusions,
            deepest = self.stats.deepest,
            "solve finished"
        );
        state
    }

    /// Run every rule to convergence on `state`, then classify it.
    ///
    /// Initial rules only run when `depth` is zero. A contradiction anywhere stops propagation immediately and is
    /// reported through the status, never as an error.
    pub fn propagate(&mut self, state: &mut StateOf<D>, depth: usize) {
        self.stats.propagations += 1;
        state.status = match self.converge(state, depth) {
            Ok(true) => CompletionStatus::Complete,
            Ok(false) => CompletionStatus::Incomplete,
            Err(contradiction) => {
                trace!(depth, reason = contradiction.reason(), "propagation stopped");
                self.observer.contradiction_detected(&state.board, &contradiction);
                CompletionStatus::Contradiction
            }
        };
    }

    fn converge(&mut self, state: &mut StateOf<D>, depth: usize) -> Deduction {
        if depth == 0 {
            while apply_all(&self.initial_rules, &mut state.board)? {
                self.observer.progress(state, depth);
            }
        }

        loop {
            self.domain.snapshot_dirty_flags(&mut state.board);
            while apply_all(&self.cell_rules, &mut state.board)? {
                self.observer.progress(state, depth);
                self.domain.snapshot_dirty_flags(&mut state.board);
            }

            state.topology = self.domain.analyze_topology(&state.board);
            if !apply_all_topological(&self.topological_rules, &mut state.board, &state.topology)? {
                break;
            }
            self.observer.progress(state, depth);
        }

        self.domain.check_completion(&state.board, &state.topology)
    }

    /// Search below an incomplete `state` until it is either complete or a contradiction.
    fn descend(&mut self, state: &mut StateOf<D>, depth: usize) {
        self.stats.deepest = self.stats.deepest.max(depth);

        let mut trials = self.enumerate_trials(state, depth);
        if state.status != CompletionStatus::Incomplete {
            return;
        }

        self.domain.sort_trials(&mut trials);
        debug!(depth, trials = trials.len(), "descending");

        for mut trial in trials {
            // the board may have been reached through another branch since it was enumerated
            let fingerprint = self.domain.fingerprint(&trial.state.board);
            if self.cache.seen(fingerprint) {
                continue;
            }

            self.descend(&mut trial.state, depth + 1);
            self.settle(state, trial, depth);
            if state.status != CompletionStatus::Incomplete {
                return;
            }
        }

        state.status = CompletionStatus::Contradiction;
    }

    /// Try every candidate hypothesis on `state` once, excluding those that fail outright.
    ///
    /// Starts over whenever an exclusion changed the parent, since earlier candidates were evaluated against a weaker
    /// board. Returns the trials left undetermined, or nothing if `state` itself got decided along the way.
    fn enumerate_trials(&mut self, state: &mut StateOf<D>, depth: usize) -> Vec<TrialOf<D>> {
        loop {
            let mut trials: Vec<TrialOf<D>> = Vec::new();
            let mut parent_changed = false;

            for assumption in self.domain.make_assumptions(&state.board, &state.topology, None) {
                if self.domain.invalid_assumption(&trials, state, &assumption) {
                    continue;
                }

                let mut board = self.domain.duplicate_board(&state.board);
                let applied = self.domain.apply_assumption(&mut board, &assumption);
                let mut trial = Trial { state: BoardState::new(board), assumption };
                match applied {
                    Ok(()) => {
                        let fingerprint = self.domain.fingerprint(&trial.state.board);
                        if self.cache.seen(fingerprint) {
                            continue;
                        }
                        self.propagate(&mut trial.state, depth + 1);
                    }
                    Err(contradiction) => {
                        self.observer.contradiction_detected(&trial.state.board, &contradiction);
                        trial.state.status = CompletionStatus::Contradiction;
                    }
                }

                self.stats.trials += 1;
                self.observer.assumption_evaluated(&trial, depth + 1);

                if trial.state.status == CompletionStatus::Incomplete {
                    trials.push(trial);
                } else {
                    parent_changed |= self.settle(state, trial, depth);
                    if state.status != CompletionStatus::Incomplete {
                        return Vec::new();
                    }
                }
            }

            if !parent_changed {
                return trials;
            }
            trace!(depth, "parent changed by exclusions, enumerating again");
        }
    }

    /// Fold a decided trial back into its parent. Returns whether the parent board changed.
    fn settle(&mut self, state: &mut StateOf<D>, trial: TrialOf<D>, depth: usize) -> bool {
        match trial.state.status {
            CompletionStatus::Complete => {
                *state = trial.state;
                true
            }
            CompletionStatus::Contradiction => {
                self.stats.exclusions += 1;
                match self.domain.exclude_assumption(&mut state.board, &trial.assumption) {
                    Ok(false) => false,
                    Ok(true) => {
                        self.propagate(state, depth);
                        true
                    }
                    Err(contradiction) => {
                        self.report_contradiction(&state.board, contradiction);
                        state.status = CompletionStatus::Contradiction;
                        true
                    }
                }
            }
            CompletionStatus::Incomplete => false,
        }
    }

    fn report_contradiction(&mut self, board: &D::Board, contradiction: Contradiction) {
        trace!(reason = contradiction.reason(), "exclusion contradicted the parent");
        self.observer.contradiction_detected(board, &contradiction);
    }
}
