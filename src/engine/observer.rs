//! Hooks for watching a search.

use tracing::{debug, trace};

use crate::engine::{Domain, StateOf, TrialOf};
use crate::error::Contradiction;

/// Side channel into a running search, for progress display and diagnostics.
///
/// Every hook defaults to doing nothing. Observers only look; they can never change the outcome of a search.
pub trait Observer<D: Domain> {
    /// A rule set pass changed `state`'s board.
    fn progress(&mut self, state: &StateOf<D>, depth: usize) {
        let _ = (state, depth);
    }

    /// Propagation on `board` stopped with `contradiction`.
    fn contradiction_detected(&mut self, board: &D::Board, contradiction: &Contradiction) {
        let _ = (board, contradiction);
    }

    /// A hypothesis was applied to a duplicate board and propagated.
    fn assumption_evaluated(&mut self, trial: &TrialOf<D>, depth: usize) {
        let _ = (trial, depth);
    }
}

/// An observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<D: Domain> Observer<D> for NoopObserver {}

/// An observer that forwards every hook to [`tracing`] at `trace` level, and contradictions at `debug` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<D: Domain> Observer<D> for TracingObserver {
    fn progress(&mut self, state: &StateOf<D>, depth: usize) {
        trace!(depth, status = %state.status, "progress");
    }

    fn contradiction_detected(&mut self, _board: &D::Board, contradiction: &Contradiction) {
        debug!(reason = contradiction.reason(), "contradiction detected");
    }

    fn assumption_evaluated(&mut self, trial: &TrialOf<D>, depth: usize) {
        trace!(depth, assumption = ?trial.assumption, status = %trial.state.status, "assumption evaluated");
    }
}

/// Forward to the observer behind a mutable reference, so callers can keep ownership of their observer.
impl<D: Domain, O: Observer<D>> Observer<D> for &mut O {
    fn progress(&mut self, state: &StateOf<D>, depth: usize) {
        (**self).progress(state, depth)
    }

    fn contradiction_detected(&mut self, board: &D::Board, contradiction: &Contradiction) {
        (**self).contradiction_detected(board, contradiction)
    }

    fn assumption_evaluated(&mut self, trial: &TrialOf<D>, depth: usize) {
        (**self).assumption_evaluated(trial, depth)
    }
}
