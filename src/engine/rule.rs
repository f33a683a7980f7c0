//! Rule traits and the drivers applying a rule set once.

use crate::error::Deduction;

/// A deduction over the whole board.
///
/// Returns whether the board changed; a rule must report `false` when it has nothing left to deduce, otherwise the
/// driver never converges.
pub trait Rule<B> {
    /// Deduce what the rule can on `board`, reporting whether anything changed.
    fn apply(&self, board: &mut B) -> Deduction;

    /// Short human readable name, used in diagnostics.
    fn name(&self) -> &'static str;
}

/// A deduction that additionally consults the topology recomputed after the local fixpoint.
pub trait TopologicalRule<B, P> {
    /// Like [`Rule::apply`], with the `topology` recomputed from `board`.
    fn apply(&self, board: &mut B, topology: &P) -> Deduction;

    /// Short human readable name, used in diagnostics.
    fn name(&self) -> &'static str;
}

/// Apply every rule in order, without short circuiting, and report whether any of them changed the board.
pub(crate) fn apply_all<B>(rules: &[Box<dyn Rule<B>>], board: &mut B) -> Deduction {
    rules.iter().try_fold(false, |changed, rule| Ok(rule.apply(board)? || changed))
}

pub(crate) fn apply_all_topological<B, P>(rules: &[Box<dyn TopologicalRule<B, P>>], board: &mut B, topology: &P) -> Deduction {
    rules.iter().try_fold(false, |changed, rule| Ok(rule.apply(board, topology)? || changed))
}
