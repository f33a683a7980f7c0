#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::engine::{CompletionStatus, Domain, Engine, Observer, Rule, StateOf, TrialOf};
    use crate::error::{Contradiction, Deduction};

    /// Exactly `count` of `vars` must be true.
    struct Constraint {
        vars: Vec<usize>,
        count: usize,
    }

    #[derive(Clone)]
    struct Assignment {
        values: Vec<Option<bool>>,
        constraints: Rc<Vec<Constraint>>,
    }

    impl Assignment {
        fn new(len: usize, constraints: Vec<(Vec<usize>, usize)>) -> Self {
            Self {
                values: vec![None; len],
                constraints: Rc::new(constraints.into_iter().map(|(vars, count)| Constraint { vars, count }).collect()),
            }
        }

        fn set(&mut self, var: usize, value: bool) -> Deduction {
            match self.values[var] {
                Some(current) if current == value => Ok(false),
                Some(_) => Err(Contradiction::new("variable already set the other way")),
                None => {
                    self.values[var] = Some(value);
                    Ok(true)
                }
            }
        }

        fn satisfied(&self) -> bool {
            self.constraints.iter().all(|c| c.vars.iter().filter(|&&v| self.values[v] == Some(true)).count() == c.count)
        }
    }

    /// Unit propagation over counting constraints.
    struct Counting;

    impl Rule<Assignment> for Counting {
        fn apply(&self, board: &mut Assignment) -> Deduction {
            let mut changed = false;
            for constraint in Rc::clone(&board.constraints).iter() {
                let trues = constraint.vars.iter().filter(|&&v| board.values[v] == Some(true)).count();
                let unknown = constraint.vars.iter().filter(|&&v| board.values[v].is_none()).collect::<Vec<_>>();
                if trues > constraint.count || trues + unknown.len() < constraint.count {
                    return Err(Contradiction::new("count unreachable"));
                }
                let fill = if trues == constraint.count {
                    false
                } else if trues + unknown.len() == constraint.count {
                    true
                } else {
                    continue;
                };
                for &var in unknown {
                    changed |= board.set(var, fill)?;
                }
            }
            Ok(changed)
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct Boolean;

    impl Domain for Boolean {
        type Board = Assignment;
        type Topology = ();
        type Assumption = usize;
        type Fingerprint = Vec<Option<bool>>;

        fn duplicate_board(&self, board: &Assignment) -> Assignment {
            board.clone()
        }

        fn analyze_topology(&self, _board: &Assignment) {}

        fn check_completion(&self, board: &Assignment, _topology: &()) -> Deduction {
            Ok(board.values.iter().all(Option::is_some) && board.satisfied())
        }

        fn make_assumptions(&self, board: &Assignment, _topology: &(), _last: Option<&usize>) -> Vec<usize> {
            (0..board.values.len()).filter(|&v| board.values[v].is_none()).collect()
        }

        fn exclude_assumption(&self, board: &mut Assignment, assumption: &usize) -> Deduction {
            board.set(*assumption, false)
        }

        fn apply_assumption(&self, board: &mut Assignment, assumption: &usize) -> Deduction<()> {
            board.set(*assumption, true).map(|_| ())
        }

        fn invalid_assumption(&self, _trials: &[TrialOf<Self>], state: &StateOf<Self>, assumption: &usize) -> bool {
            state.board.values[*assumption].is_some()
        }

        fn sort_trials(&self, _trials: &mut [TrialOf<Self>]) {}

        fn fingerprint(&self, board: &Assignment) -> Vec<Option<bool>> {
            board.values.clone()
        }

        fn snapshot_dirty_flags(&self, _board: &mut Assignment) {}
    }

    #[derive(Default)]
    struct Counter {
        progress: usize,
        contradictions: usize,
        evaluated: usize,
    }

    impl Observer<Boolean> for Counter {
        fn progress(&mut self, _state: &StateOf<Boolean>, _depth: usize) {
            self.progress += 1;
        }

        fn contradiction_detected(&mut self, _board: &Assignment, _contradiction: &Contradiction) {
            self.contradictions += 1;
        }

        fn assumption_evaluated(&mut self, _trial: &TrialOf<Boolean>, _depth: usize) {
            self.evaluated += 1;
        }
    }

    fn engine() -> Engine<Boolean> {
        let mut engine = Engine::new(Boolean);
        engine.add_cell_rule(Counting);
        engine
    }

    #[test]
    fn propagation_alone_solves_forced_boards() {
        let board = Assignment::new(3, vec![(vec![0], 1), (vec![0, 1], 1), (vec![1, 2], 1)]);
        let mut engine = engine();
        let state = engine.solve(board);

        assert_eq!(state.status, CompletionStatus::Complete);
        assert_eq!(state.board.values, vec![Some(true), Some(false), Some(true)]);
        assert_eq!(engine.stats().trials, 0);
        assert_eq!(engine.remembered(), 0);
    }

    #[test]
    fn excluded_hypothesis_forces_the_solution() {
        // x0 = true is refuted; excluding it makes propagation finish the job
        let board = Assignment::new(3, vec![(vec![0, 1, 2], 1), (vec![1, 2], 1), (vec![0, 2], 1)]);
        let mut engine = engine().with_observer(Counter::default());
        let state = engine.solve(board);

        assert_eq!(state.status, CompletionStatus::Complete);
        assert_eq!(state.board.values, vec![Some(false), Some(false), Some(true)]);
        assert!(engine.stats().exclusions >= 1);
        assert!(engine.remembered() >= 1);
        assert!(engine.observer().contradictions >= 1);
        assert!(engine.observer().evaluated >= 1);
        assert!(engine.observer().progress >= 1);
    }

    #[test]
    fn search_finds_one_of_several_solutions() {
        let board = Assignment::new(4, vec![(vec![0, 1], 1), (vec![1, 2], 1), (vec![2, 3], 1), (vec![3, 0], 1)]);
        let mut engine = engine();
        let state = engine.solve(board);

        assert_eq!(state.status, CompletionStatus::Complete);
        assert!(state.board.satisfied());
    }

    #[test]
    fn unsatisfiable_ends_in_contradiction() {
        // x0 and x1 must both differ from x2 yet differ from each other
        let board = Assignment::new(3, vec![(vec![0, 1], 1), (vec![0, 2], 1), (vec![1, 2], 1)]);
        let mut engine = engine();
        let state = engine.solve(board);

        assert_eq!(state.status, CompletionStatus::Contradiction);
    }

    #[test]
    fn propagation_is_idempotent_once_converged() {
        let board = Assignment::new(4, vec![(vec![0, 1, 2, 3], 2), (vec![0, 1], 1)]);
        let mut engine = engine();
        let mut state = StateOf::<Boolean>::new(board);

        engine.propagate(&mut state, 0);
        assert_eq!(state.status, CompletionStatus::Incomplete);
        let before = state.board.values.clone();

        engine.propagate(&mut state, 0);
        assert_eq!(state.status, CompletionStatus::Incomplete);
        assert_eq!(state.board.values, before);
    }

    #[test]
    fn exclusion_only_narrows() {
        let mut board = Assignment::new(2, vec![]);
        let domain = Boolean;
        assert_eq!(domain.exclude_assumption(&mut board, &0), Ok(true));
        assert_eq!(domain.exclude_assumption(&mut board, &0), Ok(false));
        assert!(domain.apply_assumption(&mut board, &0).is_err());
        assert_eq!(board.values, vec![Some(false), None]);
    }
}
