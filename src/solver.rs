//! Slither Link as an engine [`Domain`](crate::engine::Domain).

use itertools::Itertools;
use petgraph::graphmap::UnGraphMap;

use crate::board::{Board, Fingerprint};
use crate::cell::CellKind;
use crate::engine::{BoardState, Domain, Engine, EngineConfig, NoopObserver, Observer, SearchStats, StateOf, TrialOf};
use crate::error::{Contradiction, Deduction};
use crate::location::{Location, Offset};
use crate::rules::{
    AvoidLoopRule, BasicNumberRule, CellRuleRunner, DotRule, IncomingCornerRule, NumberCornerRule, SegmentParityRule,
    ThreePairRule,
};
use crate::shape::{adjacent4, Direction};
use crate::topology::TrackTopology;

/// The outcome of solving a Slither Link board.
pub type SlitherState = BoardState<Board, TrackTopology>;

/// The drawn lines of `board` as a graph over dots, with dots added in row-major order.
fn line_graph(board: &Board) -> UnGraphMap<Location, ()> {
    let mut graph = UnGraphMap::new();
    for dot in board.locations_of(CellKind::Dot) {
        if board.surrounding(dot).exists > 0 {
            graph.add_node(dot);
        }
    }

    for dot in board.locations_of(CellKind::Dot) {
        for direction in [Direction::East, Direction::South] {
            let line = direction.attempt_from(dot);
            if board.contains(line) && board.line(line).exists() {
                graph.add_edge(dot, direction.attempt_from(line), ());
            }
        }
    }

    graph
}

pub(crate) fn tracks_of(board: &Board) -> TrackTopology {
    TrackTopology::from_graph(&line_graph(board))
}

/// Slither Link as seen by the [`Engine`]: hypotheses are single lines to draw.
#[derive(Clone, Copy, Debug, Default)]
pub struct SlitherDomain;

impl SlitherDomain {
    fn check_numbers(board: &Board) -> Deduction {
        let mut complete = true;
        for location in board.locations_of(CellKind::Number) {
            let Some(clue) = board.clue(location) else {
                continue;
            };
            let around = board.surrounding(location);
            if around.exists > clue || around.forbidden > 4 - clue {
                return Err(Contradiction::new("lines around a clue do not match it"));
            }
            complete &= around.exists == clue;
        }
        Ok(complete)
    }

    fn check_dots(board: &Board) -> Deduction {
        let mut complete = true;
        for location in board.locations_of(CellKind::Dot) {
            let around = board.surrounding(location);
            if around.exists > 2 || (around.exists == 1 && around.forbidden == 3) {
                return Err(Contradiction::new("a line stops or branches at a dot"));
            }
            complete &= around.exists != 1;
        }
        Ok(complete)
    }

    /// Whether a line at `location` would extend some track, i.e. touches a dot with exactly one line.
    fn extends_a_track(board: &Board, location: Location) -> bool {
        let step = match CellKind::at(location) {
            CellKind::HLine => Offset(1, 0),
            CellKind::VLine => Offset(0, 1),
            _ => return false,
        };
        [location - step, location + step].into_iter()
            .any(|dot| board.contains(dot) && board.surrounding(dot).exists == 1)
    }
}

impl Domain for SlitherDomain {
    type Board = Board;
    type Topology = TrackTopology;
    type Assumption = Location;
    type Fingerprint = Fingerprint;

    fn duplicate_board(&self, board: &Board) -> Board {
        board.clone()
    }

    fn analyze_topology(&self, board: &Board) -> TrackTopology {
        tracks_of(board)
    }

    fn check_completion(&self, board: &Board, topology: &TrackTopology) -> Deduction {
        let numbers = Self::check_numbers(board)?;
        let dots = Self::check_dots(board)?;

        let tracks = topology.tracks();
        if tracks.len() >= 2 && tracks.iter().any(|track| track.closed()) {
            return Err(Contradiction::new("a loop closed while other tracks remain"));
        }

        Ok(numbers && dots && matches!(tracks, [only] if only.closed()))
    }

    /// Extend the tracks by one line at either end. With nothing drawn yet, every undecided line is a candidate.
    fn make_assumptions(&self, board: &Board, topology: &TrackTopology, _last: Option<&Location>) -> Vec<Location> {
        if topology.tracks().is_empty() {
            let (width, height) = board.physical_dims();
            return (1..height - 1)
                .flat_map(|y| (1 + y % 2..width - 1).step_by(2).map(move |x| Location(x, y)))
                .filter(|&line| !board.line(line).fixed())
                .collect_vec();
        }

        topology.tracks().iter()
            .flat_map(|track| [track.ends.0, track.ends.1])
            .flat_map(adjacent4)
            .filter(|&line| !board.line(line).fixed())
            .unique()
            .collect_vec()
    }

    fn exclude_assumption(&self, board: &mut Board, assumption: &Location) -> Deduction {
        board.set_forbidden(*assumption)
    }

    fn apply_assumption(&self, board: &mut Board, assumption: &Location) -> Deduction<()> {
        board.set_exists(*assumption)?;
        board.mark_assumed(*assumption);
        Ok(())
    }

    fn invalid_assumption(&self, trials: &[TrialOf<Self>], state: &StateOf<Self>, assumption: &Location) -> bool {
        let board = &state.board;
        if state.topology.total_legs() > 0 && !Self::extends_a_track(board, *assumption) {
            return true;
        }

        board.line(*assumption).fixed() || trials.iter().any(|trial| trial.state.board.line(*assumption).exists())
    }

    /// Prefer trials that drew the most lines, then those with the most tracks.
    fn sort_trials(&self, trials: &mut [TrialOf<Self>]) {
        trials.sort_by(|a, b| {
            let (a, b) = (&a.state.topology, &b.state.topology);
            b.total_legs().cmp(&a.total_legs()).then(b.tracks().len().cmp(&a.tracks().len()))
        });
    }

    fn fingerprint(&self, board: &Board) -> Fingerprint {
        board.fingerprint()
    }

    fn snapshot_dirty_flags(&self, board: &mut Board) {
        board.snapshot_dirty_flags();
    }
}

/// A Slither Link solver: the [`Engine`] loaded with every Slither Link rule.
///
/// ```
/// use slitherlink::builder::load_compact;
/// use slitherlink::engine::CompletionStatus;
/// use slitherlink::SlitherSolver;
///
/// let board = load_compact(&["3.", ".."]).unwrap();
/// let solved = SlitherSolver::new().solve(board);
/// assert_ne!(solved.status, CompletionStatus::Incomplete);
/// println!("{}", solved.board);
/// ```
pub struct SlitherSolver<O = NoopObserver> {
    engine: Engine<SlitherDomain, O>,
}

impl SlitherSolver {
    /// A solver with every Slither Link rule registered and the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Like [`Self::new`], configured by `config`.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut engine = Engine::with_config(SlitherDomain, config);
        engine.add_initial_rule(CellRuleRunner(ThreePairRule));
        engine
            .add_cell_rule(CellRuleRunner(BasicNumberRule))
            .add_cell_rule(CellRuleRunner(DotRule))
            .add_cell_rule(CellRuleRunner(NumberCornerRule))
            .add_cell_rule(CellRuleRunner(IncomingCornerRule));
        engine
            .add_topological_rule(AvoidLoopRule)
            .add_topological_rule(SegmentParityRule);

        Self { engine }
    }
}

impl Default for SlitherSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Observer<SlitherDomain>> SlitherSolver<O> {
    /// Report search events to `observer`.
    pub fn with_observer<O2: Observer<SlitherDomain>>(self, observer: O2) -> SlitherSolver<O2> {
        SlitherSolver { engine: self.engine.with_observer(observer) }
    }

    /// Solve `board`, returning its final state. See [`Engine::solve`].
    pub fn solve(&mut self, board: Board) -> SlitherState {
        self.engine.solve(board)
    }

    /// Counters of the last [`solve`](Self::solve).
    pub fn stats(&self) -> SearchStats {
        self.engine.stats()
    }

    /// The observer given to [`with_observer`](Self::with_observer).
    pub fn observer(&self) -> &O {
        self.engine.observer()
    }

    /// Number of board fingerprints remembered by the search.
    pub fn remembered(&self) -> usize {
        self.engine.remembered()
    }
}
