use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use stepstar_core::{EditError, Grid, Point};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::heuristic::{Euclidean, Heuristic};
use crate::path::reconstruct;

/// Cost of moving between two edge-sharing cells.
pub const STEP_COST: f64 = 1.0;

/// Lifecycle of a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// No search in progress; the grid may be edited.
    #[default]
    Idle,
    /// Started and still expanding.
    Running,
    /// The goal was reached and a path is available.
    Found,
    /// Every reachable cell was expanded without reaching the goal.
    Exhausted,
}

impl SearchState {
    /// Whether the search has ended, successfully or not.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Found => "found",
            Self::Exhausted => "exhausted",
        })
    }
}

/// What a single [`SearchEngine::step`] did.
///
/// The outcome describes the step itself; the expansion that empties the
/// frontier reports `Expanded` and leaves the engine `Exhausted`, so check
/// [`SearchEngine::state`] to know whether the search is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cell was moved from the frontier to the visited set.
    Expanded(Point),
    /// The goal was selected; the path is ready.
    Found,
    /// The frontier was already empty.
    Exhausted,
    /// The engine was not running; nothing changed.
    Idle,
}

/// Step-driven A* search over an owned [`Grid`].
///
/// The engine is the only way to mutate its grid, which lets it refuse edits
/// while a search is active. Callers drive it with [`start`](Self::start),
/// [`step`](Self::step) and [`reset`](Self::reset) and may inspect the
/// frontier, visited set and per-cell costs between steps.
///
/// Movement is 4-way with unit cost. Predecessor links are only ever set to
/// the cell being expanded, which has already left the frontier, so they
/// always form a tree rooted at the start.
pub struct SearchEngine<H = Euclidean> {
    grid: Grid,
    heuristic: H,
    state: SearchState,
    frontier: Frontier,
    visited: HashSet<Point>,
    path: Vec<Point>,
    steps: usize,
    last: Option<Point>,
    // scratch buffer for neighbor queries
    nbuf: Vec<Point>,
}

impl SearchEngine<Euclidean> {
    /// Create an idle engine using the Euclidean heuristic.
    pub fn new(grid: Grid) -> Self {
        Self::with_heuristic(grid, Euclidean)
    }
}

impl<H: Heuristic> SearchEngine<H> {
    /// Create an idle engine using `heuristic`.
    pub fn with_heuristic(grid: Grid, heuristic: H) -> Self {
        Self {
            grid,
            heuristic,
            state: SearchState::Idle,
            frontier: Frontier::new(),
            visited: HashSet::new(),
            path: Vec::new(),
            steps: 0,
            last: None,
            nbuf: Vec::with_capacity(4),
        }
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    #[inline]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[inline]
    pub fn visited(&self) -> &HashSet<Point> {
        &self.visited
    }

    #[inline]
    pub fn in_frontier(&self, p: Point) -> bool {
        self.frontier.contains(p)
    }

    #[inline]
    pub fn is_visited(&self, p: Point) -> bool {
        self.visited.contains(&p)
    }

    /// The path found by the last search, start to goal. Empty unless the
    /// state is [`SearchState::Found`].
    #[inline]
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Number of `step` calls that did work in the current run.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The cell selected by the most recent step, if any.
    #[inline]
    pub fn last_expanded(&self) -> Option<Point> {
        self.last
    }

    /// Give the grid back, dropping all search state.
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    // -----------------------------------------------------------------------
    // Search lifecycle
    // -----------------------------------------------------------------------

    /// Begin a search from the grid's start towards its end.
    pub fn start(&mut self) -> Result<(), SearchError> {
        if self.state != SearchState::Idle {
            return Err(SearchError::NotIdle(self.state));
        }
        let (start, goal) = (self.grid.start(), self.grid.end());
        if self.grid.is_wall(start) || self.grid.is_wall(goal) {
            return Err(SearchError::InvalidEndpoints { start, end: goal });
        }

        self.clear_run();
        self.grid.clear_scores();
        let h = self.heuristic.estimate(start, goal);
        self.grid.seed(start, h);
        self.frontier.push(start, h, h);
        self.state = SearchState::Running;
        log::info!("search started: {start} -> {goal}");
        Ok(())
    }

    /// Perform one expansion.
    ///
    /// Does nothing unless the engine is running. A step either applies all
    /// of its updates or none of them.
    pub fn step(&mut self) -> Result<StepOutcome, SearchError> {
        if self.state != SearchState::Running {
            return Ok(StepOutcome::Idle);
        }
        let Some(current) = self.frontier.peek() else {
            self.state = SearchState::Exhausted;
            log::info!("search exhausted after {} steps", self.steps);
            return Ok(StepOutcome::Exhausted);
        };

        let goal = self.grid.end();
        if current == goal {
            let path = reconstruct(&self.grid, goal).inspect_err(|e| log::error!("{e}"))?;
            self.path = path;
            self.steps += 1;
            self.last = Some(current);
            self.state = SearchState::Found;
            log::info!(
                "path found after {} steps: {} cells",
                self.steps,
                self.path.len()
            );
            return Ok(StepOutcome::Found);
        }

        let Some(cell) = self.grid.get(current) else {
            log::error!("frontier holds {current}, which is off the grid");
            return Err(SearchError::BrokenChain { at: current });
        };
        let g = cell.g + STEP_COST;

        self.frontier.remove(current);
        self.visited.insert(current);
        self.steps += 1;
        self.last = Some(current);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        nbuf.extend(self.grid.neighbors(current));

        for &n in nbuf.iter() {
            if self.grid.is_wall(n) || self.visited.contains(&n) {
                continue;
            }
            // Cells outside the frontier here are undiscovered, whatever
            // their stored `g` says.
            let improves = match self.grid.get(n) {
                Some(cell) => !self.frontier.contains(n) || g < cell.g,
                None => false,
            };
            if improves {
                let h = self.heuristic.estimate(n, goal);
                self.grid.relax(n, g, h, current);
                self.frontier.push(n, g + h, h);
            }
        }
        self.nbuf = nbuf;

        log::debug!("expanded {current}, frontier {}", self.frontier.len());

        if self.frontier.is_empty() {
            self.state = SearchState::Exhausted;
            log::info!("search exhausted after {} steps", self.steps);
        }
        Ok(StepOutcome::Expanded(current))
    }

    /// Step until the search leaves [`SearchState::Running`] and return the
    /// final state. Returns the current state unchanged if not running.
    pub fn run(&mut self) -> Result<SearchState, SearchError> {
        while self.state == SearchState::Running {
            self.step()?;
        }
        Ok(self.state)
    }

    /// Abort any search and restore the grid to its defaults: no walls, no
    /// costs, endpoints back where they started.
    pub fn reset(&mut self) {
        self.clear_run();
        self.grid.reset_all();
        self.state = SearchState::Idle;
        log::info!("search reset");
    }

    /// Abort any search and forget its results, keeping walls and endpoints
    /// so the grid can be edited and searched again.
    pub fn clear_search(&mut self) {
        self.clear_run();
        self.grid.clear_scores();
        self.state = SearchState::Idle;
        log::debug!("search cleared");
    }

    fn clear_run(&mut self) {
        self.frontier.clear();
        self.visited.clear();
        self.path.clear();
        self.steps = 0;
        self.last = None;
    }

    // -----------------------------------------------------------------------
    // Grid edits (idle only)
    // -----------------------------------------------------------------------

    fn ensure_idle(&self) -> Result<(), SearchError> {
        if self.state == SearchState::Idle {
            return Ok(());
        }
        log::warn!("grid edit refused: search is {}", self.state);
        Err(EditError::Locked.into())
    }

    fn edit(
        &mut self,
        f: impl FnOnce(&mut Grid) -> Result<(), EditError>,
    ) -> Result<(), SearchError> {
        self.ensure_idle()?;
        f(&mut self.grid).map_err(|e| {
            log::warn!("grid edit refused: {e}");
            SearchError::InvalidEdit(e)
        })
    }

    /// Set or clear the wall at `p`.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<(), SearchError> {
        self.edit(|g| g.set_wall(p, wall))
    }

    /// Move the start cell.
    pub fn set_start(&mut self, p: Point) -> Result<(), SearchError> {
        self.edit(|g| g.set_start(p))
    }

    /// Move the end cell.
    pub fn set_end(&mut self, p: Point) -> Result<(), SearchError> {
        self.edit(|g| g.set_end(p))
    }

    /// Replace the walls with random ones, see [`Grid::scatter_walls`].
    pub fn scatter_walls<R: Rng>(
        &mut self,
        rng: &mut R,
        density: f64,
    ) -> Result<usize, SearchError> {
        self.ensure_idle()?;
        Ok(self.grid.scatter_walls(rng, density))
    }
}

impl<H: fmt::Debug> fmt::Debug for SearchEngine<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("heuristic", &self.heuristic)
            .field("state", &self.state)
            .field("steps", &self.steps)
            .field("frontier", &self.frontier.len())
            .field("visited", &self.visited.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::{HeuristicKind, Manhattan};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;
    use stepstar_core::Cell;

    /// Breadth-first distance from start to end, in edges.
    fn bfs_distance(grid: &Grid) -> Option<usize> {
        bfs(grid).0
    }

    /// Number of open cells reachable from start (start included).
    fn reachable(grid: &Grid) -> usize {
        bfs(grid).1
    }

    fn bfs(grid: &Grid) -> (Option<usize>, usize) {
        let mut dist = vec![usize::MAX; grid.len()];
        let mut queue = VecDeque::new();
        let si = grid.idx(grid.start()).unwrap();
        dist[si] = 0;
        queue.push_back(grid.start());
        let mut seen = 1;
        while let Some(p) = queue.pop_front() {
            let d = dist[grid.idx(p).unwrap()];
            for n in grid.neighbors(p) {
                let ni = grid.idx(n).unwrap();
                if grid.is_wall(n) || dist[ni] != usize::MAX {
                    continue;
                }
                dist[ni] = d + 1;
                seen += 1;
                queue.push_back(n);
            }
        }
        let d = dist[grid.idx(grid.end()).unwrap()];
        ((d != usize::MAX).then_some(d), seen)
    }

    fn expansions<H: Heuristic>(engine: &mut SearchEngine<H>) -> Vec<Point> {
        engine.start().unwrap();
        let mut out = Vec::new();
        while engine.state() == SearchState::Running {
            if let StepOutcome::Expanded(p) = engine.step().unwrap() {
                out.push(p);
            }
        }
        out
    }

    fn assert_connected(path: &[Point]) {
        for w in path.windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1, "{} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn open_five_by_five() {
        let mut e = SearchEngine::new(Grid::new(5, 5));
        e.start().unwrap();
        assert_eq!(e.run().unwrap(), SearchState::Found);
        let path = e.path();
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&Point::new(0, 0)));
        assert_eq!(path.last(), Some(&Point::new(4, 4)));
        assert_connected(path);
        assert!(e.steps() <= 25);
    }

    #[test]
    fn routes_through_the_only_gap() {
        let grid = Grid::parse(
            "
S.#..
..#..
..#..
..#..
....E",
        )
        .unwrap();
        let mut e = SearchEngine::new(grid);
        e.start().unwrap();
        assert_eq!(e.run().unwrap(), SearchState::Found);
        assert!(e.path().contains(&Point::new(2, 4)));
        assert_eq!(e.path().len(), 9);
        assert_connected(e.path());
        assert!(e.path().iter().all(|&p| !e.grid().is_wall(p)));
    }

    #[test]
    fn start_equal_to_end_is_found_in_one_step() {
        let mut e = SearchEngine::new(Grid::new(5, 5));
        e.set_end(Point::new(0, 0)).unwrap();
        e.start().unwrap();
        assert_eq!(e.step().unwrap(), StepOutcome::Found);
        assert_eq!(e.state(), SearchState::Found);
        assert_eq!(e.steps(), 1);
        assert_eq!(e.path(), &[Point::new(0, 0)]);
    }

    #[test]
    fn walled_off_goal_exhausts_after_every_reachable_cell() {
        let grid = Grid::parse(
            "
S.#..
..#..
..#..
..#..
..#.E",
        )
        .unwrap();
        let expected = reachable(&grid);
        assert_eq!(expected, 10);
        let mut e = SearchEngine::new(grid);
        e.start().unwrap();
        assert_eq!(e.run().unwrap(), SearchState::Exhausted);
        assert!(e.path().is_empty());
        assert_eq!(e.steps(), expected);
        assert_eq!(e.visited().len(), expected);
        assert!(e.frontier().is_empty());
    }

    #[test]
    fn enclosed_start_exhausts_on_first_step() {
        let grid = Grid::parse(
            "
S#.
##.
..E",
        )
        .unwrap();
        let mut e = SearchEngine::new(grid);
        e.start().unwrap();
        assert_eq!(
            e.step().unwrap(),
            StepOutcome::Expanded(Point::new(0, 0))
        );
        assert_eq!(e.state(), SearchState::Exhausted);
        assert_eq!(e.steps(), 1);
    }

    #[test]
    fn step_after_finish_is_noop() {
        for end in [Point::new(3, 3), Point::new(0, 0)] {
            let mut e = SearchEngine::new(Grid::new(4, 4));
            e.set_end(end).unwrap();
            e.start().unwrap();
            let state = e.run().unwrap();
            let path = e.path().to_vec();
            let steps = e.steps();
            assert_eq!(e.step().unwrap(), StepOutcome::Idle);
            assert_eq!(e.state(), state);
            assert_eq!(e.path(), path.as_slice());
            assert_eq!(e.steps(), steps);
        }

        let mut e = SearchEngine::new(Grid::parse("S#\n#E").unwrap());
        e.start().unwrap();
        assert_eq!(e.run().unwrap(), SearchState::Exhausted);
        assert_eq!(e.step().unwrap(), StepOutcome::Idle);
        assert_eq!(e.state(), SearchState::Exhausted);
        assert!(e.path().is_empty());
    }

    #[test]
    fn step_while_idle_is_noop() {
        let mut e = SearchEngine::new(Grid::new(3, 3));
        assert_eq!(e.step().unwrap(), StepOutcome::Idle);
        assert_eq!(e.run().unwrap(), SearchState::Idle);
        assert_eq!(e.steps(), 0);
    }

    #[test]
    fn off_grid_frontier_entry_is_an_error() {
        let mut e = SearchEngine::new(Grid::new(3, 3));
        e.start().unwrap();
        let bad = Point::new(-1, -1);
        e.frontier.push(bad, -1.0, 0.0);
        assert_eq!(e.step(), Err(SearchError::BrokenChain { at: bad }));
        // nothing was applied
        assert_eq!(e.state(), SearchState::Running);
        assert_eq!(e.steps(), 0);
        assert!(e.visited().is_empty());
        assert!(e.in_frontier(bad));
        assert_eq!(e.last_expanded(), None);
    }

    #[test]
    fn reset_from_any_state_restores_defaults() {
        let layout = "
S...
.##.
....
...E";
        // idle, mid-run, found
        for steps_before_reset in [None, Some(3), Some(usize::MAX)] {
            let mut e = SearchEngine::new(Grid::parse(layout).unwrap());
            e.set_start(Point::new(3, 0)).unwrap();
            if let Some(n) = steps_before_reset {
                e.start().unwrap();
                for _ in 0..n.min(100) {
                    e.step().unwrap();
                }
            }
            e.reset();
            assert_eq!(e.state(), SearchState::Idle);
            assert!(e.frontier().is_empty());
            assert!(e.visited().is_empty());
            assert!(e.path().is_empty());
            assert_eq!(e.steps(), 0);
            assert_eq!(e.last_expanded(), None);
            assert!(e.grid().iter().all(|(_, c)| *c == Cell::default()));
            assert_eq!(e.grid().start(), Point::new(0, 0));
        }

        let mut e = SearchEngine::new(Grid::parse("S#\n#E").unwrap());
        e.start().unwrap();
        e.run().unwrap();
        e.reset();
        assert!(e.grid().iter().all(|(_, c)| *c == Cell::default()));
    }

    #[test]
    fn clear_search_keeps_walls() {
        let mut e = SearchEngine::new(Grid::parse("S#.\n...\n..E").unwrap());
        e.start().unwrap();
        e.run().unwrap();
        e.clear_search();
        assert_eq!(e.state(), SearchState::Idle);
        assert!(e.path().is_empty());
        assert!(e.grid().is_wall(Point::new(1, 0)));
        assert!(
            e.grid()
                .iter()
                .all(|(_, c)| c.g == 0.0 && c.came_from.is_none())
        );
        // and it is editable again
        e.set_wall(Point::new(1, 1), true).unwrap();
    }

    #[test]
    fn edits_are_refused_unless_idle() {
        let mut e = SearchEngine::new(Grid::new(5, 5));
        e.start().unwrap();
        let locked = Err(SearchError::InvalidEdit(EditError::Locked));
        assert_eq!(e.set_wall(Point::new(2, 2), true), locked);
        assert_eq!(e.set_start(Point::new(1, 1)), locked);
        assert_eq!(e.set_end(Point::new(1, 1)), locked);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            e.scatter_walls(&mut rng, 0.5),
            Err(SearchError::InvalidEdit(EditError::Locked))
        );
        assert!(!e.grid().is_wall(Point::new(2, 2)));

        e.run().unwrap();
        assert_eq!(e.set_wall(Point::new(2, 2), true), locked);

        e.reset();
        e.set_wall(Point::new(2, 2), true).unwrap();
        assert_eq!(
            e.set_wall(Point::new(0, 0), true),
            Err(SearchError::InvalidEdit(EditError::Endpoint(Point::new(0, 0))))
        );
    }

    #[test]
    fn start_requires_idle() {
        let mut e = SearchEngine::new(Grid::new(3, 3));
        e.start().unwrap();
        assert_eq!(e.start(), Err(SearchError::NotIdle(SearchState::Running)));
        e.run().unwrap();
        assert_eq!(e.start(), Err(SearchError::NotIdle(SearchState::Found)));
        e.clear_search();
        e.start().unwrap();
        assert_eq!(e.run().unwrap(), SearchState::Found);
    }

    #[test]
    fn start_seeds_the_frontier() {
        let mut e = SearchEngine::new(Grid::new(4, 5));
        e.start().unwrap();
        assert_eq!(e.state(), SearchState::Running);
        assert_eq!(e.frontier().sorted(), vec![Point::new(0, 0)]);
        let c = e.grid().get(Point::new(0, 0)).unwrap();
        assert_eq!(c.g, 0.0);
        assert_eq!(c.h, 5.0);
        assert_eq!(c.f, 5.0);
    }

    #[test]
    fn ties_expand_lowest_x_first() {
        let mut e = SearchEngine::new(Grid::new(3, 3));
        let order = expansions(&mut e);
        // (1, 0) and (0, 1) tie on f and h after the first expansion.
        assert_eq!(order[0], Point::new(0, 0));
        assert_eq!(order[1], Point::new(0, 1));
    }

    #[test]
    fn runs_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut grid = Grid::new(15, 15);
        grid.scatter_walls(&mut rng, 0.25);

        let mut a = SearchEngine::new(grid.clone());
        let mut b = SearchEngine::new(grid);
        assert_eq!(expansions(&mut a), expansions(&mut b));
        assert_eq!(a.state(), b.state());
        assert_eq!(a.path(), b.path());

        // and again on the same engine after clearing
        let first = a.path().to_vec();
        a.clear_search();
        let replay = expansions(&mut a);
        assert_eq!(replay.len(), b.steps() - usize::from(b.state() == SearchState::Found));
        assert_eq!(a.path(), first.as_slice());
    }

    #[test]
    fn open_grids_give_manhattan_paths() {
        let grid = Grid::new(7, 6);
        for start in grid.bounds() {
            for end in [Point::new(6, 5), Point::new(3, 0), Point::new(0, 4)] {
                let mut e = SearchEngine::new(grid.clone());
                e.set_start(start).unwrap();
                e.set_end(end).unwrap();
                e.start().unwrap();
                assert_eq!(e.run().unwrap(), SearchState::Found);
                assert_eq!(e.path().len() - 1, start.manhattan(end) as usize);
            }
        }
    }

    #[test]
    fn random_grids_match_bfs() {
        for seed in 0..60 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::new(12, 10);
            grid.scatter_walls(&mut rng, 0.3);
            let expected = bfs_distance(&grid);

            for kind in [HeuristicKind::Euclidean, HeuristicKind::Manhattan] {
                let mut e = SearchEngine::with_heuristic(grid.clone(), kind);
                e.start().unwrap();
                let state = e.run().unwrap();
                match expected {
                    Some(d) => {
                        assert_eq!(state, SearchState::Found, "seed {seed}");
                        assert_eq!(e.path().len() - 1, d, "seed {seed}");
                        assert_connected(e.path());
                    }
                    None => {
                        assert_eq!(state, SearchState::Exhausted, "seed {seed}");
                        assert!(e.path().is_empty());
                        assert_eq!(e.steps(), reachable(&grid), "seed {seed}");
                    }
                }
            }
        }
    }

    #[test]
    fn predecessors_are_always_visited() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut grid = Grid::new(15, 15);
        grid.scatter_walls(&mut rng, 0.2);
        let mut e = SearchEngine::with_heuristic(grid, Manhattan);
        e.start().unwrap();
        while e.state() == SearchState::Running {
            e.step().unwrap();
            for (p, c) in e.grid().iter() {
                if let Some(from) = c.came_from {
                    assert!(e.is_visited(from), "{p} <- {from}");
                }
            }
        }
    }

    #[test]
    fn frontier_and_visited_are_disjoint() {
        let mut e = SearchEngine::new(Grid::new(6, 6));
        e.start().unwrap();
        for _ in 0..10 {
            e.step().unwrap();
            assert!(e.frontier().iter().all(|p| !e.is_visited(p)));
        }
    }

    #[test]
    fn engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SearchEngine>();
        assert_send::<SearchEngine<HeuristicKind>>();
    }
}
