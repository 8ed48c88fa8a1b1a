//! Read-only copies of engine state for renderers.

use stepstar_core::{Cell, Point};

use crate::engine::{SearchEngine, SearchState};
use crate::heuristic::Heuristic;

/// How a cell should be drawn. When several apply, the earliest variant
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Start,
    End,
    Wall,
    Path,
    /// Selected by the most recent step.
    Current,
    Frontier,
    Visited,
    Empty,
}

/// Everything a renderer needs to draw one frame of a search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub end: Point,
    /// Row-major.
    pub cells: Vec<Cell>,
    /// Row-major.
    pub frontier: Vec<Point>,
    /// Row-major.
    pub visited: Vec<Point>,
    /// Start to goal.
    pub path: Vec<Point>,
    pub current: Option<Point>,
    pub state: SearchState,
    pub steps: usize,
}

impl Snapshot {
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// The cell at `p`, or `None` if out of bounds.
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    pub fn in_frontier(&self, p: Point) -> bool {
        self.frontier.binary_search(&p).is_ok()
    }

    pub fn is_visited(&self, p: Point) -> bool {
        self.visited.binary_search(&p).is_ok()
    }

    pub fn on_path(&self, p: Point) -> bool {
        self.path.contains(&p)
    }

    /// Classify `p` for drawing. Out-of-bounds points are walls.
    pub fn kind_at(&self, p: Point) -> CellKind {
        let Some(cell) = self.cell(p) else {
            return CellKind::Wall;
        };
        if p == self.start {
            CellKind::Start
        } else if p == self.end {
            CellKind::End
        } else if cell.wall {
            CellKind::Wall
        } else if self.on_path(p) {
            CellKind::Path
        } else if self.current == Some(p) {
            CellKind::Current
        } else if self.in_frontier(p) {
            CellKind::Frontier
        } else if self.is_visited(p) {
            CellKind::Visited
        } else {
            CellKind::Empty
        }
    }
}

impl<H: Heuristic> SearchEngine<H> {
    /// Copy out the current state. Never changes the engine.
    pub fn snapshot(&self) -> Snapshot {
        let grid = self.grid();
        let mut visited: Vec<Point> = self.visited().iter().copied().collect();
        visited.sort_unstable();
        Snapshot {
            width: grid.width(),
            height: grid.height(),
            start: grid.start(),
            end: grid.end(),
            cells: grid.iter().map(|(_, c)| *c).collect(),
            frontier: self.frontier().sorted(),
            visited,
            path: self.path().to_vec(),
            current: self.last_expanded(),
            state: self.state(),
            steps: self.steps(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepstar_core::Grid;

    fn engine() -> SearchEngine {
        SearchEngine::new(Grid::parse("S..\n.#.\n..E").unwrap())
    }

    #[test]
    fn idle_snapshot() {
        let s = engine().snapshot();
        assert_eq!((s.width, s.height), (3, 3));
        assert_eq!(s.cells.len(), 9);
        assert_eq!(s.state, SearchState::Idle);
        assert!(s.frontier.is_empty() && s.visited.is_empty() && s.path.is_empty());
        assert_eq!(s.kind_at(Point::new(0, 0)), CellKind::Start);
        assert_eq!(s.kind_at(Point::new(2, 2)), CellKind::End);
        assert_eq!(s.kind_at(Point::new(1, 1)), CellKind::Wall);
        assert_eq!(s.kind_at(Point::new(1, 0)), CellKind::Empty);
        assert_eq!(s.kind_at(Point::new(-1, 0)), CellKind::Wall);
    }

    #[test]
    fn mid_search_snapshot() {
        let mut e = engine();
        e.start().unwrap();
        e.step().unwrap();
        e.step().unwrap();
        let s = e.snapshot();
        assert_eq!(s.state, SearchState::Running);
        assert_eq!(s.steps, 2);
        assert_eq!(s.visited.len(), 2);
        assert!(s.is_visited(Point::new(0, 0)));
        let current = s.current.unwrap();
        assert_eq!(s.kind_at(current), CellKind::Current);
        for &p in &s.frontier {
            assert_eq!(s.kind_at(p), CellKind::Frontier);
        }
        let cell = s.cell(current).unwrap();
        assert_eq!(cell.g, 1.0);
        assert_eq!(cell.came_from, Some(Point::new(0, 0)));
    }

    #[test]
    fn found_snapshot_marks_path() {
        let mut e = engine();
        e.start().unwrap();
        e.run().unwrap();
        let s = e.snapshot();
        assert_eq!(s.state, SearchState::Found);
        assert_eq!(s.path.len(), 5);
        for &p in &s.path[1..s.path.len() - 1] {
            assert_eq!(s.kind_at(p), CellKind::Path);
        }
    }

    #[test]
    fn snapshot_does_not_change_engine() {
        let mut e = engine();
        e.start().unwrap();
        e.step().unwrap();
        let a = e.snapshot();
        let b = e.snapshot();
        assert_eq!(a, b);
        assert_eq!(e.steps(), 1);
    }
}
