//! The [`Cell`] type: one square of the search grid.

use crate::geom::Point;

/// A grid square with its obstacle flag and search bookkeeping.
///
/// `g`, `h` and `f` only carry meaning once the cell has been discovered by
/// a search; until then they hold their zero defaults.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub wall: bool,
    /// Best known cost from the start.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// `g + h`.
    pub f: f64,
    /// Predecessor on the best known path.
    pub came_from: Option<Point>,
}

impl Cell {
    /// A wall cell.
    pub const WALL: Self = Self {
        wall: true,
        g: 0.0,
        h: 0.0,
        f: 0.0,
        came_from: None,
    };

    /// Set the wall flag (builder).
    #[inline]
    pub const fn with_wall(mut self, wall: bool) -> Self {
        self.wall = wall;
        self
    }

    /// Record a new best route into this cell.
    #[inline]
    pub fn relax(&mut self, g: f64, h: f64, from: Point) {
        self.g = g;
        self.h = h;
        self.f = g + h;
        self.came_from = Some(from);
    }

    /// Forget costs and predecessor, keeping the wall flag.
    #[inline]
    pub fn clear_scores(&mut self) {
        *self = Self::default().with_wall(self.wall);
    }
}
