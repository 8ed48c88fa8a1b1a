//! The [`Grid`] type: a fixed-size 2D field of search [`Cell`]s.
//!
//! A `Grid` owns its cells in a flat row-major buffer and maintains the
//! endpoint invariant: exactly one start and one end cell, both in bounds
//! and never walls.

use rand::Rng;

use crate::cell::Cell;
use crate::config::GridConfig;
use crate::error::EditError;
use crate::geom::{Point, Range, RangeIter};

/// A `width × height` grid of [`Cell`]s with designated start and end.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    start: Point,
    end: Point,
    // Endpoints restored by `reset_all`.
    home: (Point, Point),
}

impl Grid {
    /// Create an open grid with the start in the top-left corner and the
    /// end in the bottom-right one. Dimensions are clamped to at least 1.
    pub fn new(width: i32, height: i32) -> Self {
        let cfg = GridConfig::sized(width, height);
        Self::open(cfg.width, cfg.height, cfg.start, cfg.end)
    }

    /// Create a grid from a [`GridConfig`], validating its endpoints.
    pub fn from_config(cfg: &GridConfig) -> Result<Self, EditError> {
        let width = cfg.width.max(1);
        let height = cfg.height.max(1);
        let bounds = Range::new(0, 0, width, height);
        for p in [cfg.start, cfg.end] {
            if !bounds.contains(p) {
                return Err(EditError::OutOfBounds(p));
            }
        }
        Ok(Self::open(width, height, cfg.start, cfg.end))
    }

    pub(crate) fn open(width: i32, height: i32, start: Point, end: Point) -> Self {
        let bounds = Range::new(0, 0, width, height);
        Self {
            cells: vec![Cell::default(); bounds.len()],
            bounds,
            start,
            end,
            home: (start, end),
        }
    }

    // -----------------------------------------------------------------------
    // Dimensions
    // -----------------------------------------------------------------------

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid holds at least one cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, p: Point) -> Option<&Cell> {
        self.idx(p).map(|i| &self.cells[i])
    }

    /// Whether `p` is a wall. Out-of-bounds points count as walls.
    #[inline]
    pub fn is_wall(&self, p: Point) -> bool {
        self.get(p).is_none_or(|c| c.wall)
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Row-major iterator over `(Point, &Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            cells: &self.cells,
            points: self.bounds.iter(),
        }
    }

    /// In-bounds edge-sharing neighbours of `p` (up, right, down, left).
    /// Walls are included; callers decide whether to skip them.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        p.neighbors_4()
            .into_iter()
            .filter(move |&n| self.bounds.contains(n))
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Set or clear the wall flag at `p`.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> Result<(), EditError> {
        let i = self.idx(p).ok_or(EditError::OutOfBounds(p))?;
        if p == self.start || p == self.end {
            return Err(EditError::Endpoint(p));
        }
        self.cells[i].wall = wall;
        Ok(())
    }

    /// Move the start cell to `p`.
    pub fn set_start(&mut self, p: Point) -> Result<(), EditError> {
        self.check_endpoint(p)?;
        self.start = p;
        Ok(())
    }

    /// Move the end cell to `p`.
    pub fn set_end(&mut self, p: Point) -> Result<(), EditError> {
        self.check_endpoint(p)?;
        self.end = p;
        Ok(())
    }

    fn check_endpoint(&self, p: Point) -> Result<(), EditError> {
        match self.get(p) {
            None => Err(EditError::OutOfBounds(p)),
            Some(c) if c.wall => Err(EditError::Wall(p)),
            Some(_) => Ok(()),
        }
    }

    /// Mark `p` as the root of a search towards a goal `h` away.
    pub fn seed(&mut self, p: Point, h: f64) {
        if let Some(i) = self.idx(p) {
            let cell = &mut self.cells[i];
            cell.g = 0.0;
            cell.h = h;
            cell.f = h;
            cell.came_from = None;
        }
    }

    /// Record a better route into `p` coming from `from`.
    pub fn relax(&mut self, p: Point, g: f64, h: f64, from: Point) {
        if let Some(i) = self.idx(p) {
            self.cells[i].relax(g, h, from);
        }
    }

    /// Clear costs and predecessor links, keeping walls and endpoints.
    pub fn clear_scores(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.clear_scores();
        }
    }

    /// Restore every cell to its default (no walls, zero costs, no links)
    /// and put the endpoints back where the grid was created with them.
    pub fn reset_all(&mut self) {
        self.cells.fill(Cell::default());
        (self.start, self.end) = self.home;
    }

    /// Randomly rebuild the walls: every cell except the endpoints becomes a
    /// wall with probability `density` (clamped to `[0, 1]`).
    ///
    /// Returns the number of walls placed.
    pub fn scatter_walls<R: Rng>(&mut self, rng: &mut R, density: f64) -> usize {
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        let mut placed = 0;
        for (i, p) in self.bounds.iter().enumerate() {
            let wall = p != self.start && p != self.end && rng.random_bool(density);
            self.cells[i].wall = wall;
            placed += usize::from(wall);
        }
        placed
    }
}

impl Default for Grid {
    fn default() -> Self {
        let cfg = GridConfig::default();
        Self::new(cfg.width, cfg.height)
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, &Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    cells: &'a [Cell],
    points: RangeIter,
}

impl<'a> Iterator for GridIter<'a> {
    type Item = (Point, &'a Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.points.len();
        let p = self.points.next()?;
        let i = self.cells.len() - remaining;
        Some((p, &self.cells[i]))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.points.size_hint()
    }
}

impl ExactSizeIterator for GridIter<'_> {}
