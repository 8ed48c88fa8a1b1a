use stepstar_core::{Grid, Point};

use crate::error::SearchError;

/// Walk `came_from` links back from `goal` and return the path in
/// start-to-goal order, both endpoints included.
///
/// The walk ends at the first cell without a predecessor. A chain longer
/// than the grid has cells must loop, so it fails with
/// [`SearchError::BrokenChain`], as does a link leaving the grid.
pub fn reconstruct(grid: &Grid, goal: Point) -> Result<Vec<Point>, SearchError> {
    let mut path = Vec::new();
    let mut next = Some(goal);
    while let Some(p) = next {
        let cell = grid.get(p).ok_or(SearchError::BrokenChain { at: p })?;
        if path.len() == grid.len() {
            return Err(SearchError::BrokenChain { at: p });
        }
        path.push(p);
        next = cell.came_from;
    }
    path.reverse();
    Ok(path)
}
