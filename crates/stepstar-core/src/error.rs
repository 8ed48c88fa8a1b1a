//! Errors raised when editing a [`Grid`](crate::Grid).

use std::fmt;

use crate::geom::Point;

/// A grid edit that was refused. The grid is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// The target is the start or end cell, which can never be a wall.
    Endpoint(Point),
    /// The target lies outside the grid.
    OutOfBounds(Point),
    /// An endpoint cannot be placed on a wall.
    Wall(Point),
    /// The grid is locked by a search that is not idle.
    Locked,
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoint(p) => write!(f, "cell {p} is an endpoint and cannot become a wall"),
            Self::OutOfBounds(p) => write!(f, "cell {p} is outside the grid"),
            Self::Wall(p) => write!(f, "cell {p} is a wall"),
            Self::Locked => f.write_str("grid cannot be edited while a search is active"),
        }
    }
}

impl std::error::Error for EditError {}
