use std::fmt;

use stepstar_core::{EditError, Point};

use crate::engine::SearchState;

/// Errors reported by the [`SearchEngine`](crate::SearchEngine).
///
/// None of them is fatal: the engine stays in the state it was in before the
/// failed call, and the caller may retry after fixing its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or end cell is a wall or lies outside the grid.
    InvalidEndpoints { start: Point, end: Point },
    /// A grid edit was refused.
    InvalidEdit(EditError),
    /// Following predecessor links from `at` did not lead back to the start.
    BrokenChain { at: Point },
    /// The command requires an idle engine.
    NotIdle(SearchState),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEndpoints { start, end } => {
                write!(f, "invalid endpoints: start {start}, end {end}")
            }
            Self::InvalidEdit(e) => write!(f, "invalid edit: {e}"),
            Self::BrokenChain { at } => write!(f, "broken predecessor chain at {at}"),
            Self::NotIdle(state) => write!(f, "search is {state}, not idle"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEdit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EditError> for SearchError {
    fn from(e: EditError) -> Self {
        Self::InvalidEdit(e)
    }
}
