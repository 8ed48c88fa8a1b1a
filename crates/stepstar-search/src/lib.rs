//! Step-driven A* search on uniform grids.
//!
//! Unlike a one-shot pathfinding call, a [`SearchEngine`] is advanced one
//! expansion at a time, so callers can inspect the frontier, the visited set
//! and the per-cell costs between steps, e.g. to animate the search.
//!
//! ```
//! use stepstar_core::{Grid, Point};
//! use stepstar_search::{SearchEngine, SearchState};
//!
//! let mut engine = SearchEngine::new(Grid::new(5, 5));
//! engine.start().unwrap();
//! while engine.state() == SearchState::Running {
//!     engine.step().unwrap();
//! }
//! assert_eq!(engine.path().len(), 9);
//! assert_eq!(engine.path()[0], Point::new(0, 0));
//! ```
//!
//! | Module | Role |
//! |---|---|
//! | [`heuristic`] | remaining-cost estimates ([`Euclidean`] by default) |
//! | [`frontier`] | open set with a deterministic minimum |
//! | [`engine`] | the state machine: Idle → Running → Found / Exhausted |
//! | [`path`] | predecessor-chain reconstruction |
//! | [`snapshot`] | read-only state for renderers |
//! | [`command`] | input-agnostic requests for presentation layers |

pub mod command;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod path;
pub mod snapshot;

pub use command::Command;
pub use engine::{STEP_COST, SearchEngine, SearchState, StepOutcome};
pub use error::SearchError;
pub use frontier::Frontier;
pub use heuristic::{Euclidean, Heuristic, HeuristicKind, Manhattan, euclidean, manhattan};
pub use path::reconstruct;
pub use snapshot::{CellKind, Snapshot};
