//! Commands a presentation layer sends to the engine.

use stepstar_core::Point;

use crate::engine::{SearchEngine, SearchState};
use crate::error::SearchError;
use crate::heuristic::Heuristic;

/// A user request, decoupled from whatever input produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Begin a search. See [`SearchEngine::start`].
    Start,
    /// Advance one expansion.
    Step,
    /// Start if idle, then step until the search ends.
    Run,
    /// Abort and restore the grid to its defaults.
    Reset,
    /// Abort and forget results, keeping walls and endpoints.
    ClearSearch,
    SetWall { pos: Point, wall: bool },
    SetStart(Point),
    SetEnd(Point),
}

impl<H: Heuristic> SearchEngine<H> {
    /// Carry out `cmd` and return the resulting state.
    pub fn apply(&mut self, cmd: Command) -> Result<SearchState, SearchError> {
        log::trace!("command {cmd:?}");
        match cmd {
            Command::Start => self.start()?,
            Command::Step => {
                self.step()?;
            }
            Command::Run => {
                if self.state() == SearchState::Idle {
                    self.start()?;
                }
                self.run()?;
            }
            Command::Reset => self.reset(),
            Command::ClearSearch => self.clear_search(),
            Command::SetWall { pos, wall } => self.set_wall(pos, wall)?,
            Command::SetStart(p) => self.set_start(p)?,
            Command::SetEnd(p) => self.set_end(p)?,
        }
        Ok(self.state())
    }
}
