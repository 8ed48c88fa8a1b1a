//! Shell state and the update step driven by user actions.

use stepstar_core::{Grid, Point};
use stepstar_search::{Command, HeuristicKind, SearchEngine, SearchError, SearchState};

use crate::input::Action;

/// Everything the shell keeps between frames.
#[derive(Debug)]
pub struct Shell {
    engine: SearchEngine<HeuristicKind>,
    cursor: Point,
    message: String,
    playing: bool,
    quit: bool,
}

impl Shell {
    pub fn new(grid: Grid, heuristic: HeuristicKind) -> Self {
        let cursor = grid.start();
        Self {
            engine: SearchEngine::with_heuristic(grid, heuristic),
            cursor,
            message: String::new(),
            playing: false,
            quit: false,
        }
    }

    pub fn engine(&self) -> &SearchEngine<HeuristicKind> {
        &self.engine
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Last result or error, shown under the status line.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn playing(&self) -> bool {
        self.playing
    }

    pub fn quit(&self) -> bool {
        self.quit
    }

    /// Grid size in cells.
    pub fn size(&self) -> Point {
        self.engine.grid().bounds().size()
    }

    pub fn update(&mut self, action: Action) {
        match action {
            Action::Move(dx, dy) => {
                let next = self.cursor.shift(dx, dy);
                if self.engine.grid().contains(next) {
                    self.cursor = next;
                }
            }
            Action::ToggleWall => {
                let wall = !self.engine.grid().is_wall(self.cursor);
                self.command(Command::SetWall {
                    pos: self.cursor,
                    wall,
                });
            }
            Action::Paint { pos, wall } => {
                if self.engine.grid().is_wall(pos) != wall {
                    self.command(Command::SetWall { pos, wall });
                }
            }
            Action::PlaceStart => self.command(Command::SetStart(self.cursor)),
            Action::PlaceEnd => self.command(Command::SetEnd(self.cursor)),
            Action::Start => {
                if self.engine.state().is_finished() {
                    self.engine.clear_search();
                }
                self.command(Command::Start);
            }
            Action::Engine(cmd) => {
                if matches!(cmd, Command::Reset | Command::ClearSearch) {
                    self.playing = false;
                }
                self.command(cmd);
            }
            Action::TogglePlay => {
                self.playing = !self.playing;
                if self.playing && self.engine.state().is_finished() {
                    self.engine.clear_search();
                }
                self.message = if self.playing { "playing" } else { "paused" }.to_string();
            }
            Action::Redraw => {}
            Action::Quit => self.quit = true,
        }
    }

    /// One autoplay step. Stops playing once the search ends.
    pub fn tick(&mut self) {
        if !self.playing {
            return;
        }
        if self.engine.state() == SearchState::Idle {
            self.command(Command::Start);
        }
        self.command(Command::Step);
        if self.engine.state() != SearchState::Running {
            self.playing = false;
        }
    }

    fn command(&mut self, cmd: Command) {
        match self.engine.apply(cmd) {
            Ok(state) => self.message = describe(cmd, state, self.engine.path()),
            Err(err) => {
                self.playing = false;
                self.message = report(&err);
            }
        }
    }
}

fn describe(cmd: Command, state: SearchState, path: &[Point]) -> String {
    match (cmd, state) {
        (_, SearchState::Found) => format!("found a path of {} cells", path.len()),
        (_, SearchState::Exhausted) => "no path".to_string(),
        (Command::Reset, _) => "grid reset".to_string(),
        (Command::ClearSearch, _) => "search cleared".to_string(),
        _ => String::new(),
    }
}

fn report(err: &SearchError) -> String {
    match err {
        SearchError::NotIdle(_) => format!("{err} (press c to clear)"),
        _ => err.to_string(),
    }
}
