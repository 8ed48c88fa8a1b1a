//! Crossterm terminal setup and input polling.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event},
    execute,
    terminal::{self, ClearType},
};

/// Raw-mode alternate screen, restored on drop.
pub struct Terminal {
    out: Stdout,
    mouse_enabled: bool,
}

impl Terminal {
    /// Switch the terminal into raw mode on the alternate screen.
    pub fn init(mouse_enabled: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if mouse_enabled {
            execute!(out, event::EnableMouseCapture)?;
        }
        Ok(Self { out, mouse_enabled })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }

    /// Wait for the next input event. With a timeout, returns `None` if
    /// nothing arrived in time.
    pub fn next_event(&mut self, timeout: Option<Duration>) -> io::Result<Option<Event>> {
        if let Some(t) = timeout {
            if !event::poll(t)? {
                return Ok(None);
            }
        }
        event::read().map(Some)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        if self.mouse_enabled {
            let _ = execute!(self.out, event::DisableMouseCapture);
        }
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
