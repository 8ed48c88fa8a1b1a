//! Draws a [`Snapshot`] to the terminal.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use stepstar_core::Point;
use stepstar_search::{CellKind, SearchState, Snapshot};

/// Terminal columns per grid cell.
pub const CELL_WIDTH: i32 = 2;

const COL_EMPTY: Color = Color::Rgb { r: 235, g: 235, b: 235 };
const COL_WALL: Color = Color::Rgb { r: 20, g: 20, b: 20 };
const COL_VISITED: Color = Color::Rgb { r: 200, g: 60, b: 60 };
const COL_FRONTIER: Color = Color::Rgb { r: 60, g: 180, b: 80 };
const COL_CURRENT: Color = Color::Rgb { r: 240, g: 210, b: 60 };
const COL_PATH: Color = Color::Rgb { r: 50, g: 90, b: 230 };
const COL_START: Color = Color::Rgb { r: 255, g: 150, b: 30 };
const COL_END: Color = Color::Rgb { r: 40, g: 210, b: 220 };
const COL_CURSOR: Color = Color::Rgb { r: 120, g: 0, b: 160 };

const HELP: &str = "arrows/hjkl move  w wall  s start  e end  enter search  n step  \
                    r run  p play  c clear  x reset  q quit";

pub fn kind_color(kind: CellKind) -> Color {
    match kind {
        CellKind::Start => COL_START,
        CellKind::End => COL_END,
        CellKind::Wall => COL_WALL,
        CellKind::Path => COL_PATH,
        CellKind::Current => COL_CURRENT,
        CellKind::Frontier => COL_FRONTIER,
        CellKind::Visited => COL_VISITED,
        CellKind::Empty => COL_EMPTY,
    }
}

/// The line describing the search as a whole.
pub fn summary(snap: &Snapshot, playing: bool) -> String {
    let mut line = format!(
        "{} | steps {} | frontier {} | visited {}",
        snap.state,
        snap.steps,
        snap.frontier.len(),
        snap.visited.len()
    );
    if snap.state == SearchState::Found {
        line.push_str(&format!(" | path {} cells", snap.path.len()));
    }
    if playing {
        line.push_str(" | playing");
    }
    line
}

/// The line describing the cell under the cursor.
pub fn inspect(snap: &Snapshot, cursor: Point) -> String {
    let Some(cell) = snap.cell(cursor) else {
        return String::new();
    };
    let from = cell
        .came_from
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    format!(
        "{cursor} {:?} | g {:.2} h {:.2} f {:.2} | from {from}",
        snap.kind_at(cursor),
        cell.g,
        cell.h,
        cell.f
    )
}

/// Draw the full frame: grid, then summary, cursor and message lines.
pub fn draw<W: Write>(
    out: &mut W,
    snap: &Snapshot,
    cursor: Point,
    message: &str,
    playing: bool,
) -> io::Result<()> {
    for y in 0..snap.height {
        queue!(out, MoveTo(0, y as u16))?;
        for x in 0..snap.width {
            let p = Point::new(x, y);
            let bg = kind_color(snap.kind_at(p));
            let glyph = if p == cursor { "[]" } else { "  " };
            queue!(
                out,
                SetBackgroundColor(bg),
                SetForegroundColor(COL_CURSOR),
                Print(glyph)
            )?;
        }
        queue!(out, ResetColor)?;
    }

    let lines = [
        summary(snap, playing),
        inspect(snap, cursor),
        message.to_string(),
        HELP.to_string(),
    ];
    for (i, line) in lines.iter().enumerate() {
        let row = snap.height as u16 + 1 + i as u16;
        queue!(out, MoveTo(0, row), Clear(ClearType::CurrentLine), Print(line))?;
    }
    out.flush()
}
