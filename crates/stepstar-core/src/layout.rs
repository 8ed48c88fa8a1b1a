//! Text layouts: build a [`Grid`] from ASCII art and render it back.
//!
//! | Char | Meaning |
//! |---|---|
//! | `#` | wall |
//! | `.` | open cell |
//! | `S` | start (exactly one) |
//! | `E` | end (exactly one) |
//!
//! Lines are separated by `'\n'` and must all have the same width.
//! Surrounding whitespace of the whole text is ignored.

use std::fmt;

use crate::geom::Point;
use crate::grid::Grid;

pub const WALL: char = '#';
pub const FLOOR: char = '.';
pub const START: char = 'S';
pub const END: char = 'E';

impl Grid {
    /// Parse a grid layout. See the [module docs](crate::layout).
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LayoutError::Empty);
        }
        let rows: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        let width = rows[0].chars().count();
        if rows.iter().any(|r| r.chars().count() != width) {
            return Err(LayoutError::InconsistentSize(text.to_string()));
        }

        let mut walls = Vec::new();
        let mut start = None;
        let mut end = None;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                let slot = match ch {
                    WALL => {
                        walls.push(pos);
                        continue;
                    }
                    FLOOR => continue,
                    START => &mut start,
                    END => &mut end,
                    _ => return Err(LayoutError::InvalidChar { ch, pos }),
                };
                if slot.replace(pos).is_some() {
                    return Err(LayoutError::DuplicateEndpoint { ch, pos });
                }
            }
        }

        let start = start.ok_or(LayoutError::MissingEndpoint(START))?;
        let end = end.ok_or(LayoutError::MissingEndpoint(END))?;
        let mut grid = Grid::open(width as i32, rows.len() as i32, start, end);
        for p in walls {
            // `#` never shares a cell with `S` or `E`.
            grid.set_wall(p, true).ok();
        }
        Ok(grid)
    }

    /// Render the grid walls and endpoints in the layout format.
    ///
    /// When start and end coincide, the cell is written as `S`, so such a
    /// layout does not parse back.
    pub fn to_layout(&self) -> String {
        let mut out = String::with_capacity(self.len() + self.height() as usize);
        for (p, cell) in self.iter() {
            if p.x == 0 && p.y > 0 {
                out.push('\n');
            }
            let ch = if p == self.start() {
                START
            } else if p == self.end() {
                END
            } else if cell.wall {
                WALL
            } else {
                FLOOR
            };
            out.push(ch);
        }
        out
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// No content at all.
    Empty,
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character outside `#.SE` was found.
    InvalidChar { ch: char, pos: Point },
    /// `S` or `E` is missing.
    MissingEndpoint(char),
    /// `S` or `E` appears more than once.
    DuplicateEndpoint { ch: char, pos: Point },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("layout: empty"),
            Self::InconsistentSize(s) => write!(f, "layout: inconsistent size:\n{s}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout: invalid char \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingEndpoint(ch) => write!(f, "layout: no \u{201c}{ch}\u{201d} cell"),
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "layout: second \u{201c}{ch}\u{201d} cell at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
