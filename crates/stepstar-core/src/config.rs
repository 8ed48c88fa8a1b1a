//! Construction parameters for a [`Grid`](crate::Grid).

use crate::geom::Point;

/// Side length used when nothing else is configured.
pub const DEFAULT_SIZE: i32 = 15;

/// Grid dimensions and initial endpoints.
///
/// The endpoints given here are also the ones restored by
/// [`Grid::reset_all`](crate::Grid::reset_all).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub end: Point,
}

impl GridConfig {
    /// A `width × height` grid with endpoints in opposite corners.
    pub fn sized(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            start: Point::ZERO,
            end: Point::new(width - 1, height - 1),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::sized(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}
