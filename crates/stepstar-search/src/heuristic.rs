use stepstar_core::Point;

/// Estimate of the remaining cost between two cells.
///
/// Implementations must never overestimate the true cost of a 4-way,
/// unit-cost walk between the two points (admissible), otherwise the paths
/// found are no longer guaranteed to be shortest.
pub trait Heuristic {
    fn estimate(&self, from: Point, to: Point) -> f64;
}

impl<F: Fn(Point, Point) -> f64> Heuristic for F {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        self(from, to)
    }
}

/// Straight-line (L2) distance between two points.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    (dx * dx + dy * dy).sqrt()
}

/// Manhattan (L1) distance between two points, as a float.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f64 {
    f64::from(a.manhattan(b))
}

/// The [`euclidean`] heuristic. This is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Heuristic for Euclidean {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        euclidean(from, to)
    }
}

/// The [`manhattan`] heuristic. Tighter than [`Euclidean`] without
/// diagonal moves, so it usually expands fewer cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        manhattan(from, to)
    }
}

/// Heuristic chosen at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeuristicKind {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic for HeuristicKind {
    #[inline]
    fn estimate(&self, from: Point, to: Point) -> f64 {
        match self {
            Self::Euclidean => euclidean(from, to),
            Self::Manhattan => manhattan(from, to),
        }
    }
}
