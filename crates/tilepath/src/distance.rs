//! Grid distances, usable as metrics or heuristics.

use tilepath_core::Coord;

use crate::options::Cost;

/// Manhattan (L1) distance between two coordinates.
#[inline]
pub fn manhattan(a: Coord, b: Coord) -> Cost {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two coordinates.
#[inline]
pub fn chebyshev(a: Coord, b: Coord) -> Cost {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
