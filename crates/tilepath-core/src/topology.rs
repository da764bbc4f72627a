//! Adjacency topologies.
//!
//! A [`Topology`] decides which cells are adjacent to a given cell. Neighbor
//! order is fixed per topology: the search engine breaks ties between equally
//! promising candidates by the order in which they were emitted here.

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::geom::Coord;

/// The adjacency rule set of a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Topology {
    /// Four cardinal neighbors: N, E, S, W.
    #[default]
    Square,
    /// Hexagons in rows, axial offsets leaning up-left.
    HexHorizontal,
    /// Hexagons in columns; the mirror rotation of [`Topology::HexHorizontal`].
    HexVertical,
    /// All eight compass neighbors.
    OctoSquare,
    /// Alternating up/down triangles; adjacency depends on column parity.
    Triangle,
}

const SQUARE: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const HEX_HORIZONTAL: [(i32, i32); 6] = [(0, -1), (1, -1), (1, 0), (0, 1), (-1, 0), (-1, -1)];
const HEX_VERTICAL: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (0, -1), (-1, -1)];
const OCTO_SQUARE: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];
const TRIANGLE_EVEN: [(i32, i32); 3] = [(-1, 0), (0, 1), (1, 0)];
const TRIANGLE_ODD: [(i32, i32); 3] = [(-1, 0), (0, -1), (1, 0)];

impl Topology {
    /// Every topology, in declaration order.
    pub const ALL: [Topology; 5] = [
        Topology::Square,
        Topology::HexHorizontal,
        Topology::HexVertical,
        Topology::OctoSquare,
        Topology::Triangle,
    ];

    /// Number of neighbors every cell has under this topology.
    #[inline]
    pub const fn degree(self) -> usize {
        match self {
            Topology::Square => 4,
            Topology::HexHorizontal | Topology::HexVertical => 6,
            Topology::OctoSquare => 8,
            Topology::Triangle => 3,
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Topology::Square => "Square",
            Topology::HexHorizontal => "Hex-Horizontal",
            Topology::HexVertical => "Hex-Vertical",
            Topology::OctoSquare => "Octo-Square",
            Topology::Triangle => "Triangle",
        }
    }

    fn offsets(self, c: Coord) -> &'static [(i32, i32)] {
        match self {
            Topology::Square => &SQUARE,
            Topology::HexHorizontal => &HEX_HORIZONTAL,
            Topology::HexVertical => &HEX_VERTICAL,
            Topology::OctoSquare => &OCTO_SQUARE,
            Topology::Triangle if c.x.rem_euclid(2) == 0 => &TRIANGLE_EVEN,
            Topology::Triangle => &TRIANGLE_ODD,
        }
    }

    /// Ordered neighbors of `c`.
    #[inline]
    pub fn neighbors(self, c: Coord) -> Neighbors {
        let mut n = Neighbors::default();
        for &(dx, dy) in self.offsets(c) {
            n.push(c.shift(dx, dy));
        }
        n
    }
}

/// Resolve neighbors from a topology name.
///
/// Unknown names are logged and treated as a dead end: no neighbors.
pub fn neighbors_by_name(name: &str, c: Coord) -> Neighbors {
    match name.parse::<Topology>() {
        Ok(t) => t.neighbors(c),
        Err(e) => {
            log::warn!("{e}; treating {c} as a dead end");
            Neighbors::default()
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown topology name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTopologyError(String);

impl fmt::Display for ParseTopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown topology: {:?}", self.0)
    }
}

impl std::error::Error for ParseTopologyError {}

impl FromStr for Topology {
    type Err = ParseTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topology::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ParseTopologyError(s.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Neighbors
// ---------------------------------------------------------------------------

/// Fixed-capacity, ordered list of neighbor coordinates.
///
/// Holds at most eight entries (the [`Topology::OctoSquare`] degree) inline,
/// so neighbor queries in the search loop never allocate.
#[derive(Copy, Clone, Debug, Default)]
pub struct Neighbors {
    buf: [Coord; 8],
    len: usize,
}

impl Neighbors {
    #[inline]
    fn push(&mut self, c: Coord) {
        self.buf[self.len] = c;
        self.len += 1;
    }
}

impl Deref for Neighbors {
    type Target = [Coord];

    #[inline]
    fn deref(&self) -> &[Coord] {
        &self.buf[..self.len]
    }
}

impl PartialEq for Neighbors {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl Eq for Neighbors {}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a Coord;
    type IntoIter = std::slice::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
