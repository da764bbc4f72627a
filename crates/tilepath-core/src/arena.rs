//! Coordinate arena.
//!
//! The arena canonicalizes `(x, y)` pairs into small [`CoordId`] handles. Two
//! handles from the same arena are equal exactly when they name the same
//! cell, so the search engine compares and hashes ids instead of coordinates.

use rustc_hash::FxHashMap;

use crate::geom::Coord;
use crate::topology::Topology;

/// Canonical handle for a coordinate, valid within the arena that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordId(u32);

impl CoordId {
    /// Slot index of this handle in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Grow-only interner for grid coordinates.
#[derive(Debug, Default, Clone)]
pub struct CoordArena {
    ids: FxHashMap<Coord, CoordId>,
    coords: Vec<Coord>,
}

impl CoordArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the canonical handle for `(x, y)`, creating it on first use.
    #[inline]
    pub fn get(&mut self, x: i32, y: i32) -> CoordId {
        self.intern(Coord::new(x, y))
    }

    /// Return the canonical handle for `c`, creating it on first use.
    pub fn intern(&mut self, c: Coord) -> CoordId {
        if let Some(&id) = self.ids.get(&c) {
            return id;
        }
        let id = CoordId(self.coords.len() as u32);
        self.coords.push(c);
        self.ids.insert(c, id);
        id
    }

    /// Look up an existing handle without creating one.
    #[inline]
    pub fn find(&self, c: Coord) -> Option<CoordId> {
        self.ids.get(&c).copied()
    }

    /// The coordinate named by `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different arena with more entries.
    #[inline]
    pub fn coord(&self, id: CoordId) -> Coord {
        self.coords[id.index()]
    }

    /// Number of distinct coordinates interned so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether nothing has been interned yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Append the canonical neighbors of `id` under `topology` into `buf`.
    /// The caller clears `buf` before calling.
    pub fn neighbors(&mut self, id: CoordId, topology: Topology, buf: &mut Vec<CoordId>) {
        let c = self.coord(id);
        for &n in &topology.neighbors(c) {
            buf.push(self.intern(n));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pair_same_handle() {
        let mut arena = CoordArena::new();
        let a = arena.get(3, 4);
        let b = arena.get(3, 4);
        assert_eq!(a, b);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.coord(a), Coord::new(3, 4));
    }

    #[test]
    fn distinct_pairs_distinct_handles() {
        let mut arena = CoordArena::new();
        let a = arena.get(3, 4);
        let b = arena.get(4, 3);
        assert_ne!(a, b);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn find_does_not_grow() {
        let mut arena = CoordArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.find(Coord::new(1, 1)), None);
        let id = arena.get(1, 1);
        assert_eq!(arena.find(Coord::new(1, 1)), Some(id));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn neighbors_revisit_yields_identical_handles() {
        let mut arena = CoordArena::new();
        let origin = arena.get(0, 0);
        let mut buf = Vec::new();
        arena.neighbors(origin, Topology::Square, &mut buf);
        assert_eq!(buf.len(), 4);

        // East neighbor's west neighbor is the origin again.
        let east = buf[1];
        assert_eq!(arena.coord(east), Coord::new(1, 0));
        let mut back = Vec::new();
        arena.neighbors(east, Topology::Square, &mut back);
        assert_eq!(back[3], origin);
    }
}
