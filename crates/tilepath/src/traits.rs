//! The tile adapter seam between caller maps and the search engine.

use tilepath_core::{Coord, Topology};

/// Bidirectional mapping between caller-defined tiles and grid coordinates.
///
/// The engine never inspects tiles; it only converts them to coordinates
/// on the way in and back to tiles on the way out.
pub trait Tiles {
    /// Whatever value represents one tile.
    type Tile: Clone;

    /// Grid coordinate of `tile`.
    fn coord(&self, tile: &Self::Tile) -> Coord;

    /// Tile at `coord`, or `None` when there is no tile there (off-map).
    fn tile(&self, coord: Coord) -> Option<Self::Tile>;

    /// Topology used to find the neighbors of `coord`.
    ///
    /// Defaults to the pathfinder-wide topology; override for maps that mix
    /// adjacency rules per region.
    fn topology_at(&self, coord: Coord, default: Topology) -> Topology {
        let _ = coord;
        default
    }
}

impl<M: Tiles + ?Sized> Tiles for &M {
    type Tile = M::Tile;

    #[inline]
    fn coord(&self, tile: &Self::Tile) -> Coord {
        (**self).coord(tile)
    }

    #[inline]
    fn tile(&self, coord: Coord) -> Option<Self::Tile> {
        (**self).tile(coord)
    }

    #[inline]
    fn topology_at(&self, coord: Coord, default: Topology) -> Topology {
        (**self).topology_at(coord, default)
    }
}

/// [`Tiles`] built from a pair of closures.
pub struct FnTiles<T, To, From> {
    to_coord: To,
    from_coord: From,
    _tile: std::marker::PhantomData<fn() -> T>,
}

impl<T, To, From> FnTiles<T, To, From>
where
    T: Clone,
    To: Fn(&T) -> Coord,
    From: Fn(Coord) -> Option<T>,
{
    /// Wrap `to_coord` / `from_coord` as a tile adapter.
    pub fn new(to_coord: To, from_coord: From) -> Self {
        Self {
            to_coord,
            from_coord,
            _tile: std::marker::PhantomData,
        }
    }
}

impl<T, To, From> Tiles for FnTiles<T, To, From>
where
    T: Clone,
    To: Fn(&T) -> Coord,
    From: Fn(Coord) -> Option<T>,
{
    type Tile = T;

    #[inline]
    fn coord(&self, tile: &T) -> Coord {
        (self.to_coord)(tile)
    }

    #[inline]
    fn tile(&self, coord: Coord) -> Option<T> {
        (self.from_coord)(coord)
    }
}
