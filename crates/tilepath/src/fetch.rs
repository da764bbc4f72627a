//! Pricing adapter between coordinates and the caller's metrics.

use rustc_hash::FxHashMap;
use tilepath_core::{CoordArena, CoordId};

use crate::distance;
use crate::options::{Cost, Metric};
use crate::traits::Tiles;

/// Outcome of pricing one `(tile, from)` pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fetch {
    /// Both ends are the same cell. Nothing was asked of the metric.
    Stay,
    /// The edge cannot be used.
    Impassable,
    Cost(Cost),
}

impl Fetch {
    /// The cost, with [`Fetch::Stay`] counting as zero.
    #[inline]
    pub fn cost(self) -> Option<Cost> {
        match self {
            Fetch::Stay => Some(0),
            Fetch::Impassable => None,
            Fetch::Cost(c) => Some(c),
        }
    }
}

/// Resolves coordinate pairs to tiles and prices them with a [`Metric`],
/// optionally memoizing results per ordered `(tile, from)` pair.
///
/// A fetcher holds per-search state and must not outlive the arena whose
/// ids it caches.
#[derive(Debug, Default)]
pub struct Fetcher {
    cache: Option<FxHashMap<(CoordId, CoordId), Fetch>>,
}

impl Fetcher {
    /// A fetcher that asks the metric every time.
    pub fn new() -> Self {
        Self { cache: None }
    }

    /// A fetcher that remembers every answer.
    pub fn memoized() -> Self {
        Self {
            cache: Some(FxHashMap::default()),
        }
    }

    /// Price moving onto `tile` from `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` has no tile: the engine only prices edges out of
    /// cells it already accepted, so this means the caller's tile mapping
    /// contradicts itself.
    pub fn fetch<M: Tiles>(
        &mut self,
        tiles: &M,
        arena: &CoordArena,
        metric: &Metric<M::Tile>,
        tile: CoordId,
        from: CoordId,
    ) -> Fetch {
        if tile == from {
            return Fetch::Stay;
        }
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(&(tile, from))) {
            return *hit;
        }

        let out = Self::price(tiles, arena, metric, tile, from);
        if let Some(cache) = self.cache.as_mut() {
            cache.insert((tile, from), out);
        }
        out
    }

    fn price<M: Tiles>(
        tiles: &M,
        arena: &CoordArena,
        metric: &Metric<M::Tile>,
        tile: CoordId,
        from: CoordId,
    ) -> Fetch {
        let to_coord = arena.coord(tile);
        let from_coord = arena.coord(from);
        let Some(to_tile) = tiles.tile(to_coord) else {
            return Fetch::Impassable;
        };
        let Some(from_tile) = tiles.tile(from_coord) else {
            panic!("no tile at {from_coord}, which the search already accepted");
        };
        let cost = match metric {
            Metric::Manhattan => Some(distance::manhattan(
                tiles.coord(&to_tile),
                tiles.coord(&from_tile),
            )),
            Metric::Custom(f) => f(&to_tile, &from_tile),
        };
        cost.map_or(Fetch::Impassable, Fetch::Cost)
    }

    /// Number of memoized pairs.
    pub fn cached(&self) -> usize {
        self.cache.as_ref().map_or(0, |c| c.len())
    }
}
