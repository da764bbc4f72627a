//! Search results and per-extension progress records.

use tilepath_core::Coord;

use crate::options::Cost;

/// A route returned by a search, start tile first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route<T> {
    pub tiles: Vec<T>,
    /// Incoming edge cost of each tile, parallel to `tiles` (the start tile
    /// costs 0). Present only when costs were requested.
    pub costs: Option<Vec<Cost>>,
    /// Sum of edge costs along the route.
    pub cost: Cost,
    /// Heuristic estimate left to the goal; 0 for complete routes.
    pub estimate: Cost,
    /// Whether the route ends at the goal.
    pub complete: bool,
}

impl<T> Route<T> {
    /// Number of tiles, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Never true for routes produced by a search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Number of steps taken: tiles minus one.
    #[inline]
    pub fn hops(&self) -> usize {
        self.tiles.len().saturating_sub(1)
    }

    /// `cost + estimate`, the key routes are ranked by.
    #[inline]
    pub fn total(&self) -> Cost {
        self.cost.saturating_add(self.estimate)
    }

    /// Tiles paired with their incoming cost, when costs were requested.
    pub fn steps(&self) -> impl Iterator<Item = (&T, Option<Cost>)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (t, self.costs.as_ref().map(|c| c[i])))
    }
}

/// One accepted frontier extension.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expansion {
    pub from: Coord,
    pub to: Coord,
    pub cost_sum: Cost,
    pub estimate: Cost,
    pub total: Cost,
    /// Tiles on the extended route.
    pub tiles: usize,
    pub reached_goal: bool,
}
