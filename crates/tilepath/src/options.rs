//! Search configuration.

use std::fmt;
use std::sync::Arc;

use crate::error::{SearchError, SearchResult};

/// Movement cost and heuristic unit. Negative values are taken literally.
pub type Cost = i32;

/// Revisit budget applied under [`Strategy::Fast`] unless overridden.
pub const DEFAULT_REVISIT_BUDGET: u32 = 3;

type MetricFn<T> = dyn Fn(&T, &T) -> Option<Cost> + Send + Sync;

/// A pricing function: `(tile, from)` → cost, `None` meaning impassable.
///
/// The same shape serves both as the edge-cost function and as the
/// heuristic estimate towards the goal.
pub enum Metric<T> {
    /// Manhattan distance between the coordinates of the two tiles.
    Manhattan,
    /// Caller-supplied function.
    Custom(Arc<MetricFn<T>>),
}

impl<T> Metric<T> {
    /// Wrap a closure as a metric.
    pub fn custom(f: impl Fn(&T, &T) -> Option<Cost> + Send + Sync + 'static) -> Self {
        Metric::Custom(Arc::new(f))
    }

    /// Every step costs 1.
    pub fn unit() -> Self {
        Metric::custom(|_, _| Some(1))
    }
}

impl<T> Default for Metric<T> {
    fn default() -> Self {
        Metric::Manhattan
    }
}

impl<T> Clone for Metric<T> {
    fn clone(&self) -> Self {
        match self {
            Metric::Manhattan => Metric::Manhattan,
            Metric::Custom(f) => Metric::Custom(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Metric<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Manhattan => f.write_str("Manhattan"),
            Metric::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How thoroughly the search runs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Stop at the first route found. Single route only, with bounded revisits.
    Fast,
    /// Exhaust the cost-bounded frontier so no cheaper route remains unexplored.
    #[default]
    Best,
}

/// Ordering among frontier entries with equal total cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TieBreak {
    /// Earlier insertions first.
    #[default]
    InsertionOrder,
    /// Entries whose last cell had been reached fewer times first, then
    /// insertion order. Steers equal-cost searches into unexplored space.
    LeastTouched,
}

/// Per-call search options.
///
/// ```
/// use tilepath::{SearchOptions, Strategy};
///
/// let opts: SearchOptions<char> = SearchOptions::new()
///     .strategy(Strategy::Best)
///     .routes(3)
///     .max_depth(40);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct SearchOptions<T> {
    pub strategy: Strategy,
    /// Number of routes wanted.
    pub routes: usize,
    /// Report the incoming edge cost of every tile.
    pub include_costs: bool,
    /// Allow a route to revisit a cell.
    pub include_loops: bool,
    /// Pad the result with unfinished routes when too few reach the goal.
    pub include_incomplete: bool,
    /// Keep routes tying in cost with the last requested one.
    pub include_ties: bool,
    /// Cost ceiling. Entries whose total exceeds it are not expanded.
    pub max_depth: Option<Cost>,
    /// Maximum number of tiles in a route.
    pub max_distance: Option<usize>,
    /// Edge-cost override for this call.
    pub cost: Option<Metric<T>>,
    /// Heuristic override for this call.
    pub estimate: Option<Metric<T>>,
    /// How many times a cell may be reached before `Fast` stops accepting it.
    pub revisit_budget: u32,
    pub tie_break: TieBreak,
    /// Memoize heuristic queries per `(goal, cell)` pair.
    pub cache_estimates: bool,
    /// Memoize edge-cost queries per `(to, from)` pair.
    pub cache_costs: bool,
}

impl<T> Default for SearchOptions<T> {
    fn default() -> Self {
        Self {
            strategy: Strategy::Best,
            routes: 1,
            include_costs: false,
            include_loops: false,
            include_incomplete: false,
            include_ties: false,
            max_depth: None,
            max_distance: None,
            cost: None,
            estimate: None,
            revisit_budget: DEFAULT_REVISIT_BUDGET,
            tie_break: TieBreak::InsertionOrder,
            cache_estimates: true,
            cache_costs: false,
        }
    }
}

impl<T> SearchOptions<T> {
    /// Default options: `Best`, one route, nothing included, unbounded.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn routes(mut self, routes: usize) -> Self {
        self.routes = routes;
        self
    }

    pub fn include_costs(mut self, yes: bool) -> Self {
        self.include_costs = yes;
        self
    }

    pub fn include_loops(mut self, yes: bool) -> Self {
        self.include_loops = yes;
        self
    }

    pub fn include_incomplete(mut self, yes: bool) -> Self {
        self.include_incomplete = yes;
        self
    }

    pub fn include_ties(mut self, yes: bool) -> Self {
        self.include_ties = yes;
        self
    }

    pub fn max_depth(mut self, depth: Cost) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn max_distance(mut self, tiles: usize) -> Self {
        self.max_distance = Some(tiles);
        self
    }

    pub fn cost(mut self, metric: Metric<T>) -> Self {
        self.cost = Some(metric);
        self
    }

    pub fn estimate(mut self, metric: Metric<T>) -> Self {
        self.estimate = Some(metric);
        self
    }

    pub fn revisit_budget(mut self, budget: u32) -> Self {
        self.revisit_budget = budget;
        self
    }

    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn cache_estimates(mut self, yes: bool) -> Self {
        self.cache_estimates = yes;
        self
    }

    pub fn cache_costs(mut self, yes: bool) -> Self {
        self.cache_costs = yes;
        self
    }

    /// Check every precondition. Called before a search creates any state.
    pub fn validate(&self) -> SearchResult<()> {
        if let Some(depth) = self.max_depth {
            if depth < 1 {
                return Err(SearchError::InvalidMaxDepth(depth));
            }
        }
        if self.max_distance == Some(0) {
            return Err(SearchError::InvalidMaxDistance);
        }
        if self.routes < 1 {
            return Err(SearchError::InvalidRouteCount);
        }
        if self.strategy == Strategy::Fast {
            let reason = if self.routes > 1 {
                Some("only one route can be requested")
            } else if self.include_loops {
                Some("loops cannot be included")
            } else if self.include_incomplete {
                Some("incomplete routes cannot be included")
            } else if self.include_ties {
                Some("ties cannot be included")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(SearchError::FastStrategy { reason });
            }
        }
        if self.include_loops && self.max_depth.is_none() && self.max_distance.is_none() {
            return Err(SearchError::UnboundedLoops);
        }
        Ok(())
    }
}
