//! Multi-route A* search over caller-defined tiles.
//!
//! Unlike a classic A*, the search keeps whole route candidates rather than
//! one best parent per cell: the same cell may appear in many frontier
//! entries, reached along different routes. That is what allows k-best
//! enumeration, loop suppression over the full route prefix, and padding
//! the result with unfinished attempts.

use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tilepath_core::{CoordArena, CoordId, Topology};

use crate::error::SearchResult;
use crate::fetch::{Fetch, Fetcher};
use crate::frontier::Frontier;
use crate::observe::{LogObserver, Rejection, SearchEvent, SearchObserver};
use crate::options::{Cost, Metric, SearchOptions, Strategy};
use crate::ordering::{Priority, compare_by_priority};
use crate::route::{Expansion, Route};
use crate::traits::Tiles;

// ---------------------------------------------------------------------------
// Pathfinder
// ---------------------------------------------------------------------------

/// Entry point: a tile adapter plus default topology and metrics.
///
/// All searches take `&self` and build their own arena, frontier and caches,
/// so one pathfinder can serve any number of searches at once.
pub struct Pathfinder<M: Tiles> {
    tiles: M,
    topology: Topology,
    cost: Metric<M::Tile>,
    estimate: Metric<M::Tile>,
    observer: Arc<dyn SearchObserver>,
}

/// Builder for [`Pathfinder`].
pub struct PathfinderBuilder<M: Tiles> {
    tiles: M,
    topology: Topology,
    cost: Metric<M::Tile>,
    estimate: Metric<M::Tile>,
    observer: Arc<dyn SearchObserver>,
}

impl<M: Tiles> PathfinderBuilder<M> {
    /// Adjacency rule set. Default [`Topology::Square`].
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Edge-cost metric. Default [`Metric::Manhattan`].
    pub fn cost(mut self, metric: Metric<M::Tile>) -> Self {
        self.cost = metric;
        self
    }

    /// Heuristic metric. Default [`Metric::Manhattan`].
    pub fn estimate(mut self, metric: Metric<M::Tile>) -> Self {
        self.estimate = metric;
        self
    }

    /// Event sink. Default [`LogObserver`].
    pub fn observer(mut self, observer: impl SearchObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn build(self) -> Pathfinder<M> {
        Pathfinder {
            tiles: self.tiles,
            topology: self.topology,
            cost: self.cost,
            estimate: self.estimate,
            observer: self.observer,
        }
    }
}

impl<M: Tiles> Pathfinder<M> {
    /// Pathfinder with every default: square grid, Manhattan cost and estimate.
    pub fn new(tiles: M) -> Self {
        Self::builder(tiles).build()
    }

    pub fn builder(tiles: M) -> PathfinderBuilder<M> {
        PathfinderBuilder {
            tiles,
            topology: Topology::Square,
            cost: Metric::Manhattan,
            estimate: Metric::Manhattan,
            observer: Arc::new(LogObserver),
        }
    }

    #[inline]
    pub fn tiles(&self) -> &M {
        &self.tiles
    }

    #[inline]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Start a stepwise search.
    ///
    /// Options are validated before anything is allocated. The returned
    /// [`SearchRun`] yields one [`Expansion`] per accepted extension; drop it
    /// to cancel, or call [`SearchRun::into_routes`] to finish.
    pub fn search(
        &self,
        start: &M::Tile,
        goal: &M::Tile,
        opts: &SearchOptions<M::Tile>,
    ) -> SearchResult<SearchRun<'_, M>> {
        opts.validate()?;
        Ok(SearchRun::new(self, start, goal, opts))
    }

    /// Run a search to completion. Routes come back best first.
    pub fn find_routes(
        &self,
        start: &M::Tile,
        goal: &M::Tile,
        opts: &SearchOptions<M::Tile>,
    ) -> SearchResult<Vec<Route<M::Tile>>> {
        Ok(self.search(start, goal, opts)?.into_routes())
    }

    /// Number of steps between two tiles, counting every step as 1.
    ///
    /// Uses the `Fast` strategy. `None` when `b` is unreachable from `a`.
    pub fn distance(&self, a: &M::Tile, b: &M::Tile) -> SearchResult<Option<usize>> {
        let opts = SearchOptions::new()
            .strategy(Strategy::Fast)
            .cost(Metric::unit());
        let routes = self.find_routes(a, b, &opts)?;
        Ok(routes.first().map(Route::hops))
    }

    #[inline]
    pub(crate) fn emit(&self, event: SearchEvent) {
        self.observer.on_event(&event);
    }
}

// ---------------------------------------------------------------------------
// Route nodes
// ---------------------------------------------------------------------------

/// Immutable route candidate. The route itself is recovered by walking
/// `parent` links back to the start node.
#[derive(Copy, Clone, Debug)]
struct RouteNode {
    coord: CoordId,
    parent: Option<usize>,
    /// Cost of the edge into `coord`.
    step_cost: Cost,
    cost_sum: Cost,
    estimate: Cost,
    total: Cost,
    tiles: usize,
    /// Whether any extension of this node was accepted.
    extended: bool,
}

// ---------------------------------------------------------------------------
// SearchRun
// ---------------------------------------------------------------------------

/// One in-flight search.
///
/// Iterating a `SearchRun` drives the search forward and yields every
/// accepted frontier extension. The sequence is finite and cannot be
/// restarted. Stopping early simply abandons the search.
pub struct SearchRun<'p, M: Tiles> {
    finder: &'p Pathfinder<M>,
    opts: SearchOptions<M::Tile>,
    cost: Metric<M::Tile>,
    estimate: Metric<M::Tile>,
    arena: CoordArena,
    nodes: Vec<RouteNode>,
    frontier: Frontier<usize>,
    touched: FxHashMap<CoordId, u32>,
    successes: Vec<usize>,
    /// The lowest `routes` success totals seen so far, largest on top.
    best_totals: BinaryHeap<Cost>,
    cost_fetch: Fetcher,
    estimate_fetch: Fetcher,
    goal: CoordId,
    ceiling: Option<Cost>,
    pending: VecDeque<Expansion>,
    nbuf: Vec<CoordId>,
    expansions: usize,
    done: bool,
}

impl<'p, M: Tiles> SearchRun<'p, M> {
    fn new(
        finder: &'p Pathfinder<M>,
        start: &M::Tile,
        goal: &M::Tile,
        opts: &SearchOptions<M::Tile>,
    ) -> Self {
        let mut arena = CoordArena::new();
        let start_coord = finder.tiles.coord(start);
        let goal_coord = finder.tiles.coord(goal);
        let start_id = arena.intern(start_coord);
        let goal_id = arena.intern(goal_coord);

        let fetcher = |memo: bool| if memo { Fetcher::memoized() } else { Fetcher::new() };
        let mut run = Self {
            finder,
            opts: opts.clone(),
            cost: opts.cost.clone().unwrap_or_else(|| finder.cost.clone()),
            estimate: opts
                .estimate
                .clone()
                .unwrap_or_else(|| finder.estimate.clone()),
            arena,
            nodes: vec![RouteNode {
                coord: start_id,
                parent: None,
                step_cost: 0,
                cost_sum: 0,
                estimate: 0,
                total: 0,
                tiles: 1,
                extended: false,
            }],
            frontier: Frontier::new(opts.tie_break),
            touched: FxHashMap::default(),
            successes: Vec::new(),
            best_totals: BinaryHeap::with_capacity(opts.routes.min(64)),
            cost_fetch: fetcher(opts.cache_costs),
            estimate_fetch: fetcher(opts.cache_estimates),
            goal: goal_id,
            ceiling: opts.max_depth,
            pending: VecDeque::new(),
            nbuf: Vec::with_capacity(8),
            expansions: 0,
            done: false,
        };

        finder.emit(SearchEvent::Started {
            start: start_coord,
            goal: goal_coord,
            strategy: opts.strategy,
        });
        if start_id == goal_id {
            run.successes.push(0);
            finder.emit(SearchEvent::RouteFound { total: 0, tiles: 1 });
            run.finish();
        } else {
            run.frontier.push(0, 0, 0);
        }
        run
    }

    /// Number of frontier entries awaiting expansion.
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Number of routes that reached the goal so far.
    pub fn routes_found(&self) -> usize {
        self.successes.len()
    }

    /// Number of frontier entries expanded so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Whether the search has terminated.
    pub fn is_finished(&self) -> bool {
        self.done && self.pending.is_empty()
    }

    /// Drive the search to termination and assemble the result.
    pub fn into_routes(mut self) -> Vec<Route<M::Tile>> {
        for _ in self.by_ref() {}

        let wanted = self.opts.routes;
        let mut ids = self.successes.clone();
        self.rank(&mut ids);

        let mut keep = ids.len().min(wanted);
        if self.opts.include_ties && keep > 0 {
            let last = self.nodes[ids[keep - 1]].total;
            while keep < ids.len() && self.nodes[ids[keep]].total == last {
                keep += 1;
            }
        }
        ids.truncate(keep);

        if ids.len() < wanted && self.opts.include_incomplete {
            let mut leaves: Vec<usize> = (0..self.nodes.len())
                .filter(|&i| !self.nodes[i].extended && self.nodes[i].coord != self.goal)
                .collect();
            self.rank(&mut leaves);
            leaves.truncate(wanted - ids.len());
            ids.extend(leaves);
        }

        ids.into_iter().map(|id| self.assemble(id)).collect()
    }

    // -----------------------------------------------------------------------
    // State machine
    // -----------------------------------------------------------------------

    fn step(&mut self) {
        if self.opts.strategy == Strategy::Fast && self.successes.len() >= self.opts.routes {
            return self.finish();
        }
        let Some((id, total)) = self.frontier.pop() else {
            return self.finish();
        };
        let node = self.nodes[id];

        if self.ceiling.is_some_and(|c| total > c) {
            // The frontier is ordered by total and the ceiling only drops,
            // so nothing left in it can be expanded either.
            self.prune(node);
            return self.finish();
        }
        if self.opts.max_distance.is_some_and(|d| node.tiles >= d) {
            return self.prune(node);
        }

        self.expand(id, node);
    }

    fn expand(&mut self, id: usize, node: RouteNode) {
        self.expansions += 1;
        let from = self.arena.coord(node.coord);
        let topology = self.finder.tiles.topology_at(from, self.finder.topology);

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.arena.neighbors(node.coord, topology, &mut nbuf);

        for &next in nbuf.iter() {
            if let Err(reason) = self.try_extend(id, &node, next) {
                self.finder.emit(SearchEvent::Rejected {
                    from,
                    to: self.arena.coord(next),
                    reason,
                });
            }
        }

        self.nbuf = nbuf;
    }

    fn try_extend(&mut self, id: usize, node: &RouteNode, next: CoordId) -> Result<(), Rejection> {
        if !self.opts.include_loops && self.on_route(id, next) {
            return Err(Rejection::Loop);
        }
        let touched = self.touched.get(&next).copied().unwrap_or(0);
        if self.opts.strategy == Strategy::Fast && touched > self.opts.revisit_budget {
            return Err(Rejection::RevisitBudget);
        }

        let tiles = &self.finder.tiles;
        let step_cost = match self
            .cost_fetch
            .fetch(tiles, &self.arena, &self.cost, next, node.coord)
        {
            Fetch::Cost(c) => c,
            Fetch::Impassable => return Err(Rejection::Impassable),
            Fetch::Stay => return Err(Rejection::Loop),
        };
        let estimate = self
            .estimate_fetch
            .fetch(tiles, &self.arena, &self.estimate, self.goal, next)
            .cost()
            .ok_or(Rejection::Unreachable)?;

        let cost_sum = node.cost_sum.saturating_add(step_cost);
        let total = cost_sum.saturating_add(estimate);
        let reached_goal = next == self.goal;
        if reached_goal && self.opts.max_depth.is_some_and(|d| total > d) {
            self.finder.emit(SearchEvent::Pruned {
                at: self.arena.coord(next),
                total,
            });
            return Ok(());
        }

        let touched = touched + 1;
        self.touched.insert(next, touched);
        let child = self.nodes.len();
        self.nodes.push(RouteNode {
            coord: next,
            parent: Some(id),
            step_cost,
            cost_sum,
            estimate,
            total,
            tiles: node.tiles + 1,
            extended: false,
        });
        self.nodes[id].extended = true;

        let expansion = Expansion {
            from: self.arena.coord(node.coord),
            to: self.arena.coord(next),
            cost_sum,
            estimate,
            total,
            tiles: node.tiles + 1,
            reached_goal,
        };
        self.finder.emit(SearchEvent::Expanded(expansion));
        self.pending.push_back(expansion);

        if reached_goal {
            self.successes.push(child);
            self.finder.emit(SearchEvent::RouteFound {
                total,
                tiles: node.tiles + 1,
            });
            self.tighten_ceiling(total);
        } else {
            self.frontier.push(child, total, touched);
        }
        Ok(())
    }

    /// Whether `c` already lies on the route ending at node `at`.
    fn on_route(&self, at: usize, c: CoordId) -> bool {
        let mut cur = Some(at);
        while let Some(i) = cur {
            let n = &self.nodes[i];
            if n.coord == c {
                return true;
            }
            cur = n.parent;
        }
        false
    }

    /// Once `routes` successes are known, nothing costlier than the worst of
    /// the best `routes` can make it into the result.
    fn tighten_ceiling(&mut self, total: Cost) {
        let wanted = self.opts.routes;
        let kth = if wanted == 1 {
            total
        } else {
            if self.best_totals.len() < wanted {
                self.best_totals.push(total);
            } else if let Some(mut top) = self.best_totals.peek_mut() {
                if total < *top {
                    *top = total;
                }
            }
            match self.best_totals.peek() {
                Some(&top) if self.best_totals.len() == wanted => top,
                _ => return,
            }
        };
        self.ceiling = Some(self.ceiling.map_or(kth, |c| c.min(kth)));
    }

    fn prune(&self, node: RouteNode) {
        self.finder.emit(SearchEvent::Pruned {
            at: self.arena.coord(node.coord),
            total: node.total,
        });
    }

    fn finish(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        self.finder.emit(SearchEvent::Finished {
            routes: self.successes.len(),
            expansions: self.expansions,
        });
    }

    // -----------------------------------------------------------------------
    // Result assembly
    // -----------------------------------------------------------------------

    /// Sort node ids by `(total, tiles)`. The sort is stable, so equal keys
    /// keep discovery order.
    fn rank(&self, ids: &mut [usize]) {
        ids.sort_by(|&a, &b| {
            let (a, b) = (&self.nodes[a], &self.nodes[b]);
            compare_by_priority(
                &[Priority::from(a.total), Priority::from(a.tiles)],
                &[Priority::from(b.total), Priority::from(b.tiles)],
                None,
            )
        });
    }

    fn assemble(&self, id: usize) -> Route<M::Tile> {
        let end = &self.nodes[id];
        let mut chain = Vec::with_capacity(end.tiles);
        let mut cur = Some(id);
        while let Some(i) = cur {
            chain.push(i);
            cur = self.nodes[i].parent;
        }
        chain.reverse();

        let tiles = chain
            .iter()
            .map(|&i| self.tile_at(self.nodes[i].coord))
            .collect();
        let costs = self
            .opts
            .include_costs
            .then(|| chain.iter().map(|&i| self.nodes[i].step_cost).collect());

        Route {
            tiles,
            costs,
            cost: end.cost_sum,
            estimate: end.estimate,
            complete: end.coord == self.goal,
        }
    }

    fn tile_at(&self, id: CoordId) -> M::Tile {
        let c = self.arena.coord(id);
        match self.finder.tiles.tile(c) {
            Some(t) => t,
            None => panic!("no tile at {c}, which the search already accepted"),
        }
    }
}

impl<M: Tiles> Iterator for SearchRun<'_, M> {
    type Item = Expansion;

    fn next(&mut self) -> Option<Expansion> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                return Some(e);
            }
            if self.done {
                return None;
            }
            self.step();
        }
    }
}

impl<M: Tiles> std::iter::FusedIterator for SearchRun<'_, M> {}

#[cfg(test)]
mod tests {
    use super::*;
    use tilepath_core::{Coord, Range};

    use crate::traits::FnTiles;

    fn open(w: i32, h: i32) -> impl Tiles<Tile = Coord> {
        let r = Range::new(0, 0, w, h);
        FnTiles::new(|c: &Coord| *c, move |c: Coord| r.contains(c).then_some(c))
    }

    #[test]
    fn start_is_goal() {
        let pf = Pathfinder::new(open(3, 3));
        let c = Coord::new(1, 1);
        let routes = pf.find_routes(&c, &c, &SearchOptions::new()).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].tiles, vec![c]);
        assert_eq!(routes[0].cost, 0);
        assert!(routes[0].complete);
    }

    #[test]
    fn ceiling_tightens_to_kth_best() {
        let pf = Pathfinder::new(open(3, 3));
        let opts = SearchOptions::new().routes(2);
        let mut run = pf
            .search(&Coord::new(0, 0), &Coord::new(2, 0), &opts)
            .unwrap();
        for _ in run.by_ref() {}
        // Straight route costs 2; every detour around the 3x3 grid costs 4.
        assert_eq!(run.ceiling, Some(4));
        assert!(run.routes_found() >= 2);
        assert!(run.is_finished());
    }

    #[test]
    fn ceiling_tracks_kth_best_as_successes_arrive() {
        let pf = Pathfinder::new(open(2, 2));
        let opts = SearchOptions::new().routes(3);
        let mut run = pf
            .search(&Coord::new(0, 0), &Coord::new(1, 1), &opts)
            .unwrap();
        for t in [9, 7, 8] {
            run.tighten_ceiling(t);
        }
        assert_eq!(run.ceiling, Some(9));
        run.tighten_ceiling(3);
        assert_eq!(run.ceiling, Some(8));
        run.tighten_ceiling(10);
        assert_eq!(run.ceiling, Some(8));
        run.tighten_ceiling(1);
        assert_eq!(run.ceiling, Some(7));
        assert_eq!(run.best_totals.len(), 3);
    }

    #[test]
    fn tied_routes_on_a_large_open_grid_stay_linear() {
        // Every monotone route ties at the ceiling, so Best enumerates all
        // C(20, 10) of them.
        let pf = Pathfinder::new(open(11, 11));
        let started = std::time::Instant::now();
        let mut run = pf
            .search(&Coord::new(0, 0), &Coord::new(10, 10), &SearchOptions::new())
            .unwrap();
        for _ in run.by_ref() {}
        assert_eq!(run.routes_found(), 184_756);
        assert_eq!(run.ceiling, Some(20));
        assert!(
            started.elapsed() < std::time::Duration::from_secs(60),
            "took {:?}",
            started.elapsed()
        );
    }

    #[test]
    fn fast_stops_at_first_route() {
        let pf = Pathfinder::new(open(4, 4));
        let opts = SearchOptions::new().strategy(Strategy::Fast);
        let mut run = pf
            .search(&Coord::new(0, 0), &Coord::new(3, 3), &opts)
            .unwrap();
        let goal_events = run.by_ref().filter(|e| e.reached_goal).count();
        assert_eq!(goal_events, 1);
        assert_eq!(run.routes_found(), 1);
    }

    #[test]
    fn every_event_extends_a_known_cell() {
        let pf = Pathfinder::new(open(3, 3));
        let start = Coord::new(0, 0);
        let run = pf
            .search(&start, &Coord::new(2, 2), &SearchOptions::new())
            .unwrap();
        let mut seen = vec![start];
        for e in run {
            assert!(seen.contains(&e.from), "{} extended before being reached", e.from);
            assert_eq!(e.total, e.cost_sum + e.estimate);
            seen.push(e.to);
        }
    }

    #[test]
    fn dropping_a_run_abandons_it() {
        let pf = Pathfinder::new(open(5, 5));
        let mut run = pf
            .search(&Coord::new(0, 0), &Coord::new(4, 4), &SearchOptions::new())
            .unwrap();
        assert!(run.next().is_some());
        assert!(!run.is_finished());
        assert!(run.frontier_len() > 0);
        assert_eq!(run.expansions(), 1);
        drop(run);
    }
}
