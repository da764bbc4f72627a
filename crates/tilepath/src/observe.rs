//! Structured search events and the observer hook that receives them.
//!
//! The engine never writes output itself. Every notable step is described by
//! a [`SearchEvent`] handed to the pathfinder's [`SearchObserver`]; the
//! default [`LogObserver`] forwards them to the `log` facade.

use tilepath_core::Coord;

use crate::options::{Cost, Strategy};
use crate::route::Expansion;

/// Why a candidate extension was discarded.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The cell is already on the route.
    Loop,
    /// `Fast` revisit budget exhausted for the cell.
    RevisitBudget,
    /// The edge cost was impassable.
    Impassable,
    /// The heuristic marked the goal unreachable from the cell.
    Unreachable,
}

/// One step of a search, as reported to a [`SearchObserver`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SearchEvent {
    Started {
        start: Coord,
        goal: Coord,
        strategy: Strategy,
    },
    /// An extension was accepted onto the frontier (or reached the goal).
    Expanded(Expansion),
    Rejected {
        from: Coord,
        to: Coord,
        reason: Rejection,
    },
    /// A frontier entry fell outside the cost or length ceiling.
    Pruned { at: Coord, total: Cost },
    RouteFound { total: Cost, tiles: usize },
    Finished { routes: usize, expansions: usize },
    /// The search was abandoned through a cancel token.
    Cancelled { expansions: usize },
}

/// Receives search events. Must be cheap: it runs inside the search loop.
pub trait SearchObserver: Send + Sync {
    fn on_event(&self, event: &SearchEvent);
}

impl<O: SearchObserver + ?Sized> SearchObserver for std::sync::Arc<O> {
    #[inline]
    fn on_event(&self, event: &SearchEvent) {
        (**self).on_event(event);
    }
}

/// Forwards events to the `log` facade.
///
/// Lifecycle events go to `debug`, per-candidate events to `trace`.
#[derive(Copy, Clone, Debug, Default)]
pub struct LogObserver;

impl SearchObserver for LogObserver {
    fn on_event(&self, event: &SearchEvent) {
        match *event {
            SearchEvent::Started {
                start,
                goal,
                strategy,
            } => log::debug!("search {start} -> {goal} ({strategy:?})"),
            SearchEvent::Expanded(e) => {
                log::trace!("expand {} -> {} total={}", e.from, e.to, e.total)
            }
            SearchEvent::Rejected { from, to, reason } => {
                log::trace!("reject {from} -> {to}: {reason:?}")
            }
            SearchEvent::Pruned { at, total } => log::trace!("prune {at} total={total}"),
            SearchEvent::RouteFound { total, tiles } => {
                log::debug!("route found: cost {total}, {tiles} tiles")
            }
            SearchEvent::Finished { routes, expansions } => {
                log::debug!("search finished: {routes} routes after {expansions} expansions")
            }
            SearchEvent::Cancelled { expansions } => {
                log::debug!("search cancelled after {expansions} expansions")
            }
        }
    }
}

/// Discards every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    #[inline]
    fn on_event(&self, _: &SearchEvent) {}
}
