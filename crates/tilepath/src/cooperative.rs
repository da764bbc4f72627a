//! Cooperative asynchronous search.
//!
//! The async entry point runs exactly the same state machine as
//! [`Pathfinder::find_routes`], but hands every accepted extension to a
//! progress callback and awaits it before continuing. Between events it
//! checks a [`CancelToken`]. The engine itself never spawns or sleeps; the
//! callback decides when to yield to the host scheduler.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{SearchError, SearchResult};
use crate::observe::SearchEvent;
use crate::options::SearchOptions;
use crate::route::{Expansion, Route};
use crate::search::Pathfinder;
use crate::traits::Tiles;

/// Shared flag used to stop an async search between expansion events.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Every clone observes it.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

impl<M: Tiles> Pathfinder<M> {
    /// Run a search, awaiting `progress` after every accepted extension.
    ///
    /// A failing callback aborts the search with [`SearchError::Aborted`];
    /// a tripped `cancel` token aborts it with [`SearchError::Cancelled`].
    /// Neither produces a partial result.
    pub async fn find_routes_async<F, Fut, E>(
        &self,
        start: &M::Tile,
        goal: &M::Tile,
        opts: &SearchOptions<M::Tile>,
        cancel: &CancelToken,
        mut progress: F,
    ) -> SearchResult<Vec<Route<M::Tile>>>
    where
        F: FnMut(Expansion) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut run = self.search(start, goal, opts)?;
        loop {
            if cancel.is_cancelled() {
                self.emit(SearchEvent::Cancelled {
                    expansions: run.expansions(),
                });
                return Err(SearchError::Cancelled);
            }
            let Some(event) = run.next() else {
                break;
            };
            progress(event)
                .await
                .map_err(|e| SearchError::Aborted(e.into()))?;
        }
        Ok(run.into_routes())
    }
}
