//! Multi-route A* pathfinding over caller-defined tile grids.
//!
//! The engine is domain-agnostic: any tile type works once it can be mapped
//! to and from grid coordinates through the [`Tiles`] trait. On top of that
//! mapping it offers:
//!
//! - **First-found or provably-best** search ([`Strategy`])
//! - **k-best** route enumeration with optional ties and unfinished routes
//! - **Loop suppression** over the full route prefix
//! - Five adjacency **topologies** (square, two hex layouts, octo-square,
//!   triangle) from [`tilepath_core`]
//! - **Stepwise** ([`Pathfinder::search`]) and **cooperative async**
//!   ([`Pathfinder::find_routes_async`]) variants with identical results
//!
//! ```
//! use tilepath::{Metric, Pathfinder, SearchOptions, TileGrid};
//!
//! let map = TileGrid::parse(
//!     "
//! S.#.
//! ..#.
//! ...G",
//! );
//! let start = map.at(0, 0).unwrap();
//! let goal = map.at(3, 2).unwrap();
//! let pf = Pathfinder::builder(map)
//!     .cost(Metric::custom(|to: &tilepath::GridTile<char>, _| {
//!         (to.cell != '#').then_some(1)
//!     }))
//!     .build();
//!
//! let routes = pf.find_routes(&start, &goal, &SearchOptions::new()).unwrap();
//! assert_eq!(routes[0].cost, 5);
//! ```
//!
//! # Trait seams
//!
//! | Trait | Role |
//! |---|---|
//! | [`Tiles`] | tile ↔ coordinate mapping, optional per-cell topology |
//! | [`SearchObserver`] | receives structured [`SearchEvent`]s |

mod cooperative;
mod distance;
mod error;
mod fetch;
mod frontier;
mod grid;
mod observe;
mod options;
mod ordering;
mod route;
mod search;
mod traits;

pub use cooperative::CancelToken;
pub use distance::{chebyshev, manhattan};
pub use error::{SearchError, SearchResult};
pub use fetch::{Fetch, Fetcher};
pub use grid::{GridTile, TileGrid};
pub use observe::{LogObserver, NoopObserver, Rejection, SearchEvent, SearchObserver};
pub use options::{Cost, DEFAULT_REVISIT_BUDGET, Metric, SearchOptions, Strategy, TieBreak};
pub use ordering::{Priority, compare_by_priority, hash_coord, same_position};
pub use route::{Expansion, Route};
pub use search::{Pathfinder, PathfinderBuilder, SearchRun};
pub use traits::{FnTiles, Tiles};

pub use tilepath_core::{Coord, CoordArena, CoordId, Range, Topology};
