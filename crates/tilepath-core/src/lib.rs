//! Core types for the tilepath pathfinding engine.
//!
//! This crate provides the grid-level building blocks the search engine is
//! written against: integer coordinates, adjacency topologies and the
//! coordinate arena that hands out canonical handles for grid cells.

pub mod arena;
pub mod geom;
pub mod topology;

pub use arena::{CoordArena, CoordId};
pub use geom::{Coord, Range};
pub use topology::{Neighbors, ParseTopologyError, Topology, neighbors_by_name};
