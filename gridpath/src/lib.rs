//! Shortest paths between labeled cells of a grid graph.
//!
//! Two searches share one step-wise driver ([`find::PathFinder`]):
//!
//! - [`astar`]: grid-constrained A* with unit steps and a Manhattan estimate
//! - [`theta`]: any-angle Theta*, which re-parents through line of sight
//!
//! Both take an immutable [`Graph`] and return the path as a list of
//! [`Coord`]s, or an empty list if the goal cannot be reached.

pub mod astar;
pub mod config;
pub mod coord;
pub mod cost;
pub mod error;
pub mod find;
pub mod graph;
pub mod theta;
pub mod util;

pub use coord::Coord;
pub use error::Error;
pub use graph::Graph;
