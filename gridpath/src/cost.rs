//! Edge costs and heuristics for the two searches.
//!
//! A* walks a 4-connected grid with unit steps and estimates with the
//! Manhattan distance. Theta* measures straight segments and estimates with
//! the Euclidean distance. Both estimates never overestimate the remaining
//! cost of their own search.

use crate::{Coord, Error};

/// Cost of a single grid step
pub fn unit_cost(_from: Coord, _to: Coord) -> usize {
    1
}

/// Length of the straight segment between two grid positions
pub fn euclidean_cost(from: Coord, to: Coord) -> f64 {
    let dx = f64::from(from.x) - f64::from(to.x);
    let dy = f64::from(from.y) - f64::from(to.y);
    dx.hypot(dy)
}

pub fn manhattan(from: Coord, goal: Coord) -> usize {
    from.x.abs_diff(goal.x) as usize + from.y.abs_diff(goal.y) as usize
}

pub fn euclidean(from: Coord, goal: Coord) -> f64 {
    euclidean_cost(from, goal)
}

/// Evaluate one of the functions above on two vertex labels.
pub fn with_labels<T>(from: &str, to: &str, f: impl Fn(Coord, Coord) -> T) -> Result<T, Error> {
    Ok(f(from.parse()?, to.parse()?))
}

/// Euclidean length of a path, summed over consecutive vertices
pub fn path_length(path: &[Coord]) -> f64 {
    path.windows(2).map(|w| euclidean_cost(w[0], w[1])).sum()
}
