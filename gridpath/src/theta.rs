//! Any-angle Theta*.
//!
//! Explores the same 4-connected adjacency as A*, but a newly reached node
//! may take its grandparent as parent when the straight segment between them
//! is unobstructed. Paths therefore run diagonally across open areas instead
//! of following the staircase of grid edges.

use crate::{
    cost::{euclidean, euclidean_cost},
    find::{self, MapTrait, PathFinder, SearchState, Strategy},
    Coord, Error,
};

#[derive(Debug, Clone, Copy)]
pub struct AnyAngle;

impl Strategy for AnyAngle {
    type Cost = f64;

    fn estimate(from: Coord, goal: Coord) -> f64 {
        euclidean(from, goal)
    }

    fn candidate<M: MapTrait>(
        map: &M,
        search: &SearchState<f64>,
        current: Coord,
        next: Coord,
    ) -> (Coord, f64) {
        let parent = search.parent(current).unwrap_or(current);

        if let Some(g) = search.g_score(parent).filter(|_| line_of_sight(map, parent, next)) {
            return (parent, g + euclidean_cost(parent, next));
        }

        let g = search.g_score(current).unwrap_or_default();
        (current, g + euclidean_cost(current, next))
    }
}

pub type ThetaStar = PathFinder<AnyAngle>;

pub fn find_path<M: MapTrait>(map: &M, start: Coord, goal: Coord) -> Result<Vec<Coord>, Error> {
    find::find_path::<AnyAngle, M>(map, start, goal)
}

pub fn find_path_labels<M: MapTrait>(
    map: &M,
    start: &str,
    goal: &str,
) -> Result<Vec<String>, Error> {
    find::find_path_labels::<AnyAngle, M>(map, start, goal)
}

/// Check whether the straight segment between the centers of `a` and `b`
/// only crosses cells that are part of the map.
///
/// Every cell the segment passes through is visited. Where the segment runs
/// exactly through a cell corner, both cells touching that corner must be
/// free as well, so the result is the same in both directions.
pub fn line_of_sight<M: MapTrait>(map: &M, a: Coord, b: Coord) -> bool {
    // the error term needs twice the coordinate range
    let dx = (i64::from(b.x) - i64::from(a.x)).abs();
    let dy = (i64::from(b.y) - i64::from(a.y)).abs();
    let x_inc = if b.x > a.x { 1 } else { -1 };
    let y_inc = if b.y > a.y { 1 } else { -1 };

    let mut error = dx - dy;
    let mut remaining = dx + dy;
    let (dx, dy) = (dx * 2, dy * 2);

    let (mut x, mut y) = (a.x, a.y);

    loop {
        if !map.is_valid(Coord::new(x, y)) {
            return false;
        }
        if remaining <= 0 {
            return true;
        }

        if error > 0 {
            x += x_inc;
            error -= dy;
            remaining -= 1;
        } else if error < 0 {
            y += y_inc;
            error += dx;
            remaining -= 1;
        } else {
            // corner crossing
            if !map.is_valid(Coord::new(x + x_inc, y)) || !map.is_valid(Coord::new(x, y + y_inc)) {
                return false;
            }
            x += x_inc;
            y += y_inc;
            error += dx - dy;
            remaining -= 2;
        }
    }
}
