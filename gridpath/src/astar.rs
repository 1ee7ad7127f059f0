//! Grid-constrained A*: every edge costs one step and the Manhattan distance
//! guides the search.

use crate::{
    cost::{manhattan, unit_cost},
    find::{self, MapTrait, PathFinder, SearchState, Strategy},
    Coord, Error,
};

#[derive(Debug, Clone, Copy)]
pub struct GridSteps;

impl Strategy for GridSteps {
    type Cost = usize;

    fn estimate(from: Coord, goal: Coord) -> usize {
        manhattan(from, goal)
    }

    fn candidate<M: MapTrait>(
        _map: &M,
        search: &SearchState<usize>,
        current: Coord,
        next: Coord,
    ) -> (Coord, usize) {
        let g = search.g_score(current).unwrap_or_default();
        (current, g + unit_cost(current, next))
    }
}

pub type AStar = PathFinder<GridSteps>;

pub fn find_path<M: MapTrait>(map: &M, start: Coord, goal: Coord) -> Result<Vec<Coord>, Error> {
    find::find_path::<GridSteps, M>(map, start, goal)
}

pub fn find_path_labels<M: MapTrait>(
    map: &M,
    start: &str,
    goal: &str,
) -> Result<Vec<String>, Error> {
    find::find_path_labels::<GridSteps, M>(map, start, goal)
}
