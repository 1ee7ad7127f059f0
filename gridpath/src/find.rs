use std::{
    cmp::Ordering,
    collections::{BinaryHeap, HashMap, HashSet},
    fmt::{Debug, Display},
    marker::PhantomData,
    ops::Add,
};

use crate::{Coord, Error};

/// Represents an absolute cost value, i.e. the cost from the start or the
/// estimated total cost through a node
pub trait Cost: Copy + Default + PartialOrd + Add<Output = Self> + Debug + Display + 'static {
    /// Total ordering used by the priority queue (floats included)
    fn cost_cmp(&self, other: &Self) -> Ordering;
}

impl Cost for usize {
    fn cost_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl Cost for f64 {
    fn cost_cmp(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

pub trait MapTrait {
    /// Check if the provided node is part of the map
    fn is_valid(&self, node: Coord) -> bool;

    /// Return an iterator over the neighbors of the provided node
    fn neighbors_of(&self, node: Coord) -> impl Iterator<Item = Coord>;
}

/// What distinguishes one best-first search from another: how the remaining
/// cost is estimated and which parent a newly reached node gets.
pub trait Strategy {
    type Cost: Cost;

    /// Estimate of the cost from `from` to `goal`, must never overestimate
    fn estimate(from: Coord, goal: Coord) -> Self::Cost;

    /// Candidate parent and cost-from-start for reaching `next` while
    /// expanding `current`
    fn candidate<M: MapTrait>(
        map: &M,
        search: &SearchState<Self::Cost>,
        current: Coord,
        next: Coord,
    ) -> (Coord, Self::Cost);
}

/// The objects that we store in the priority queue
#[derive(Debug)]
struct ToVisit<C: Cost> {
    /// g + h
    priority: C,
    /// g at the time of the push, used to recognize stale entries
    cost: C,
    point: Coord,
}

impl<C: Cost> Ord for ToVisit<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.priority.cost_cmp(&other.priority).reverse() // reverse for BinaryHeap to be a min-heap
    }
}

impl<C: Cost> PartialOrd for ToVisit<C> {
    fn partial_cmp(&self, other: &ToVisit<C>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Cost> PartialEq for ToVisit<C> {
    fn eq(&self, other: &ToVisit<C>) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<C: Cost> Eq for ToVisit<C> {}

/// Per-search bookkeeping. A node missing from `g_score` has not been reached
/// yet, i.e. its cost is infinite.
#[derive(Debug, Clone)]
pub struct SearchState<C> {
    g_score: HashMap<Coord, C>,
    parent: HashMap<Coord, Coord>,
    closed: HashSet<Coord>,
}

impl<C: Cost> SearchState<C> {
    fn new(start: Coord) -> Self {
        Self {
            g_score: HashMap::from([(start, C::default())]),
            parent: HashMap::from([(start, start)]),
            closed: HashSet::new(),
        }
    }

    pub fn g_score(&self, node: Coord) -> Option<C> {
        self.g_score.get(&node).copied()
    }

    pub fn parent(&self, node: Coord) -> Option<Coord> {
        self.parent.get(&node).copied()
    }

    pub fn is_closed(&self, node: Coord) -> bool {
        self.closed.contains(&node)
    }

    pub fn closed_count(&self) -> usize {
        self.closed.len()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct PathResult<C> {
    pub path: Vec<Coord>,
    pub start: Coord,
    pub goal: Coord,
    pub total_cost: C,
}

impl<C> PathResult<C> {
    pub fn labels(&self) -> Vec<String> {
        self.path.iter().map(Coord::to_string).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathFinderState<C> {
    Computing,
    NoPathFound,
    PathFound(PathResult<C>),
}

impl<C> PathFinderState<C> {
    pub fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }

    /// The found path, empty if the goal is unreachable (or still computing)
    pub fn into_path(self) -> Vec<Coord> {
        match self {
            PathFinderState::PathFound(result) => result.path,
            _ => Vec::new(),
        }
    }
}

/// A best-first search that can be advanced one expansion at a time with
/// [`PathFinder::step`] or run to the end with [`PathFinder::finish`].
#[derive(Debug)]
pub struct PathFinder<S: Strategy> {
    start: Coord,
    goal: Coord,
    search: SearchState<S::Cost>,
    visit_list: BinaryHeap<ToVisit<S::Cost>>,
    state: PathFinderState<S::Cost>,
    _strategy: PhantomData<S>,
}

impl<S: Strategy> PathFinder<S> {
    pub fn new(start: Coord, goal: Coord) -> Self {
        Self {
            start,
            goal,
            search: SearchState::new(start),
            visit_list: BinaryHeap::from([ToVisit {
                priority: S::estimate(start, goal),
                cost: Default::default(),
                point: start,
            }]),
            state: PathFinderState::Computing,
            _strategy: PhantomData,
        }
    }

    pub fn finish<M: MapTrait>(mut self, map: &M) -> Result<PathFinderState<S::Cost>, Error> {
        loop {
            match self.step(map)? {
                PathFinderState::Computing => {}
                s => return Ok(s),
            }
        }
    }

    pub fn step<M: MapTrait>(&mut self, map: &M) -> Result<PathFinderState<S::Cost>, Error> {
        if self.state.is_done() {
            return Ok(self.state.clone());
        }

        let Some(visit) = self.visit_list.pop() else {
            log::debug!(
                "no path from {} to {} after expanding {} nodes",
                self.start,
                self.goal,
                self.search.closed_count()
            );
            self.state = PathFinderState::NoPathFound;
            return Ok(self.state.clone());
        };

        // skip entries superseded by a cheaper push of the same point
        if self.search.is_closed(visit.point)
            || self
                .search
                .g_score(visit.point)
                .is_some_and(|g| visit.cost > g)
        {
            return Ok(self.state.clone());
        }

        if visit.point == self.goal {
            let path = reconstruct_path(&self.search.parent, self.goal)?;
            log::debug!(
                "found path from {} to {}: {} vertices, cost {}, {} nodes expanded",
                self.start,
                self.goal,
                path.len(),
                visit.cost,
                self.search.closed_count()
            );

            self.state = PathFinderState::PathFound(PathResult {
                path,
                start: self.start,
                goal: self.goal,
                total_cost: visit.cost,
            });
            return Ok(self.state.clone());
        }

        log::trace!("expanding {} (g = {})", visit.point, visit.cost);
        self.search.closed.insert(visit.point);

        for next in map.neighbors_of(visit.point) {
            if self.search.is_closed(next) {
                continue;
            }

            let (parent, cost) = S::candidate(map, &self.search, visit.point, next);

            let improves = match self.search.g_score(next) {
                Some(known) => cost < known,
                None => true,
            };
            if improves {
                self.search.g_score.insert(next, cost);
                self.search.parent.insert(next, parent);
                self.visit_list.push(ToVisit {
                    priority: cost + S::estimate(next, self.goal),
                    cost,
                    point: next,
                });
            }
        }

        Ok(self.state.clone())
    }

    pub fn state(&self) -> &PathFinderState<S::Cost> {
        &self.state
    }

    pub fn search(&self) -> &SearchState<S::Cost> {
        &self.search
    }
}

/// Run a search to completion and return the path, empty if the goal cannot
/// be reached.
pub fn find_path<S: Strategy, M: MapTrait>(
    map: &M,
    start: Coord,
    goal: Coord,
) -> Result<Vec<Coord>, Error> {
    Ok(PathFinder::<S>::new(start, goal).finish(map)?.into_path())
}

/// Same as [`find_path`] on vertex labels.
pub fn find_path_labels<S: Strategy, M: MapTrait>(
    map: &M,
    start: &str,
    goal: &str,
) -> Result<Vec<String>, Error> {
    match PathFinder::<S>::new(start.parse()?, goal.parse()?).finish(map)? {
        PathFinderState::PathFound(result) => Ok(result.labels()),
        _ => Ok(Vec::new()),
    }
}

/// Walk the parent links back from `goal` to the self-parented start and
/// return the path in start to goal order.
pub fn reconstruct_path(parent: &HashMap<Coord, Coord>, goal: Coord) -> Result<Vec<Coord>, Error> {
    let mut path = vec![goal];
    let mut node = goal;

    loop {
        let from = *parent.get(&node).ok_or_else(|| {
            Error::InvariantViolation(format!("backtracking reached {node} which has no parent"))
        })?;

        if from == node {
            // we found the starting point, we are done
            break;
        }

        path.push(from);
        node = from;

        // a chain longer than the number of parent links must revisit a node
        if path.len() > parent.len() {
            return Err(Error::InvariantViolation(format!(
                "parent links from {goal} form a cycle"
            )));
        }
    }

    path.reverse();
    Ok(path)
}
