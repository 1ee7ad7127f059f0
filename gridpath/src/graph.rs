use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fmt::Display,
};

use crate::{find::MapTrait, Coord, Error};

/// Undirected adjacency structure over grid coordinates.
///
/// Written once by a loader and only read while searching. Every coordinate
/// listed as a neighbor also has its own entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: HashMap<Coord, Vec<Coord>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a symmetric graph from an adjacency mapping. A pair listed on
    /// one side only still becomes an edge, and a pair listed on both sides
    /// becomes a single edge.
    pub fn from_adjacency(adjacency: &BTreeMap<Coord, Vec<Coord>>) -> Self {
        let mut graph = Graph::new();
        let mut edges = BTreeSet::new();

        for (&vertex, neighbors) in adjacency {
            graph.add_vertex(vertex);
            for &neighbor in neighbors.iter().filter(|&&n| n != vertex) {
                edges.insert((vertex.min(neighbor), vertex.max(neighbor)));
            }
        }

        for (u, v) in edges {
            graph.add_edge(u, v);
        }

        graph
    }

    /// Copy of the adjacency lists with vertices and neighbor lists sorted,
    /// suitable for serializing
    pub fn to_adjacency(&self) -> BTreeMap<Coord, Vec<Coord>> {
        self.adjacency
            .iter()
            .map(|(&vertex, neighbors)| {
                let mut neighbors = neighbors.clone();
                neighbors.sort_unstable();
                (vertex, neighbors)
            })
            .collect()
    }

    pub fn add_vertex(&mut self, vertex: Coord) {
        self.adjacency.entry(vertex).or_default();
    }

    /// Connects `u` and `v` in both directions. Adding the same edge twice
    /// leaves duplicate neighbor entries behind, which the searches tolerate.
    pub fn add_edge(&mut self, u: Coord, v: Coord) {
        self.adjacency.entry(u).or_default().push(v);
        self.adjacency.entry(v).or_default().push(u);
    }

    pub fn add_vertex_label(&mut self, label: &str) -> Result<(), Error> {
        self.add_vertex(label.parse()?);
        Ok(())
    }

    pub fn add_edge_label(&mut self, u: &str, v: &str) -> Result<(), Error> {
        let (u, v) = (u.parse()?, v.parse()?);
        self.add_edge(u, v);
        Ok(())
    }

    /// Neighbors of `vertex`, empty if the vertex is unknown
    pub fn neighbors(&self, vertex: Coord) -> &[Coord] {
        self.adjacency
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, vertex: Coord) -> bool {
        self.adjacency.contains_key(&vertex)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Coord> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl MapTrait for Graph {
    fn is_valid(&self, node: Coord) -> bool {
        self.contains(node)
    }

    fn neighbors_of(&self, node: Coord) -> impl Iterator<Item = Coord> {
        self.neighbors(node).iter().copied()
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (vertex, neighbors) in self.to_adjacency() {
            write!(f, "{} ->", vertex)?;
            for neighbor in neighbors {
                write!(f, " {}", neighbor)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_vertex_is_idempotent() {
        let mut graph = Graph::new();
        graph.add_vertex(Coord::new(1, 1));
        graph.add_edge(Coord::new(1, 1), Coord::new(1, 2));
        graph.add_vertex(Coord::new(1, 1));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.neighbors(Coord::new(1, 1)), &[Coord::new(1, 2)]);
    }

    #[test]
    fn test_edges_are_symmetric() {
        let mut graph = Graph::new();
        graph.add_edge(Coord::new(0, 0), Coord::new(1, 0));

        assert_eq!(graph.neighbors(Coord::new(0, 0)), &[Coord::new(1, 0)]);
        assert_eq!(graph.neighbors(Coord::new(1, 0)), &[Coord::new(0, 0)]);
    }

    #[test]
    fn test_unknown_vertex_has_no_neighbors() {
        let graph = Graph::new();
        assert!(graph.neighbors(Coord::new(4, 2)).is_empty());
        assert!(!graph.contains(Coord::new(4, 2)));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_duplicate_edges_are_kept() {
        let mut graph = Graph::new();
        graph.add_edge(Coord::new(0, 0), Coord::new(0, 1));
        graph.add_edge(Coord::new(0, 0), Coord::new(0, 1));

        assert_eq!(graph.neighbors(Coord::new(0, 0)).len(), 2);
    }

    #[test]
    fn test_label_edges() {
        let mut graph = Graph::new();
        graph.add_edge_label("(0,0)", "(0, 1)").unwrap();
        graph.add_vertex_label("(9, 9)").unwrap();

        assert!(graph.contains(Coord::new(0, 1)));
        assert!(graph.contains(Coord::new(9, 9)));
        assert_eq!(
            graph.add_edge_label("(0, 0)", "0,2"),
            Err(Error::MalformedLabel("0,2".to_owned()))
        );
        // a failed edge leaves the graph untouched
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_from_adjacency_symmetrizes() {
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 0);
        let c = Coord::new(2, 0);

        // a-b listed both ways, b-c listed on one side only
        let adjacency = BTreeMap::from([(a, vec![b]), (b, vec![a, c])]);
        let graph = Graph::from_adjacency(&adjacency);

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.neighbors(a), &[b]);
        assert_eq!(graph.neighbors(b), &[a, c]);
        assert_eq!(graph.neighbors(c), &[b]);
    }

    #[test]
    fn test_to_adjacency_is_sorted() {
        let mut graph = Graph::new();
        graph.add_edge(Coord::new(1, 1), Coord::new(2, 1));
        graph.add_edge(Coord::new(1, 1), Coord::new(0, 1));
        graph.add_edge(Coord::new(1, 1), Coord::new(1, 0));

        let adjacency = graph.to_adjacency();
        assert_eq!(
            adjacency[&Coord::new(1, 1)],
            vec![Coord::new(0, 1), Coord::new(1, 0), Coord::new(2, 1)]
        );
        // insertion order is untouched
        assert_eq!(graph.neighbors(Coord::new(1, 1))[0], Coord::new(2, 1));
        assert_eq!(graph.to_string().lines().next(), Some("(0, 1) -> (1, 1)"));
    }

    #[test]
    fn test_display() {
        let mut graph = Graph::new();
        graph.add_edge(Coord::new(0, 0), Coord::new(0, 1));
        graph.add_vertex(Coord::new(5, 5));

        assert_eq!(
            graph.to_string(),
            "(0, 0) -> (0, 1)\n(0, 1) -> (0, 0)\n(5, 5) ->\n"
        );
    }
}
