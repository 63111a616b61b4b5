//! Bounded breadth-first neighborhood search.
//!
//! Distances are direction-agnostic: a relationship in either direction is
//! one hop, even though relationships are drawn as directed arrows.

use std::collections::{HashMap, VecDeque};

/// Lookup of the entities directly connected to an entity, in both
/// directions. Supplied by whoever owns the graph.
pub trait Adjacency {
    fn neighbors(&self, id: &str) -> Vec<&str>;
}

impl Adjacency for HashMap<String, Vec<String>> {
    fn neighbors(&self, id: &str) -> Vec<&str> {
        self.get(id)
            .map(|ns| ns.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Undirected adjacency list built from directed edges.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    neighbors: HashMap<String, Vec<String>>,
}

impl AdjacencyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `source -> target` under both endpoints.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        self.neighbors
            .entry(source.to_string())
            .or_default()
            .push(target.to_string());
        self.neighbors
            .entry(target.to_string())
            .or_default()
            .push(source.to_string());
    }

    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut list = Self::new();
        for (source, target) in edges {
            list.add_edge(source, target);
        }
        list
    }
}

impl Adjacency for AdjacencyList {
    fn neighbors(&self, id: &str) -> Vec<&str> {
        self.neighbors.neighbors(id)
    }
}

/// Hop distance from `focus` to every entity within `max_hops`.
///
/// `focus` is always at distance 0. Entities farther away are absent from
/// the result. Each entity is visited once; the first distance found wins.
pub fn distances<G: Adjacency + ?Sized>(
    graph: &G,
    focus: &str,
    max_hops: usize,
) -> HashMap<String, usize> {
    distances_from(graph, &[focus], max_hops)
}

/// Like [`distances`], with several entities at distance 0.
pub fn distances_from<G: Adjacency + ?Sized>(
    graph: &G,
    sources: &[&str],
    max_hops: usize,
) -> HashMap<String, usize> {
    let mut dist: HashMap<String, usize> = HashMap::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    for source in sources {
        if !dist.contains_key(*source) {
            dist.insert(source.to_string(), 0);
            queue.push_back(source.to_string());
        }
    }

    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        if d >= max_hops {
            continue;
        }
        for neighbor in graph.neighbors(&current) {
            if !dist.contains_key(neighbor) {
                dist.insert(neighbor.to_string(), d + 1);
                queue.push_back(neighbor.to_string());
            }
        }
    }

    dist
}
