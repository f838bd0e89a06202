//! In-memory link graph
//!
//! The graph is built by the crawler and read by the ranking and storage
//! layers. Nodes are numbered in discovery order; every other structure is
//! keyed by that index.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Indexed link graph with edge multiplicities
///
/// Invariants:
/// - `nodes`, `out_degree` and `adjacency` have the same length
/// - `out_degree[i]` equals the sum of the weights of the edges leaving `i`
/// - every alias points at an existing node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkGraph {
    /// Canonical URL (or label) of each node, in discovery order
    nodes: Vec<String>,
    /// Number of recorded link occurrences leaving each node
    out_degree: Vec<u64>,
    /// Destination index -> multiplicity, per source node
    adjacency: Vec<BTreeMap<usize, u64>>,
    /// Every raw or canonical URL observed -> node index
    aliases: HashMap<String, usize>,
}

impl LinkGraph {
    /// Creates an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `node_count` anonymous nodes and a list of edges
    ///
    /// Each node is labelled with its decimal index. Repeated edges add to
    /// the multiplicity. No aliases are registered.
    ///
    /// # Panics
    ///
    /// Panics if an edge refers to an index >= `node_count`.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self {
            nodes: (0..node_count).map(|i| i.to_string()).collect(),
            out_degree: vec![0; node_count],
            adjacency: vec![BTreeMap::new(); node_count],
            aliases: HashMap::new(),
        };

        for (from, to) in edges {
            graph.record_edge(from, to);
        }

        graph
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node labels in index order
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&str> {
        self.nodes.get(index).map(String::as_str)
    }

    /// Out-degree vector, parallel to [`LinkGraph::nodes`]
    pub fn out_degree(&self) -> &[u64] {
        &self.out_degree
    }

    /// Multiplicity of the edge `from -> to` (0 when absent)
    pub fn weight(&self, from: usize, to: usize) -> u64 {
        self.adjacency
            .get(from)
            .and_then(|targets| targets.get(&to))
            .copied()
            .unwrap_or(0)
    }

    /// Edges leaving `from` as `(destination, multiplicity)`, by ascending destination
    pub fn edges_from(&self, from: usize) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.adjacency
            .get(from)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(&to, &weight)| (to, weight)))
    }

    /// All edges as `(source, destination, multiplicity)`, sources ascending
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        (0..self.len()).flat_map(move |from| {
            self.edges_from(from)
                .map(move |(to, weight)| (from, to, weight))
        })
    }

    /// Total number of recorded link occurrences
    pub fn edge_count(&self) -> u64 {
        self.out_degree.iter().sum()
    }

    /// Indices of nodes with no recorded outbound edge
    pub fn dangling_nodes(&self) -> Vec<usize> {
        self.out_degree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Looks up the node a raw or canonical URL refers to
    pub fn resolve(&self, url: &str) -> Option<usize> {
        self.aliases.get(url).copied()
    }

    pub fn aliases(&self) -> &HashMap<String, usize> {
        &self.aliases
    }

    /// Appends a node for `canonical` and returns its index
    ///
    /// If `canonical` is already known, the existing index is returned and
    /// no node is created.
    pub fn add_node(&mut self, canonical: &str) -> usize {
        if let Some(existing) = self.resolve(canonical) {
            return existing;
        }

        let index = self.nodes.len();
        self.nodes.push(canonical.to_string());
        self.out_degree.push(0);
        self.adjacency.push(BTreeMap::new());
        self.aliases.insert(canonical.to_string(), index);
        index
    }

    /// Registers another URL string for an existing node
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn register_alias(&mut self, alias: &str, index: usize) {
        assert!(index < self.len(), "alias target {} out of range", index);
        self.aliases.insert(alias.to_string(), index);
    }

    /// Records one link occurrence `from -> to`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn record_edge(&mut self, from: usize, to: usize) {
        assert!(to < self.len(), "edge target {} out of range", to);
        *self.adjacency[from].entry(to).or_insert(0) += 1;
        self.out_degree[from] += 1;
    }

    /// Checks the structural invariants of the graph
    ///
    /// Used when a graph comes from outside the process (a snapshot file).
    pub fn validate(&self) -> Result<(), String> {
        let n = self.nodes.len();

        if self.out_degree.len() != n || self.adjacency.len() != n {
            return Err(format!(
                "length mismatch: {} nodes, {} out-degrees, {} adjacency rows",
                n,
                self.out_degree.len(),
                self.adjacency.len()
            ));
        }

        for (from, targets) in self.adjacency.iter().enumerate() {
            if let Some((&to, _)) = targets.iter().find(|(&to, _)| to >= n) {
                return Err(format!("edge {} -> {} points past {} nodes", from, to, n));
            }

            if targets.values().any(|&weight| weight == 0) {
                return Err(format!("node {} has a zero-weight edge", from));
            }

            let sum = targets
                .values()
                .try_fold(0u64, |sum, &weight| sum.checked_add(weight))
                .ok_or_else(|| format!("edge weights of node {} overflow", from))?;
            if sum != self.out_degree[from] {
                return Err(format!(
                    "node {} has out-degree {} but edge weights sum to {}",
                    from, self.out_degree[from], sum
                ));
            }
        }

        if self
            .out_degree
            .iter()
            .try_fold(0u64, |total, &degree| total.checked_add(degree))
            .is_none()
        {
            return Err("total link count overflows".to_string());
        }

        if let Some((alias, &index)) = self.aliases.iter().find(|(_, &index)| index >= n) {
            return Err(format!("alias {} points at missing node {}", alias, index));
        }

        Ok(())
    }
}
