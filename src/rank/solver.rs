//! Power-iteration steps shared by both execution modes

use crate::graph::LinkGraph;
use rayon::prelude::*;
use rayon::ThreadPool;

/// Column view of the transition matrix
///
/// For each destination node, the sources linking to it together with the
/// fraction of the source's out-degree that the link carries.
pub(crate) struct Transitions {
    incoming: Vec<Vec<(usize, f64)>>,
    dangling: Vec<usize>,
}

impl Transitions {
    pub(crate) fn new(graph: &LinkGraph) -> Self {
        let mut incoming = vec![Vec::new(); graph.len()];
        let out_degree = graph.out_degree();

        for (from, to, weight) in graph.edges() {
            incoming[to].push((from, weight as f64 / out_degree[from] as f64));
        }

        Self {
            incoming,
            dangling: graph.dangling_nodes(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.incoming.len()
    }

    /// Un-damped rank flowing into `node` along recorded edges
    pub(crate) fn inflow(&self, node: usize, ranks: &[f64]) -> f64 {
        self.incoming[node]
            .iter()
            .map(|&(from, share)| ranks[from] * share)
            .sum()
    }

    /// Total rank held by nodes without outbound edges
    pub(crate) fn dangling_mass(&self, ranks: &[f64]) -> f64 {
        self.dangling.iter().map(|&node| ranks[node]).sum()
    }
}

/// Computes every inflow on the calling thread
pub(crate) fn sequential_inflows(transitions: &Transitions, ranks: &[f64]) -> Vec<f64> {
    (0..transitions.len())
        .map(|node| transitions.inflow(node, ranks))
        .collect()
}

/// Computes every inflow as an independent task on `pool`
///
/// Each task reads the shared `ranks` snapshot and produces the value for its
/// own index; `collect` returns only once every task has delivered.
pub(crate) fn parallel_inflows(
    transitions: &Transitions,
    ranks: &[f64],
    pool: &ThreadPool,
) -> Vec<f64> {
    pool.install(|| {
        (0..transitions.len())
            .into_par_iter()
            .map(|node| transitions.inflow(node, ranks))
            .collect()
    })
}

/// Applies damping, dangling redistribution and renormalization
pub(crate) fn damp_and_normalize(inflows: Vec<f64>, dangling_mass: f64, damping: f64) -> Vec<f64> {
    let n = inflows.len() as f64;
    let dangling_share = dangling_mass / n;
    let teleport = (1.0 - damping) / n;

    let mut next: Vec<f64> = inflows
        .into_iter()
        .map(|inflow| damping * (inflow + dangling_share) + teleport)
        .collect();

    let norm: f64 = next.iter().sum();
    if norm > 0.0 && norm.is_finite() {
        for rank in &mut next {
            *rank /= norm;
        }
    }

    next
}

/// L1 distance between two rank vectors
pub(crate) fn l1_change(previous: &[f64], next: &[f64]) -> f64 {
    previous
        .iter()
        .zip(next)
        .map(|(a, b)| (a - b).abs())
        .sum()
}
