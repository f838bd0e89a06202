//! PageRank over a link graph
//!
//! Power iteration with damping, uniform redistribution of dangling mass and
//! renormalization after every step. Each iteration is computed either on the
//! calling thread or as one task per node on a rayon pool; both modes apply
//! the damping step once, after every inflow is known.

mod solver;

use crate::config::RankConfig;
use crate::graph::LinkGraph;
use crate::RankError;
use solver::{damp_and_normalize, l1_change, parallel_inflows, sequential_inflows, Transitions};

/// How each iteration is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// One task per node; `threads == 0` uses one worker per CPU
    Parallel { threads: usize },
}

/// PageRank solver parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRank {
    /// Probability of following a link instead of jumping to a random node
    pub damping: f64,
    /// Stop once the L1 change between iterations is at most this
    pub tolerance: f64,
    pub mode: ExecutionMode,
    /// Iteration limit (0 = iterate until converged)
    pub max_iterations: usize,
}

impl Default for PageRank {
    fn default() -> Self {
        Self::from(&RankConfig::default())
    }
}

impl From<&RankConfig> for PageRank {
    fn from(config: &RankConfig) -> Self {
        Self {
            damping: config.damping,
            tolerance: config.tolerance,
            mode: if config.parallel {
                ExecutionMode::Parallel {
                    threads: config.threads,
                }
            } else {
                ExecutionMode::Sequential
            },
            max_iterations: config.max_iterations,
        }
    }
}

/// Rank of a single node
#[derive(Debug, Clone, PartialEq)]
pub struct RankedNode {
    pub index: usize,
    /// Canonical URL, or the index token for graphs loaded from an edge list
    pub label: String,
    pub rank: f64,
}

/// Result of a ranking run, in node-index order
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    pub entries: Vec<RankedNode>,
    /// Sum of all ranks; 1.0 up to floating-point error
    pub sum: f64,
    pub iterations: usize,
    /// False only when the iteration limit stopped the solver
    pub converged: bool,
}

impl Ranking {
    /// Ranking of a graph without nodes
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            sum: 0.0,
            iterations: 0,
            converged: true,
        }
    }

    /// Rank values in node-index order
    pub fn ranks(&self) -> Vec<f64> {
        self.entries.iter().map(|entry| entry.rank).collect()
    }

    /// The `n` highest ranked nodes, best first (ties by index)
    pub fn top(&self, n: usize) -> Vec<&RankedNode> {
        let mut sorted: Vec<&RankedNode> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.rank.total_cmp(&a.rank).then(a.index.cmp(&b.index)));
        sorted.truncate(n);
        sorted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PageRank {
    pub fn sequential() -> Self {
        Self::default()
    }

    pub fn parallel(threads: usize) -> Self {
        Self {
            mode: ExecutionMode::Parallel { threads },
            ..Self::default()
        }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Runs power iteration over `graph` until convergence
    ///
    /// # Returns
    ///
    /// * `Ok(Ranking)` - One rank per node, summing to 1
    /// * `Err(RankError::EmptyGraph)` - The graph has no nodes
    /// * `Err(RankError::ThreadPool)` - Parallel workers could not be started
    pub fn rank(&self, graph: &LinkGraph) -> Result<Ranking, RankError> {
        let n = graph.len();
        if n == 0 {
            return Err(RankError::EmptyGraph);
        }

        let pool = match self.mode {
            ExecutionMode::Sequential => None,
            ExecutionMode::Parallel { threads } => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?,
            ),
        };

        let transitions = Transitions::new(graph);
        let mut ranks = vec![1.0 / n as f64; n];
        let mut iterations = 0;
        let mut converged = false;

        tracing::info!(
            "Calculating PageRank over {} nodes ({:?}, damping {}, tolerance {})",
            n,
            self.mode,
            self.damping,
            self.tolerance
        );

        loop {
            let dangling_mass = transitions.dangling_mass(&ranks);
            let inflows = match &pool {
                Some(pool) => parallel_inflows(&transitions, &ranks, pool),
                None => sequential_inflows(&transitions, &ranks),
            };
            let next = damp_and_normalize(inflows, dangling_mass, self.damping);

            let change = l1_change(&ranks, &next);
            ranks = next;
            iterations += 1;
            tracing::trace!("Iteration {}: change {:e}", iterations, change);

            if change <= self.tolerance {
                converged = true;
                break;
            }

            if self.max_iterations > 0 && iterations >= self.max_iterations {
                tracing::warn!(
                    "PageRank stopped after {} iterations without converging (change {:e})",
                    iterations,
                    change
                );
                break;
            }
        }

        if converged {
            tracing::info!("PageRank converged after {} iterations", iterations);
        }

        let sum = ranks.iter().sum();
        let entries = ranks
            .into_iter()
            .enumerate()
            .map(|(index, rank)| RankedNode {
                index,
                label: graph.node(index).unwrap_or_default().to_string(),
                rank,
            })
            .collect();

        Ok(Ranking {
            entries,
            sum,
            iterations,
            converged,
        })
    }
}
