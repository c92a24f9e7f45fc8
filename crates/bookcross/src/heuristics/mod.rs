//! Constructive heuristics for initial embeddings.
//!
//! Vertex-order heuristics write a spine permutation, edge-distribution
//! heuristics write a page assignment, and full-embedding heuristics build
//! both in one pass. All of them mutate the embedding in place; callers
//! seed them through any [`rand::Rng`].

pub mod combined;
pub mod edge_distribution;
pub mod vertex_order;

use std::fmt;

use rand::Rng;

use crate::model::Embedding;

pub use edge_distribution::GreedyEdgeOrder;
pub use vertex_order::{VertexPlacer, VertexSelector};

/// Error raised when a heuristic is invoked outside its contract.
#[derive(Debug)]
pub enum EmbedError {
    /// The heuristic distributes edges and needs at least two pages.
    NeedsMultiplePages { heuristic: &'static str },
    /// The heuristic requires a connected graph.
    NeedsConnectedGraph { heuristic: &'static str },
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NeedsMultiplePages { heuristic } => {
                write!(f, "{heuristic} requires a page count k > 1")
            }
            Self::NeedsConnectedGraph { heuristic } => {
                write!(f, "{heuristic} requires a connected graph")
            }
        }
    }
}

impl std::error::Error for EmbedError {}

/// The vertex-order heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexOrderHeuristic {
    /// Leaves the spine untouched.
    DoNothing,
    /// Uniformly random spine permutation.
    Random,
    /// Depth-first search from a random root with randomized neighbor order.
    RandomDfs,
    /// Depth-first search rooted at a smallest-degree vertex, exploring
    /// small degrees first.
    SmallestDegreeDfs,
    /// Keeps a random prefix of the spine and reorders the rest by a
    /// random depth-first search.
    Idfs,
    /// Breadth-first search with randomized neighbor order.
    RandomBfs,
    /// Orders along a crossing-free drawing of a BFS spanning tree.
    BfsTree,
    /// Repeatedly takes the unprocessed vertex of highest degree, then its
    /// unprocessed neighbors by increasing degree. Intended for connected
    /// graphs.
    MaxNbr,
    /// `MaxNbr` on effective degrees that shrink as neighbors are placed.
    /// Intended for connected graphs.
    MaxNbrRemoving,
    /// Random walk toward a Hamilton path with short-circuit reversals;
    /// falls back to a random DFS on the uncovered suffix.
    HamiltonPath,
    /// Appends or prepends vertices chosen and placed by the given
    /// strategies. Intended for connected graphs.
    Connectivity {
        selector: VertexSelector,
        placer: VertexPlacer,
    },
    /// Connectivity selection with insertion at the internal position that
    /// minimizes crossings against fully placed edges. Intended for
    /// connected graphs.
    GreedyConnectivity,
}

impl VertexOrderHeuristic {
    /// Computes a vertex order and stores it in the embedding.
    pub fn apply<R: Rng>(
        &self,
        embedding: &mut Embedding,
        rng: &mut R,
    ) -> Result<(), EmbedError> {
        self.check_contract(embedding)?;
        match *self {
            Self::DoNothing => {}
            Self::Random => vertex_order::random_order(embedding, rng),
            Self::RandomDfs => vertex_order::random_dfs(embedding, rng),
            Self::SmallestDegreeDfs => vertex_order::smallest_degree_dfs(embedding, rng),
            Self::Idfs => vertex_order::idfs(embedding, rng),
            Self::RandomBfs => vertex_order::random_bfs(embedding, rng),
            Self::BfsTree => vertex_order::bfs_tree(embedding, rng),
            Self::MaxNbr => vertex_order::max_nbr(embedding, rng),
            Self::MaxNbrRemoving => vertex_order::max_nbr_removing(embedding),
            Self::HamiltonPath => vertex_order::hamilton_path(embedding, rng),
            Self::Connectivity { selector, placer } => {
                vertex_order::connectivity_order(embedding, selector, placer, rng)
            }
            Self::GreedyConnectivity => vertex_order::greedy_connectivity_order(embedding, rng),
        }
        Ok(())
    }

    fn check_contract(&self, embedding: &Embedding) -> Result<(), EmbedError> {
        let needs_connected = matches!(
            self,
            Self::MaxNbr | Self::MaxNbrRemoving | Self::Connectivity { .. } | Self::GreedyConnectivity
        );
        if needs_connected && !embedding.graph().is_connected() {
            return Err(EmbedError::NeedsConnectedGraph {
                heuristic: self.name(),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self {
            Self::DoNothing => "doNothing",
            Self::Random => "random",
            Self::RandomDfs => "randDFS",
            Self::SmallestDegreeDfs => "smlDgrDFS",
            Self::Idfs => "idfs",
            Self::RandomBfs => "randBFS",
            Self::BfsTree => "treeBFS",
            Self::MaxNbr => "maxNbr",
            Self::MaxNbrRemoving => "maxNbrR",
            Self::HamiltonPath => "hamilton",
            Self::Connectivity { .. } => "connectivity",
            Self::GreedyConnectivity => "conGreedy",
        }
    }
}

/// The edge-distribution heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeDistributionHeuristic {
    /// Leaves the distribution untouched.
    DoNothing,
    /// Uniformly random page per edge.
    Random,
    /// Buckets edges by the angle they would have on a circular drawing.
    Slope,
    /// Processes edges in the given order, placing each on the page where
    /// it currently crosses least.
    Greedy(GreedyEdgeOrder),
    /// Spreads conflicting edge pairs over distinct random pages.
    Conflict,
    /// Walks ears of the conflict graph, balancing pages along each ear.
    EarDecomposition,
}

impl EdgeDistributionHeuristic {
    /// Computes an edge distribution and stores it in the embedding.
    pub fn apply<R: Rng>(&self, embedding: &mut Embedding, rng: &mut R) {
        match *self {
            Self::DoNothing => {}
            Self::Random => edge_distribution::random_distribution(embedding, rng),
            Self::Slope => edge_distribution::slope_distribution(embedding),
            Self::Greedy(order) => edge_distribution::greedy_distribution(embedding, order, rng),
            Self::Conflict => edge_distribution::conflict_distribution(embedding, rng),
            Self::EarDecomposition => edge_distribution::ear_decomposition(embedding, rng),
        }
    }
}

/// Heuristics that build the spine and the distribution in a single pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullEmbeddingHeuristic {
    RandomDfs,
    SmallestDegreeDfs,
    RandomBfs,
    GreedyConnectivity,
}

impl FullEmbeddingHeuristic {
    /// Computes a complete embedding. Requires `k > 1`; the distribution is
    /// built incrementally while the spine grows.
    pub fn apply<R: Rng>(
        &self,
        embedding: &mut Embedding,
        rng: &mut R,
    ) -> Result<(), EmbedError> {
        let name = self.name();
        if embedding.k() == 1 {
            return Err(EmbedError::NeedsMultiplePages { heuristic: name });
        }
        match *self {
            Self::RandomDfs => combined::full_random_dfs(embedding, rng),
            Self::SmallestDegreeDfs => combined::full_smallest_degree_dfs(embedding, rng),
            Self::RandomBfs => combined::full_random_bfs(embedding, rng),
            Self::GreedyConnectivity => {
                if !embedding.graph().is_connected() {
                    return Err(EmbedError::NeedsConnectedGraph { heuristic: name });
                }
                combined::full_greedy_connectivity(embedding, rng)
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        match self {
            Self::RandomDfs => "randDFS+",
            Self::SmallestDegreeDfs => "smlDgrDFS+",
            Self::RandomBfs => "randBFS+",
            Self::GreedyConnectivity => "conGreedy+",
        }
    }
}
