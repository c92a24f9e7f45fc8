//! Book embeddings: construct k-page layouts of undirected graphs and
//! minimize their crossing number.
//!
//! A k-page book embedding orders the vertices along a spine and assigns
//! every edge to one of `k` pages; two edges on a page cross iff their
//! endpoint intervals interleave. The crate provides
//!
//! - the [`model`]: graphs, problems and the mutable [`model::Embedding`]
//!   with its dual spine arrays and cached crossing count,
//! - three interchangeable [`crossings`] counters (quadratic reference,
//!   open-edges sweep, divide-and-conquer),
//! - constructive [`heuristics`] for vertex orders and edge distributions,
//! - greedy and simulated-annealing [`optimize`] loops built on an O(Δ²)
//!   swap-gain kernel.
//!
//! Optimizer runs are single-threaded over an exclusively owned embedding;
//! parallelism belongs outside, one embedding per worker. All randomized
//! code draws from a caller-provided [`rand::Rng`], so seeded
//! [`rand::rngs::StdRng`] runs reproduce exactly.
//!
//! ```
//! use bookcross::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let graph = Graph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 2),
//!     (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]).unwrap();
//! let problem = Problem::new(graph, 2).unwrap();
//! let mut rng = StdRng::seed_from_u64(1);
//!
//! let mut embedding = Embedding::new(&problem);
//! VertexOrderHeuristic::RandomDfs.apply(&mut embedding, &mut rng).unwrap();
//! EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::ELen).apply(&mut embedding, &mut rng);
//!
//! let (best, _monitor) = GreedyOptimizer::default().run(&mut embedding, &mut rng);
//! assert!(best.crossings() <= 1);
//! ```

pub mod api;
pub mod conflict;
pub mod crossings;
pub mod heuristics;
pub mod model;
pub mod optimize;
pub mod util;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::crossings::CrossingCounter;
    pub use crate::heuristics::{
        EdgeDistributionHeuristic, FullEmbeddingHeuristic, GreedyEdgeOrder, VertexOrderHeuristic,
        VertexPlacer, VertexSelector,
    };
    pub use crate::model::{Embedding, Graph, Problem};
    pub use crate::optimize::{
        BestSolution, GreedyOptimizer, OptimizeCfg, SimulatedAnnealingOptimizer,
        TwoStepGreedyOptimizer,
    };
}
