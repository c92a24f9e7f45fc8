//! Curated re-export surface.
//!
//! Prefer these re-exports for consistency across experiments; the module
//! tree behind them stays reachable for anything not listed here.

// model
pub use crate::model::{can_edges_cross, Edge, Embedding, Graph, ModelError, Problem, Vertex};
// counters
pub use crate::crossings::{
    crossings_of_edge, crossings_of_edge_on_page, does_edge_cross, gain_of_move_edge_to_page,
    CrossingCounter,
};
// conflict graphs
pub use crate::conflict::{conflict_graph, conflict_graph_complement};
// heuristics
pub use crate::heuristics::{
    EdgeDistributionHeuristic, EmbedError, FullEmbeddingHeuristic, GreedyEdgeOrder,
    VertexOrderHeuristic, VertexPlacer, VertexSelector,
};
// greedy primitives
pub use crate::optimize::local::{
    find_best_page_for_edge, find_best_position_for_vertex, optimise_position_of_vertex, swap_gain,
};
// optimizers
pub use crate::optimize::{
    BestSolution, GreedyOptimizer, Monitor, OptimizeCfg, SimulatedAnnealingOptimizer,
    TwoStepGreedyOptimizer,
};
