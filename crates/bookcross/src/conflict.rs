//! Conflict graphs of embeddings.
//!
//! The conflict graph of an embedding has one vertex per edge of the base
//! graph and connects two of them iff the corresponding edges can cross on
//! the current spine (their endpoint intervals interleave). Edge
//! distribution heuristics color or decompose this graph.

use crate::model::{Embedding, Graph};

/// Builds the conflict graph for the embedding's current spine.
pub fn conflict_graph(embedding: &Embedding) -> Graph {
    build(embedding, false)
}

/// Builds the complement of the conflict graph: edges that can *not* cross.
pub fn conflict_graph_complement(embedding: &Embedding) -> Graph {
    build(embedding, true)
}

fn build(embedding: &Embedding, complement: bool) -> Graph {
    let m = embedding.m();
    let mut builder = Graph::builder(m);
    for e1 in 0..m {
        for e2 in e1 + 1..m {
            if embedding.can_edges_cross(e1, e2) != complement {
                builder.add_edge(e1, e2);
            }
        }
    }
    builder
        .finish()
        .expect("conflict construction yields a simple graph")
}
