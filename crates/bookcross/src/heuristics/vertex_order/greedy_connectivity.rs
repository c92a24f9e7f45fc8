//! Connectivity selection with greedy internal placement: each new vertex
//! is inserted at the spine position where its edges to already placed
//! neighbors cross the fewest fully placed edges.

use rand::Rng;

use crate::model::{Embedding, Graph};

use super::connectivity::{select, PlacementState, VertexSelector};

/// Orders the vertices of a connected graph; positions are chosen inside
/// the partial spine, not only at its ends.
pub fn greedy_connectivity_order<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let graph = embedding.graph();
    let n = embedding.n();
    if n == 0 {
        return;
    }
    let mut state = PlacementState::new(graph);
    let mut spine: Vec<usize> = Vec::with_capacity(n);
    let mut placed_edges: Vec<usize> = Vec::new();

    let start = select(VertexSelector::Connectivity, &state, rng);
    state.mark_placed(start);
    spine.push(start);

    for _ in 1..n {
        let vertex = select(VertexSelector::Connectivity, &state, rng);
        let position = best_position(graph, &spine, &state, vertex, &placed_edges);
        spine.insert(position, vertex);

        // edges to placed neighbors are now fully placed themselves
        collect_placed_edges(graph, &state, vertex, &mut placed_edges);
        state.mark_placed(vertex);
    }

    embedding.set_spine(&spine);
}

/// Position with the fewest crossings between the new vertex's closed edges
/// and the already placed edges. For a placed edge spanning `(x, y)`, a
/// closed edge from outside that interval crosses at the inner candidate
/// positions, one from inside crosses at the outer ones.
fn best_position(
    graph: &Graph,
    spine: &[usize],
    state: &PlacementState,
    vertex: usize,
    placed_edges: &[usize],
) -> usize {
    let slots = spine.len() + 1;
    let mut crossings_at = vec![0u64; slots];

    let mut closed_edges: Vec<usize> = Vec::new();
    collect_placed_edges(graph, state, vertex, &mut closed_edges);

    for &xy in placed_edges {
        let edge = graph.edge(xy);
        let pos_x = position_on(spine, edge.start());
        let pos_y = position_on(spine, edge.target());
        let (pos_x, pos_y) = if pos_x <= pos_y {
            (pos_x, pos_y)
        } else {
            (pos_y, pos_x)
        };

        for &uv in &closed_edges {
            let other = graph.edge(uv).other_end(vertex);
            let pos_u = position_on(spine, other);
            if pos_u == pos_x || pos_u == pos_y {
                continue;
            }
            if pos_u < pos_x || pos_u > pos_y {
                for slot in crossings_at.iter_mut().take(pos_y + 1).skip(pos_x + 1) {
                    *slot += 1;
                }
            } else {
                for slot in crossings_at.iter_mut().take(pos_x + 1) {
                    *slot += 1;
                }
                for slot in crossings_at.iter_mut().skip(pos_y + 1) {
                    *slot += 1;
                }
            }
        }
    }

    // last argmin: later positions win ties
    let mut best = 0;
    let mut min = u64::MAX;
    for (slot, &c) in crossings_at.iter().enumerate() {
        if c <= min {
            min = c;
            best = slot;
        }
    }
    best
}

/// Appends the edges connecting `vertex` to already placed neighbors.
pub(crate) fn collect_placed_edges(
    graph: &Graph,
    state: &PlacementState,
    vertex: usize,
    edges: &mut Vec<usize>,
) {
    for &e in graph.vertex(vertex).edge_ids() {
        if state.is_placed(graph.edge(e).other_end(vertex)) {
            edges.push(e);
        }
    }
}

fn position_on(spine: &[usize], vertex: usize) -> usize {
    spine
        .iter()
        .position(|&v| v == vertex)
        .expect("vertex is on the partial spine")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn produces_valid_spines_on_dense_graphs() {
        let mut pairs = Vec::new();
        for a in 0..8 {
            for b in a + 1..8 {
                if (a + b) % 3 != 0 {
                    pairs.push((a, b));
                }
            }
        }
        let g = Graph::from_edges(8, &pairs).unwrap();
        let p = Problem::new(g, 2).unwrap();
        for seed in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut e = crate::model::Embedding::new(&p);
            greedy_connectivity_order(&mut e, &mut rng);
            e.validate().unwrap();
        }
    }

    #[test]
    fn cycle_order_is_crossing_free_on_one_page() {
        // on a cycle the greedy insertion recovers the cycle order, which
        // draws without crossings on a single page
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (0, 5)]).unwrap();
        let p = Problem::new(g, 1).unwrap();
        for seed in 0..6 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut e = crate::model::Embedding::new(&p);
            greedy_connectivity_order(&mut e, &mut rng);
            e.validate().unwrap();
            assert_eq!(e.crossings(), 0, "seed {seed}:\n{e}");
        }
    }
}
