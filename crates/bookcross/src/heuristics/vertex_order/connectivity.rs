//! Connectivity-driven vertex placement.
//!
//! Vertices are appended to either end of a growing spine. A selector
//! strategy picks the next vertex from the placed/unplaced neighbor counts
//! and a placer strategy decides which end it goes to.

use std::collections::VecDeque;

use rand::Rng;

use crate::model::{Embedding, Graph};

/// Strategy choosing the next vertex to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexSelector {
    /// The unplaced vertex with the smallest index.
    Next,
    /// A uniformly random unplaced vertex.
    Random,
    /// The unplaced vertex with the most placed neighbors.
    InCon,
    /// The unplaced vertex with the fewest unplaced neighbors.
    OutCon,
    /// Most placed neighbors, ties broken by fewest unplaced neighbors.
    Connectivity,
}

/// Strategy choosing the end of the spine a new vertex is placed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexPlacer {
    /// Always the end.
    Fixed,
    /// Either end with equal probability.
    Random,
    /// The end where the vertex's closed edges cross fewer open edges.
    Crossings,
    /// The end minimizing the total spine length of the closed edges.
    ELen,
}

/// Which end of the partial spine a vertex goes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    Beginning,
    End,
}

/// Bookkeeping for the growing placement: the partial spine and, per
/// vertex, how many neighbors are already placed or still open.
pub struct PlacementState<'g> {
    graph: &'g Graph,
    spine: VecDeque<usize>,
    placed: Vec<bool>,
    placed_count: usize,
    placed_neighbors: Vec<usize>,
    unplaced_neighbors: Vec<usize>,
}

impl<'g> PlacementState<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        let n = graph.n();
        Self {
            graph,
            spine: VecDeque::with_capacity(n),
            placed: vec![false; n],
            placed_count: 0,
            placed_neighbors: vec![0; n],
            unplaced_neighbors: (0..n).map(|v| graph.degree_of(v)).collect(),
        }
    }

    #[inline]
    pub fn is_placed(&self, vertex: usize) -> bool {
        self.placed[vertex]
    }

    #[inline]
    pub fn placed_neighbors(&self, vertex: usize) -> usize {
        self.placed_neighbors[vertex]
    }

    #[inline]
    pub fn unplaced_neighbors(&self, vertex: usize) -> usize {
        self.unplaced_neighbors[vertex]
    }

    pub fn spine(&self) -> &VecDeque<usize> {
        &self.spine
    }

    fn place(&mut self, vertex: usize, placement: Placement) {
        match placement {
            Placement::Beginning => self.spine.push_front(vertex),
            Placement::End => self.spine.push_back(vertex),
        }
        self.mark_placed(vertex);
    }

    /// Updates neighbor counts without touching the deque; used by callers
    /// that keep their own spine representation.
    pub(crate) fn mark_placed(&mut self, vertex: usize) {
        for &e in self.graph.vertex(vertex).edge_ids() {
            let other = self.graph.edge(e).other_end(vertex);
            self.placed_neighbors[other] += 1;
            self.unplaced_neighbors[other] -= 1;
        }
        self.placed[vertex] = true;
        self.placed_count += 1;
    }
}

/// Orders the vertices by repeatedly selecting with `selector` and placing
/// at an end chosen by `placer`. Intended for connected graphs; on a
/// disconnected one the selectors degrade to arbitrary picks.
pub fn connectivity_order<R: Rng>(
    embedding: &mut Embedding,
    selector: VertexSelector,
    placer: VertexPlacer,
    rng: &mut R,
) {
    let mut state = PlacementState::new(embedding.graph());
    let n = embedding.n();
    if n == 0 {
        return;
    }

    let start = select(selector, &state, rng);
    state.place(start, Placement::End);

    for _ in 1..n {
        let vertex = select(selector, &state, rng);
        let placement = determine_placement(placer, vertex, &state, rng);
        state.place(vertex, placement);
    }

    let spine: Vec<usize> = state.spine.iter().copied().collect();
    embedding.set_spine(&spine);
}

pub(crate) fn select<R: Rng>(
    selector: VertexSelector,
    state: &PlacementState,
    rng: &mut R,
) -> usize {
    let n = state.graph.n();
    match selector {
        VertexSelector::Next => (0..n).find(|&v| !state.placed[v]).expect("unplaced vertex"),
        VertexSelector::Random => {
            if state.placed_count == 0 {
                rng.gen_range(0..n)
            } else {
                let unplaced = n - state.placed_count;
                let skip = rng.gen_range(0..unplaced);
                (0..n)
                    .filter(|&v| !state.placed[v])
                    .nth(skip)
                    .expect("unplaced vertex")
            }
        }
        VertexSelector::InCon => {
            let mut best = usize::MAX;
            let mut most_placed = usize::MAX;
            for v in 0..n {
                if !state.placed[v]
                    && (best == usize::MAX || state.placed_neighbors[v] > most_placed)
                {
                    most_placed = state.placed_neighbors[v];
                    best = v;
                }
            }
            best
        }
        VertexSelector::OutCon => {
            let mut best = usize::MAX;
            let mut fewest_unplaced = usize::MAX;
            for v in 0..n {
                if !state.placed[v] && state.unplaced_neighbors[v] < fewest_unplaced {
                    fewest_unplaced = state.unplaced_neighbors[v];
                    best = v;
                }
            }
            best
        }
        VertexSelector::Connectivity => {
            let mut best = usize::MAX;
            let mut most_placed = usize::MAX;
            let mut tie_unplaced = usize::MAX;
            for v in 0..n {
                if state.placed[v] {
                    continue;
                }
                let placed = state.placed_neighbors[v];
                let unplaced = state.unplaced_neighbors[v];
                if best == usize::MAX
                    || placed > most_placed
                    || (placed == most_placed && tie_unplaced > unplaced)
                {
                    most_placed = placed;
                    tie_unplaced = unplaced;
                    best = v;
                }
            }
            best
        }
    }
}

fn determine_placement<R: Rng>(
    placer: VertexPlacer,
    vertex: usize,
    state: &PlacementState,
    rng: &mut R,
) -> Placement {
    match placer {
        VertexPlacer::Fixed => Placement::End,
        VertexPlacer::Random => {
            if rng.gen::<f64>() < 0.5 {
                Placement::End
            } else {
                Placement::Beginning
            }
        }
        VertexPlacer::Crossings => minimize_crossings(vertex, state),
        VertexPlacer::ELen => minimize_edge_length(vertex, state),
    }
}

/// Counts, for both ends, how many crossings the closed edges of `vertex`
/// would create with the open edges of already placed vertices: while the
/// scan has unvisited placed neighbors ahead, every open edge at the
/// scanned vertex will cross the remaining closed edges.
fn minimize_crossings(vertex: usize, state: &PlacementState) -> Placement {
    let graph = state.graph;
    let mut neighbor = vec![false; graph.n()];
    for &e in graph.vertex(vertex).edge_ids() {
        neighbor[graph.edge(e).other_end(vertex)] = true;
    }

    let mut beginning_crossings: u64 = 0;
    let mut remaining = state.placed_neighbors[vertex];
    for &v in state.spine.iter() {
        if remaining == 0 {
            break;
        }
        let mut open = state.unplaced_neighbors[v];
        if neighbor[v] {
            remaining -= 1;
            open = open.saturating_sub(1);
        }
        beginning_crossings += (remaining * open) as u64;
    }

    let mut end_crossings: u64 = 0;
    remaining = state.placed_neighbors[vertex];
    for &v in state.spine.iter().rev() {
        if remaining == 0 {
            break;
        }
        let mut open = state.unplaced_neighbors[v];
        if neighbor[v] {
            remaining -= 1;
            open = open.saturating_sub(1);
        }
        end_crossings += (remaining * open) as u64;
    }

    if beginning_crossings < end_crossings {
        Placement::Beginning
    } else {
        Placement::End
    }
}

/// Sums the spine lengths the closed edges of `vertex` would get at the
/// beginning; the end total follows from the placed-neighbor count.
fn minimize_edge_length(vertex: usize, state: &PlacementState) -> Placement {
    let graph = state.graph;
    let mut neighbor = vec![false; graph.n()];
    for &e in graph.vertex(vertex).edge_ids() {
        neighbor[graph.edge(e).other_end(vertex)] = true;
    }

    let placed_neighbors = state.placed_neighbors[vertex];
    let mut beginning_length: usize = 0;
    let mut remaining = placed_neighbors;
    for &v in state.spine.iter() {
        if remaining == 0 {
            break;
        }
        beginning_length += remaining;
        if neighbor[v] {
            remaining -= 1;
        }
    }

    let end_length = placed_neighbors * (state.spine.len() + 1) - beginning_length;
    if beginning_length < end_length {
        Placement::Beginning
    } else {
        Placement::End
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> Graph {
        // 3x3 grid
        Graph::from_edges(
            9,
            &[
                (0, 1),
                (1, 2),
                (3, 4),
                (4, 5),
                (6, 7),
                (7, 8),
                (0, 3),
                (3, 6),
                (1, 4),
                (4, 7),
                (2, 5),
                (5, 8),
            ],
        )
        .unwrap()
    }

    #[test]
    fn all_strategy_combinations_build_valid_spines() {
        let g = grid();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let selectors = [
            VertexSelector::Next,
            VertexSelector::Random,
            VertexSelector::InCon,
            VertexSelector::OutCon,
            VertexSelector::Connectivity,
        ];
        let placers = [
            VertexPlacer::Fixed,
            VertexPlacer::Random,
            VertexPlacer::Crossings,
            VertexPlacer::ELen,
        ];
        for selector in selectors {
            for placer in placers {
                let mut e = crate::model::Embedding::new(&p);
                connectivity_order(&mut e, selector, placer, &mut rng);
                e.validate().unwrap_or_else(|err| {
                    panic!("{selector:?}/{placer:?} broke the spine: {err}")
                });
            }
        }
    }

    #[test]
    fn next_selector_with_fixed_placer_is_identity() {
        let g = grid();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut e = crate::model::Embedding::new(&p);
        connectivity_order(
            &mut e,
            VertexSelector::Next,
            VertexPlacer::Fixed,
            &mut rng,
        );
        assert_eq!(e.spine(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn connectivity_selector_grows_around_the_seed() {
        let g = grid();
        let mut rng = StdRng::seed_from_u64(0);
        let mut state = PlacementState::new(&g);
        let first = select(VertexSelector::Connectivity, &state, &mut rng);
        state.place(first, Placement::End);
        let second = select(VertexSelector::Connectivity, &state, &mut rng);
        // the second pick must touch the first
        assert!(g.neighbors(first).contains(&second));
    }
}
