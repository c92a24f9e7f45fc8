//! Full-embedding heuristics: traversal-based vertex orders that place
//! every edge on its cheapest page the moment both endpoints are ordered.
//! All of them need `k > 1` (checked by the enum wrapper).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{can_edges_cross, Embedding, Graph, NO_PAGE};

use super::vertex_order::connectivity::{select, PlacementState, VertexSelector};
use super::vertex_order::greedy_connectivity::collect_placed_edges;

const UNPLACED: usize = usize::MAX;

/// Random DFS ordering; each edge is paged when its second endpoint is
/// visited, using the positions fixed so far.
pub fn full_random_dfs<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let g = embedding.graph();
    let n = g.n();
    if n <= 1 {
        return;
    }
    let mut positions = vec![UNPLACED; n];
    let mut distribution = vec![NO_PAGE; embedding.m()];
    let mut placed_edges: Vec<usize> = Vec::with_capacity(g.m());

    let spine = embedding.spine().to_vec();
    let mut root_position = rng.gen_range(0..n);
    let mut root = spine[root_position];

    let mut stack: Vec<usize> = Vec::new();
    let mut visited = vec![false; n];
    let mut idx = 0usize;

    while idx < n {
        while positions[root] != UNPLACED {
            root_position = (root_position + 1) % n;
            root = spine[root_position];
        }

        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;

            if positions[v] == UNPLACED {
                positions[v] = idx;
                idx += 1;
            }

            let mut incident: Vec<usize> = g.vertex(v).edge_ids().to_vec();
            incident.shuffle(rng);
            let mut neighbors: Vec<usize> = Vec::new();
            for e in incident {
                let u = g.edge(e).other_end(v);
                if !visited[u] {
                    neighbors.push(u);
                } else {
                    place_edge_on_best_page(
                        embedding,
                        e,
                        &placed_edges,
                        &positions,
                        &mut distribution,
                    );
                    placed_edges.push(e);
                }
            }
            neighbors.shuffle(rng);
            stack.extend(neighbors);
        }
    }

    finish(embedding, &positions, &distribution, placed_edges.len());
}

/// Smallest-degree DFS ordering with incremental edge placement.
pub fn full_smallest_degree_dfs<R: Rng>(embedding: &mut Embedding, _rng: &mut R) {
    let g = embedding.graph();
    let n = g.n();
    if n <= 1 {
        return;
    }
    let mut positions = vec![UNPLACED; n];
    let mut distribution = vec![NO_PAGE; embedding.m()];
    let mut placed_edges: Vec<usize> = Vec::with_capacity(g.m());

    let spine = embedding.spine().to_vec();
    let mut root_position = (0..n)
        .min_by_key(|&i| g.degree_of(spine[i]))
        .expect("graph has vertices");
    let mut root = spine[root_position];

    let mut stack: Vec<usize> = Vec::new();
    let mut visited = vec![false; n];
    let mut idx = 0usize;

    while idx < n {
        while positions[root] != UNPLACED {
            root_position = (root_position + 1) % n;
            root = spine[root_position];
        }

        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;

            if positions[v] == UNPLACED {
                positions[v] = idx;
                idx += 1;
            }

            let mut neighbors: Vec<usize> = Vec::new();
            for &e in g.vertex(v).edge_ids() {
                let u = g.edge(e).other_end(v);
                if !visited[u] {
                    neighbors.push(u);
                } else {
                    place_edge_on_best_page(
                        embedding,
                        e,
                        &placed_edges,
                        &positions,
                        &mut distribution,
                    );
                    placed_edges.push(e);
                }
            }
            // descending degree, so the smallest degree ends on top
            neighbors.sort_by(|&x, &y| g.degree_of(y).cmp(&g.degree_of(x)));
            stack.extend(neighbors);
        }
    }

    finish(embedding, &positions, &distribution, placed_edges.len());
}

/// Random BFS ordering with incremental edge placement.
pub fn full_random_bfs<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    use std::collections::VecDeque;

    let g = embedding.graph();
    let n = g.n();
    let mut positions = vec![UNPLACED; n];
    let mut distribution = vec![NO_PAGE; embedding.m()];
    let mut placed_edges: Vec<usize> = Vec::with_capacity(g.m());

    let mut listed = vec![false; n];
    let mut placed = vec![false; n];
    let mut position = 0usize;
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut start = rng.gen_range(0..n);

    while position < n {
        while positions[start] != UNPLACED {
            start = (start + 1) % n;
        }

        queue.push_back(start);
        listed[start] = true;
        while let Some(next) = queue.pop_front() {
            placed[next] = true;
            positions[next] = position;
            position += 1;

            let mut incident: Vec<usize> = g.vertex(next).edge_ids().to_vec();
            incident.shuffle(rng);
            for e in incident {
                let current = g.edge(e).other_end(next);
                if !listed[current] {
                    listed[current] = true;
                    queue.push_back(current);
                } else if placed[current] {
                    place_edge_on_best_page(
                        embedding,
                        e,
                        &placed_edges,
                        &positions,
                        &mut distribution,
                    );
                    placed_edges.push(e);
                }
            }
        }
    }

    finish(embedding, &positions, &distribution, placed_edges.len());
}

/// Connectivity-driven placement that inserts each vertex at the internal
/// position minimizing crossings, choosing pages for its closed edges in
/// the same step.
pub fn full_greedy_connectivity<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let g = embedding.graph();
    let n = g.n();
    let k = embedding.k();
    if n == 0 {
        return;
    }
    let mut state = PlacementState::new(g);
    let mut spine: Vec<usize> = Vec::with_capacity(n);
    let mut distribution = vec![NO_PAGE; embedding.m()];
    let mut placed_edges: Vec<usize> = Vec::new();

    let start = select(VertexSelector::Connectivity, &state, rng);
    state.mark_placed(start);
    spine.push(start);

    for _ in 1..n {
        let vertex = select(VertexSelector::Connectivity, &state, rng);
        let position = insert_at_best_position(
            g,
            k,
            &spine,
            &state,
            vertex,
            &placed_edges,
            &mut distribution,
        );
        spine.insert(position, vertex);

        collect_placed_edges(g, &state, vertex, &mut placed_edges);
        state.mark_placed(vertex);
    }

    assert_eq!(
        placed_edges.len(),
        embedding.m(),
        "every edge must be distributed"
    );

    let mut positions = vec![0usize; n];
    for (position, &v) in spine.iter().enumerate() {
        positions[v] = position;
    }
    finish(embedding, &positions, &distribution, placed_edges.len());
}

/// Picks the insertion slot whose closed edges can be paged most cheaply
/// (per edge, the best page counts), then pages the closed edges for that
/// slot.
#[allow(clippy::too_many_arguments)]
fn insert_at_best_position(
    graph: &Graph,
    k: usize,
    spine: &[usize],
    state: &PlacementState,
    vertex: usize,
    placed_edges: &[usize],
    distribution: &mut [usize],
) -> usize {
    let slots = spine.len() + 1;
    let mut crossings_at = vec![0u64; slots];

    let mut closed_edges: Vec<usize> = Vec::new();
    collect_placed_edges(graph, state, vertex, &mut closed_edges);

    let position_on = |v: usize| -> usize {
        spine
            .iter()
            .position(|&x| x == v)
            .expect("vertex is on the partial spine")
    };

    for &uv in &closed_edges {
        let pos_u = position_on(graph.edge(uv).other_end(vertex));
        let mut per_page_per_slot = vec![vec![0u64; slots]; k];
        for &xy in placed_edges {
            let edge = graph.edge(xy);
            let pos_x = position_on(edge.start());
            let pos_y = position_on(edge.target());
            let (pos_x, pos_y) = if pos_x <= pos_y {
                (pos_x, pos_y)
            } else {
                (pos_y, pos_x)
            };
            let page = distribution[xy];

            if pos_u == pos_x || pos_u == pos_y {
                continue;
            }
            if pos_u < pos_x || pos_u > pos_y {
                for slot in pos_x + 1..=pos_y {
                    per_page_per_slot[page][slot] += 1;
                }
            } else {
                for slot in 0..=pos_x {
                    per_page_per_slot[page][slot] += 1;
                }
                for slot in pos_y + 1..slots {
                    per_page_per_slot[page][slot] += 1;
                }
            }
        }

        for slot in 0..slots {
            let cheapest = (0..k)
                .map(|page| per_page_per_slot[page][slot])
                .min()
                .expect("k >= 1");
            crossings_at[slot] += cheapest;
        }
    }

    // last argmin: later slots win ties
    let mut best_slot = 0;
    let mut min = u64::MAX;
    for (slot, &c) in crossings_at.iter().enumerate() {
        if c <= min {
            min = c;
            best_slot = slot;
        }
    }

    // page the closed edges as if the vertex already sat at the chosen slot
    for &uv in &closed_edges {
        let mut pos_u = position_on(graph.edge(uv).other_end(vertex));
        if pos_u >= best_slot {
            pos_u += 1;
        }

        let mut per_page = vec![0u64; k];
        for &xy in placed_edges {
            let edge = graph.edge(xy);
            let mut pos_x = position_on(edge.start());
            let mut pos_y = position_on(edge.target());
            if pos_x >= best_slot {
                pos_x += 1;
            }
            if pos_y >= best_slot {
                pos_y += 1;
            }
            if can_edges_cross(pos_u, best_slot, pos_x, pos_y) {
                per_page[distribution[xy]] += 1;
            }
        }

        // later pages win ties
        let mut best_page = 0;
        let mut min = u64::MAX;
        for (page, &c) in per_page.iter().enumerate() {
            if c <= min {
                min = c;
                best_page = page;
            }
        }
        distribution[uv] = best_page;
    }

    best_slot
}

/// Pages `edge` where it crosses the fewest already placed edges, judged by
/// the partial `positions` array (every involved endpoint is positioned).
fn place_edge_on_best_page(
    embedding: &Embedding,
    edge: usize,
    placed_edges: &[usize],
    positions: &[usize],
    distribution: &mut [usize],
) {
    let g = embedding.graph();
    let k = embedding.k();
    let e = g.edge(edge);
    let (u, v) = (positions[e.start()], positions[e.target()]);

    let mut per_page = vec![0u64; k];
    for &other in placed_edges {
        let o = g.edge(other);
        if can_edges_cross(u, v, positions[o.start()], positions[o.target()]) {
            per_page[distribution[other]] += 1;
        }
    }

    let mut best_page = 0;
    for (page, &count) in per_page.iter().enumerate() {
        if count < per_page[best_page] {
            best_page = page;
        }
    }
    distribution[edge] = best_page;
}

/// Writes the computed order and distribution back into the embedding.
fn finish(
    embedding: &mut Embedding,
    positions: &[usize],
    distribution: &[usize],
    placed_count: usize,
) {
    assert_eq!(
        placed_count,
        embedding.m(),
        "every edge must be distributed"
    );
    embedding.set_vertex_on_spine(positions);
    embedding.set_distribution(distribution);
}
