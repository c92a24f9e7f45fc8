//! Greedy move primitives shared by the optimizers.
//!
//! All of them keep the embedding's crossing cache exact through gain
//! bookkeeping, so no primitive ever forces a full recount beyond the
//! first lazy one.

use crate::model::Embedding;

/// Moves the edge to its cheapest page and returns the gain (>= 0).
///
/// Per-page costs come from a single O(m) pass over the can-cross
/// predicate; the crossing cache is updated by the gain.
pub fn find_best_page_for_edge(embedding: &mut Embedding, edge_index: usize) -> i64 {
    let start_crossings = embedding.crossings() as i64;

    let mut per_page = vec![0i64; embedding.k()];
    for other in 0..embedding.m() {
        if other != edge_index && embedding.can_edges_cross(other, edge_index) {
            per_page[embedding.page_of(other)] += 1;
        }
    }

    let old_page = embedding.page_of(edge_index);
    let old_crossings = per_page[old_page];
    let mut best_page = old_page;
    let mut best_crossings = old_crossings;
    for (page, &crossings) in per_page.iter().enumerate() {
        if crossings < best_crossings {
            best_crossings = crossings;
            best_page = page;
        }
    }

    embedding.move_edge_to_page(edge_index, best_page);
    let gain = old_crossings - best_crossings;
    embedding.set_crossings((start_crossings - gain) as u64);
    gain
}

/// Runs [`find_best_page_for_edge`] once per edge in the given order.
pub fn find_best_page_for_edges_in_order(embedding: &mut Embedding, order: &[usize]) -> i64 {
    order
        .iter()
        .map(|&edge| find_best_page_for_edge(embedding, edge))
        .sum()
}

/// Repeats full edge rounds until one yields no gain.
pub fn exhaustive_distribution_optimisation(embedding: &mut Embedding, order: &[usize]) -> i64 {
    let mut overall_gain = 0i64;
    loop {
        let round_gain = find_best_page_for_edges_in_order(embedding, order);
        if round_gain <= 0 {
            return overall_gain;
        }
        overall_gain += round_gain;
    }
}

/// Crossing-count change caused by exchanging the vertices at two adjacent
/// spine positions (`right = left + 1`, or the wrap-around pair
/// `(n - 1, 0)`). Positive means the swap improves the embedding. Neither
/// the spine nor the cache is touched.
///
/// For every same-page pair of one edge per vertex with distinct far
/// endpoints, the relative order of the four positions decides whether the
/// pair crosses before or after the swap; edges incident to both vertices
/// contribute nothing.
pub fn swap_gain(embedding: &Embedding, left_position: usize, right_position: usize) -> i64 {
    let n = embedding.n();
    let wraps = left_position == n - 1 && right_position == 0;
    assert!(
        left_position + 1 == right_position || wraps,
        "positions {left_position} and {right_position} are not adjacent"
    );

    let g = embedding.graph();
    let left_vertex = embedding.vertex_at(left_position);
    let right_vertex = embedding.vertex_at(right_position);

    let mut crossings_before = 0i64;
    let mut crossings_after = 0i64;

    for &left_edge in g.vertex(left_vertex).edge_ids() {
        let page = embedding.page_of(left_edge);
        let left_far = embedding.position_of(g.edge(left_edge).other_end(left_vertex));
        if left_far == right_position {
            continue;
        }

        for &right_edge in g.vertex(right_vertex).edge_ids() {
            if right_edge == left_edge || embedding.page_of(right_edge) != page {
                continue;
            }
            let right_far = embedding.position_of(g.edge(right_edge).other_end(right_vertex));
            if right_far == left_position || right_far == left_far {
                continue;
            }

            if wraps {
                // both edges span the whole spine: left runs to n-1, right
                // starts at 0
                if left_far < right_far {
                    crossings_before += 1;
                } else {
                    crossings_after += 1;
                }
            } else if left_far < left_position {
                if right_far < right_position {
                    if right_far < left_far {
                        crossings_after += 1;
                    } else {
                        crossings_before += 1;
                    }
                } else {
                    crossings_after += 1;
                }
            } else if right_far < right_position {
                crossings_before += 1;
            } else if right_far < left_far {
                crossings_after += 1;
            } else {
                crossings_before += 1;
            }
        }
    }

    crossings_before - crossings_after
}

/// Swaps two adjacent positions while keeping the crossing cache exact.
/// Returns the gain of the swap.
pub(crate) fn swap_adjacent_tracked(
    embedding: &mut Embedding,
    left_position: usize,
    right_position: usize,
) -> i64 {
    let before = embedding.crossings() as i64;
    let gain = swap_gain(embedding, left_position, right_position);
    embedding.swap_positions(left_position, right_position);
    embedding.set_crossings((before - gain) as u64);
    gain
}

/// Moves a vertex through adjacent tracked swaps, preserving the
/// sequential-swap semantics of `Embedding::move_vertex_to` while keeping
/// the cache exact. Returns the total gain.
pub(crate) fn move_vertex_tracked(
    embedding: &mut Embedding,
    old_position: usize,
    new_position: usize,
) -> i64 {
    let mut total = 0i64;
    if new_position < old_position {
        for i in (new_position + 1..=old_position).rev() {
            total += swap_adjacent_tracked(embedding, i - 1, i);
        }
    } else {
        for i in old_position..new_position {
            total += swap_adjacent_tracked(embedding, i, i + 1);
        }
    }
    total
}

/// Moves the vertex at `start_position` to its best spine position.
///
/// Sweeps it to the right end accumulating swap gains, back, then to the
/// left end, and finally applies the swaps to the best prefix found.
/// Runs in O(n · Δ²); the cache ends exact. Returns the gain (>= 0).
pub fn find_best_position_for_vertex(embedding: &mut Embedding, start_position: usize) -> i64 {
    let n = embedding.n();
    let start_crossings = embedding.crossings() as i64;
    let mut best_position = start_position;
    let mut current_gain = 0i64;
    let mut gain = 0i64;

    // sweep right
    for q in start_position + 1..n {
        current_gain += swap_gain(embedding, q - 1, q);
        embedding.swap_positions(q - 1, q);
        if current_gain > gain {
            gain = current_gain;
            best_position = q;
        }
    }
    for q in (start_position + 1..n).rev() {
        embedding.swap_positions(q - 1, q);
    }
    current_gain = 0;

    // sweep left
    for q in (0..start_position).rev() {
        current_gain += swap_gain(embedding, q, q + 1);
        embedding.swap_positions(q, q + 1);
        if current_gain > gain {
            gain = current_gain;
            best_position = q;
        }
    }
    for q in 0..start_position {
        embedding.swap_positions(q, q + 1);
    }

    // apply the winning move
    if best_position > start_position {
        for q in start_position + 1..=best_position {
            embedding.swap_positions(q - 1, q);
        }
    } else if best_position < start_position {
        for q in (best_position..start_position).rev() {
            embedding.swap_positions(q, q + 1);
        }
    }

    embedding.set_crossings((start_crossings - gain) as u64);
    gain
}

/// Runs [`find_best_position_for_vertex`] once per vertex in the given
/// order (entries are vertex indices).
pub fn find_best_position_for_vertices_in_order(embedding: &mut Embedding, order: &[usize]) -> i64 {
    let mut gain = 0i64;
    for &vertex in order {
        let position = embedding.position_of(vertex);
        gain += find_best_position_for_vertex(embedding, position);
    }
    gain
}

/// Repeats full vertex rounds until one yields no gain.
pub fn exhaustive_spine_optimisation(embedding: &mut Embedding, order: &[usize]) -> i64 {
    let mut overall_gain = 0i64;
    loop {
        let round_gain = find_best_position_for_vertices_in_order(embedding, order);
        if round_gain <= 0 {
            return overall_gain;
        }
        overall_gain += round_gain;
    }
}

/// Best position for one vertex while simultaneously re-paging its
/// incident edges at every candidate position. The strongest single-vertex
/// move. Returns the accumulated gain of the chosen position (>= 0); the
/// re-pages along the way can shift the exact outcome slightly, the
/// crossing cache tracks the exact count throughout either way.
pub fn optimise_position_of_vertex(embedding: &mut Embedding, start_position: usize) -> i64 {
    let n = embedding.n();
    let vertex = embedding.vertex_at(start_position);
    let mut best_position = start_position;

    let initial_gain = best_pages_for_incident_edges(embedding, vertex);
    let mut gain = initial_gain;
    let mut current_gain = initial_gain;

    // sweep right, re-paging at every stop
    for q in start_position + 1..n {
        current_gain += swap_adjacent_tracked(embedding, q - 1, q);
        current_gain += best_pages_for_incident_edges(embedding, vertex);
        if current_gain > gain {
            gain = current_gain;
            best_position = q;
        }
    }
    for q in (start_position + 1..n).rev() {
        swap_adjacent_tracked(embedding, q - 1, q);
    }
    best_pages_for_incident_edges(embedding, vertex);
    current_gain = initial_gain;

    // sweep left
    for q in (0..start_position).rev() {
        current_gain += swap_adjacent_tracked(embedding, q, q + 1);
        current_gain += best_pages_for_incident_edges(embedding, vertex);
        if current_gain > gain {
            gain = current_gain;
            best_position = q;
        }
    }
    for q in 0..start_position {
        swap_adjacent_tracked(embedding, q, q + 1);
    }

    // apply the winning move and settle the pages there
    if best_position > start_position {
        for q in start_position + 1..=best_position {
            swap_adjacent_tracked(embedding, q - 1, q);
        }
    } else if best_position < start_position {
        for q in (best_position..start_position).rev() {
            swap_adjacent_tracked(embedding, q, q + 1);
        }
    }
    best_pages_for_incident_edges(embedding, vertex);

    gain
}

/// Combined round: one [`optimise_position_of_vertex`] per vertex in the
/// given order (entries are vertex indices).
pub fn optimise_all_vertices_in_order(embedding: &mut Embedding, order: &[usize]) -> i64 {
    let mut gain = 0i64;
    for &vertex in order {
        let position = embedding.position_of(vertex);
        gain += optimise_position_of_vertex(embedding, position);
    }
    gain
}

/// Re-pages every edge incident to `vertex`; returns the total gain.
pub fn best_pages_for_incident_edges(embedding: &mut Embedding, vertex: usize) -> i64 {
    let edges: Vec<usize> = embedding.graph().vertex(vertex).edge_ids().to_vec();
    edges
        .into_iter()
        .map(|edge| find_best_page_for_edge(embedding, edge))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn k5() -> Graph {
        let mut pairs = Vec::new();
        for a in 0..5 {
            for b in a + 1..5 {
                pairs.push((a, b));
            }
        }
        Graph::from_edges(5, &pairs).unwrap()
    }

    #[test]
    fn swap_gain_matches_recount_on_sampled_k5_embeddings() {
        let g = k5();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..60 {
            let spine = crate::util::random_permutation(5, &mut rng);
            let distribution: Vec<usize> = (0..10).map(|_| rng.gen_range(0..2)).collect();
            let e = Embedding::with_layout(&p, &spine, &distribution);
            for left in 0..5 {
                let right = (left + 1) % 5;
                let gain = swap_gain(&e, left, right);
                let mut swapped = e.clone();
                swapped.swap_positions(left, right);
                let before = e.clone().crossings() as i64;
                let after = swapped.crossings() as i64;
                assert_eq!(
                    before - after,
                    gain,
                    "swap at ({left},{right}) on spine {spine:?} dist {distribution:?}"
                );
            }
        }
    }

    #[test]
    fn tracked_swaps_keep_the_cache_exact() {
        let g = k5();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut e = Embedding::new(&p);
        let distribution: Vec<usize> = (0..10).map(|_| rng.gen_range(0..2)).collect();
        e.set_distribution(&distribution);
        e.crossings();
        for _ in 0..20 {
            let left = rng.gen_range(0..4);
            swap_adjacent_tracked(&mut e, left, left + 1);
            let cached = e.cached_crossings().unwrap();
            assert_eq!(cached, e.recount_crossings());
        }
    }

    #[test]
    fn best_page_move_never_hurts() {
        let g = k5();
        let p = Problem::new(g, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let mut e = Embedding::new(&p);
        let distribution: Vec<usize> = (0..10).map(|_| rng.gen_range(0..3)).collect();
        e.set_distribution(&distribution);
        for edge in 0..e.m() {
            let before = e.crossings();
            let gain = find_best_page_for_edge(&mut e, edge);
            assert!(gain >= 0);
            assert_eq!(e.cached_crossings().unwrap(), before - gain as u64);
            assert_eq!(e.cached_crossings().unwrap(), e.recount_crossings());
        }
    }

    #[test]
    fn best_position_move_never_hurts_and_updates_cache() {
        let g = k5();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for seed in 0..10u64 {
            let mut inner = StdRng::seed_from_u64(seed);
            let spine = crate::util::random_permutation(5, &mut inner);
            let distribution: Vec<usize> = (0..10).map(|_| inner.gen_range(0..2)).collect();
            let mut e = Embedding::with_layout(&p, &spine, &distribution);
            let before = e.crossings();
            let gain = find_best_position_for_vertex(&mut e, rng.gen_range(0..5));
            assert!(gain >= 0);
            assert_eq!(e.cached_crossings().unwrap(), before - gain as u64);
            assert_eq!(e.cached_crossings().unwrap(), e.recount_crossings());
        }
    }

    #[test]
    fn combined_vertex_move_keeps_cache_exact() {
        let g = k5();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        let mut e = Embedding::new(&p);
        let distribution: Vec<usize> = (0..10).map(|_| rng.gen_range(0..2)).collect();
        e.set_distribution(&distribution);
        let gain = optimise_position_of_vertex(&mut e, 2);
        assert!(gain >= 0);
        assert_eq!(e.cached_crossings().unwrap(), e.recount_crossings());
    }

    #[test]
    fn move_vertex_tracked_matches_plain_move() {
        let g = k5();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let distribution: Vec<usize> = (0..10).map(|_| rng.gen_range(0..2)).collect();
        for (from, to) in [(0usize, 4usize), (4, 0), (1, 3), (3, 1)] {
            let mut tracked = Embedding::new(&p);
            tracked.set_distribution(&distribution);
            tracked.crossings();
            let mut plain = tracked.clone();
            move_vertex_tracked(&mut tracked, from, to);
            plain.move_vertex_to(from, to);
            assert_eq!(tracked.spine(), plain.spine());
            assert_eq!(
                tracked.cached_crossings().unwrap(),
                plain.recount_crossings()
            );
        }
    }
}
