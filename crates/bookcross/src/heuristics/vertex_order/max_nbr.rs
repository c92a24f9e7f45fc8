//! MaxNbr orderings: highest-degree vertex first, then its unprocessed
//! neighbors by increasing degree.

use rand::Rng;

use crate::model::Embedding;
use crate::util::random_permutation;

use super::{clear_window, window_is_trivial, UNPLACED};

/// MaxNbr over the whole spine.
pub fn max_nbr<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    max_nbr_window(embedding, 0, embedding.n(), rng);
}

/// MaxNbr restricted to the spine window `[begin, end)` (wraps when
/// `end < begin`). Every vertex is processed, but positions are assigned
/// only to window vertices. Ties between equal degrees fall in random order.
pub fn max_nbr_window<R: Rng>(embedding: &mut Embedding, begin: usize, end: usize, rng: &mut R) {
    if window_is_trivial(begin, end) {
        return;
    }
    let g = embedding.graph();
    let n = g.n();
    let spine = embedding.spine().to_vec();
    let mut vertex_on_spine = embedding.vertex_on_spine().to_vec();
    clear_window(&mut vertex_on_spine, &spine, begin, end);

    // random permutation, stably resorted: equal degrees keep random order
    let mut pending = random_permutation(n, rng);
    pending.sort_by(|&x, &y| g.degree_of(y).cmp(&g.degree_of(x)));

    let mut visited = vec![false; n];
    let mut idx = begin;
    let place = |v: usize, vertex_on_spine: &mut [usize], idx: &mut usize| {
        if vertex_on_spine[v] == UNPLACED {
            vertex_on_spine[v] = *idx;
            *idx = (*idx + 1) % n;
        }
    };

    for i in 0..pending.len() {
        let v = pending[i];
        if visited[v] {
            continue;
        }
        visited[v] = true;
        place(v, &mut vertex_on_spine, &mut idx);

        let mut neighbors: Vec<usize> = g
            .neighbors(v)
            .into_iter()
            .filter(|&u| !visited[u])
            .collect();
        neighbors.sort_by_key(|&u| g.degree_of(u));

        for u in neighbors {
            place(u, &mut vertex_on_spine, &mut idx);
            visited[u] = true;
        }
    }

    embedding.set_vertex_on_spine(&vertex_on_spine);
}

/// MaxNbr on effective degrees: placing a vertex lowers the degree of its
/// neighbors, and the pending vertices are reranked after every expansion.
pub fn max_nbr_removing(embedding: &mut Embedding) {
    let g = embedding.graph();
    let n = g.n();
    if n <= 1 {
        return;
    }
    let mut vertex_on_spine = vec![UNPLACED; n];
    let mut degree: Vec<usize> = (0..n).map(|v| g.degree_of(v)).collect();

    let mut pending: Vec<usize> = (0..n).collect();
    pending.sort_by(|&x, &y| degree[y].cmp(&degree[x]));

    let mut visited = vec![false; n];
    let mut idx = 0usize;

    while let Some(&v) = pending.first() {
        pending.remove(0);
        visited[v] = true;
        degree[v] = 0;

        if vertex_on_spine[v] == UNPLACED {
            vertex_on_spine[v] = idx;
            idx = (idx + 1) % n;
        }

        let mut neighbors: Vec<usize> = g
            .neighbors(v)
            .into_iter()
            .filter(|&u| !visited[u])
            .collect();
        neighbors.sort_by_key(|&u| degree[u]);

        for u in neighbors {
            if vertex_on_spine[u] == UNPLACED {
                vertex_on_spine[u] = idx;
                idx = (idx + 1) % n;
            }
            pending.retain(|&w| w != u);
            visited[u] = true;
            degree[u] = 0;

            for w in g.neighbors(u) {
                degree[w] = degree[w].saturating_sub(1);
            }
        }

        pending.sort_by(|&x, &y| degree[y].cmp(&degree[x]));
    }

    embedding.set_vertex_on_spine(&vertex_on_spine);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wheel() -> Graph {
        // hub 0 over a 5-cycle
        Graph::from_edges(
            6,
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (0, 5),
                (1, 2),
                (2, 3),
                (3, 4),
                (4, 5),
                (1, 5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn highest_degree_vertex_comes_first() {
        let g = wheel();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let mut e = crate::model::Embedding::new(&p);
        max_nbr(&mut e, &mut rng);
        e.validate().unwrap();
        assert_eq!(e.position_of(0), 0);
    }

    #[test]
    fn removing_variant_yields_valid_order() {
        let g = wheel();
        let p = Problem::new(g, 2).unwrap();
        let mut e = crate::model::Embedding::new(&p);
        max_nbr_removing(&mut e);
        e.validate().unwrap();
        assert_eq!(e.position_of(0), 0);
    }

    #[test]
    fn wrapping_window_assigns_window_positions() {
        let g = wheel();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        let mut e = crate::model::Embedding::new(&p);
        let before = e.spine().to_vec();
        max_nbr_window(&mut e, 4, 2, &mut rng);
        e.validate().unwrap();
        assert_eq!(e.spine()[2], before[2]);
        assert_eq!(e.spine()[3], before[3]);
    }
}
