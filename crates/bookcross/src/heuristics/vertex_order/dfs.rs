//! Depth-first-search vertex orderings.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::Embedding;

use super::{clear_window, window_continues, window_is_trivial, UNPLACED};

/// Random DFS over the whole spine: random root, randomized neighbor order.
pub fn random_dfs<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    random_dfs_window(embedding, 0, embedding.n(), rng);
}

/// Random DFS restricted to the spine window `[begin, end)` (wraps when
/// `end < begin`). Disconnected graphs are handled by advancing the root
/// cyclically to the next unordered vertex.
pub fn random_dfs_window<R: Rng>(embedding: &mut Embedding, begin: usize, end: usize, rng: &mut R) {
    if window_is_trivial(begin, end) {
        return;
    }
    let g = embedding.graph();
    let n = g.n();
    let spine = embedding.spine().to_vec();
    let mut vertex_on_spine = embedding.vertex_on_spine().to_vec();
    clear_window(&mut vertex_on_spine, &spine, begin, end);

    let mut root_position = if begin < end {
        begin + rng.gen_range(0..end - begin)
    } else {
        let length = n - begin + end;
        (begin + rng.gen_range(0..length)) % n
    };
    let mut root = spine[root_position];

    let mut stack: Vec<usize> = Vec::new();
    let mut visited = vec![false; n];
    let mut idx = begin;

    while window_continues(idx, begin, end) {
        while vertex_on_spine[root] != UNPLACED {
            root_position = (root_position + 1) % n;
            root = spine[root_position];
        }

        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;

            if vertex_on_spine[v] == UNPLACED {
                vertex_on_spine[v] = idx;
                idx += 1;
                if begin > end {
                    idx %= n;
                }
            }

            let mut neighbors: Vec<usize> = g
                .neighbors(v)
                .into_iter()
                .filter(|&u| !visited[u])
                .collect();
            neighbors.shuffle(rng);
            stack.extend(neighbors);
        }
    }

    embedding.set_vertex_on_spine(&vertex_on_spine);
}

/// DFS rooted at a smallest-degree vertex; neighbors are pushed in
/// decreasing degree order so smaller degrees are explored first.
pub fn smallest_degree_dfs<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    smallest_degree_dfs_window(embedding, 0, embedding.n(), rng);
}

/// Smallest-degree DFS restricted to the spine window `[begin, end)`.
///
/// The RNG only matters when the window has to fall through to another
/// connected component; the traversal itself is degree-driven.
pub fn smallest_degree_dfs_window<R: Rng>(
    embedding: &mut Embedding,
    begin: usize,
    end: usize,
    _rng: &mut R,
) {
    if window_is_trivial(begin, end) {
        return;
    }
    let g = embedding.graph();
    let n = g.n();
    let spine = embedding.spine().to_vec();
    let mut vertex_on_spine = embedding.vertex_on_spine().to_vec();
    clear_window(&mut vertex_on_spine, &spine, begin, end);

    let mut root_position = smallest_degree_position(embedding, &spine, begin, end);
    let mut root = spine[root_position];

    let mut stack: Vec<usize> = Vec::new();
    let mut visited = vec![false; n];
    let mut idx = begin;

    while window_continues(idx, begin, end) {
        while vertex_on_spine[root] != UNPLACED {
            root_position = (root_position + 1) % n;
            root = spine[root_position];
        }

        stack.push(root);
        while let Some(v) = stack.pop() {
            if visited[v] {
                continue;
            }
            visited[v] = true;

            if vertex_on_spine[v] == UNPLACED {
                vertex_on_spine[v] = idx;
                idx += 1;
                if begin > end {
                    idx %= n;
                }
            }

            let mut neighbors: Vec<usize> = g
                .neighbors(v)
                .into_iter()
                .filter(|&u| !visited[u])
                .collect();
            // descending degree, so the smallest degree ends on top of the stack
            neighbors.sort_by(|&x, &y| g.degree_of(y).cmp(&g.degree_of(x)));
            stack.extend(neighbors);
        }
    }

    embedding.set_vertex_on_spine(&vertex_on_spine);
}

/// Keeps a random spine prefix and reorders the suffix with a random DFS
/// rooted inside it.
pub fn idfs<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let n = embedding.n();
    let root_position = rng.gen_range(0..n);
    random_dfs_window(embedding, root_position, n, rng);
}

fn smallest_degree_position(
    embedding: &Embedding,
    spine: &[usize],
    begin: usize,
    end: usize,
) -> usize {
    let g = embedding.graph();
    let mut best_position = begin;
    let mut best_degree = usize::MAX;
    let mut consider = |i: usize, best_position: &mut usize, best_degree: &mut usize| {
        let degree = g.degree_of(spine[i]);
        if degree < *best_degree {
            *best_degree = degree;
            *best_position = i;
        }
    };
    if begin < end {
        for i in begin..end {
            consider(i, &mut best_position, &mut best_degree);
        }
    } else {
        for i in begin..embedding.n() {
            consider(i, &mut best_position, &mut best_degree);
        }
        for i in 0..end {
            consider(i, &mut best_position, &mut best_degree);
        }
    }
    best_position
}
