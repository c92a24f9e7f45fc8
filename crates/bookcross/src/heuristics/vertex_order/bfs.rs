//! Breadth-first-search vertex orderings.

use std::collections::VecDeque;

use rand::Rng;

use crate::model::{Embedding, Graph, Problem};
use crate::util::random_permutation;

use super::UNPLACED;

/// Orders vertices in BFS visit order with randomized neighbor order,
/// starting from a random vertex. Falls through to further components by
/// advancing the start vertex cyclically.
pub fn random_bfs<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let g = embedding.graph();
    let n = g.n();
    let mut spine = vec![0usize; n];
    let mut vertex_on_spine = vec![UNPLACED; n];
    let mut listed = vec![false; n];
    let mut position = 0usize;
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut start = rng.gen_range(0..n);

    while position < n {
        while vertex_on_spine[start] != UNPLACED {
            start = (start + 1) % n;
        }

        queue.push_back(start);
        while let Some(next) = queue.pop_front() {
            listed[next] = true;
            vertex_on_spine[next] = position;
            spine[position] = next;
            position += 1;

            let neighbors = g.neighbors(next);
            let order = random_permutation(neighbors.len(), rng);
            for i in order {
                let current = neighbors[i];
                if !listed[current] {
                    listed[current] = true;
                    queue.push_back(current);
                }
            }
        }
    }

    debug_assert_eq!(position, n);
    embedding.set_spine(&spine);
}

/// Builds a BFS spanning tree (random start, randomized neighbor order) and
/// orders the vertices along a crossing-free circular drawing of that tree,
/// obtained by a smallest-degree DFS on the tree.
pub fn bfs_tree<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let g = embedding.graph();
    let n = g.n();
    let mut tree = Graph::builder(n);
    let mut visited = vec![false; n];
    let mut number_visited = 0usize;
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut start = rng.gen_range(0..n);

    while number_visited < n {
        while visited[start] {
            start = (start + 1) % n;
        }

        visited[start] = true;
        queue.push_back(start);
        while let Some(next) = queue.pop_front() {
            number_visited += 1;

            let neighbors = g.neighbors(next);
            let order = random_permutation(neighbors.len(), rng);
            for i in order {
                let current = neighbors[i];
                if !visited[current] {
                    visited[current] = true;
                    queue.push_back(current);
                    tree.add_edge(current, next);
                }
            }
        }
    }

    let tree = tree.finish().expect("BFS tree is a simple graph");
    let tree_problem = Problem::new(tree, 1).expect("one page is a valid budget");
    let mut tree_embedding = Embedding::new(&tree_problem);
    super::smallest_degree_dfs(&mut tree_embedding, rng);

    // tree vertices share the indices of the original graph, so its spine
    // carries over directly
    embedding.set_spine(tree_embedding.spine());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn bfs_covers_disconnected_graphs() {
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (3, 4)]).unwrap();
        let p = Problem::new(g, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        let mut e = crate::model::Embedding::new(&p);
        random_bfs(&mut e, &mut rng);
        e.validate().unwrap();
    }

    #[test]
    fn tree_order_embeds_trees_without_crossings() {
        // the heuristic draws a spanning tree crossing-free; on a tree the
        // spanning tree is the graph itself
        let g = Graph::from_edges(
            7,
            &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)],
        )
        .unwrap();
        let p = Problem::new(g, 1).unwrap();
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut e = crate::model::Embedding::new(&p);
            bfs_tree(&mut e, &mut rng);
            e.validate().unwrap();
            assert_eq!(e.crossings(), 0, "seed {seed}:\n{e}");
        }
    }
}
