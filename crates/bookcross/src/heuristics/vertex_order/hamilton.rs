//! Hamilton-path ordering after Angluin and Valiant: a random walk that
//! never reuses an edge, rotating the path on short-circuits. Finding a
//! Hamilton path is NP-complete, so the walk may give up; the covered
//! prefix is kept and the rest is ordered by a random DFS.

use rand::Rng;

use crate::model::{Embedding, Graph};

use super::random_dfs_window;

/// Orders the vertices along a (partial) Hamilton path.
pub fn hamilton_path<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let path = find_path(embedding.graph(), rng);
    let n = embedding.n();

    if path.len() == n {
        embedding.set_spine(&path);
        return;
    }

    // place the walk prefix, fill the rest in index order, then reorder the
    // suffix with a random DFS
    let mut spine = vec![0usize; n];
    let mut placed = vec![false; n];
    for (i, &v) in path.iter().enumerate() {
        spine[i] = v;
        placed[v] = true;
    }
    let mut idx = path.len();
    for v in 0..n {
        if !placed[v] {
            spine[idx] = v;
            idx += 1;
        }
    }
    embedding.set_spine(&spine);
    random_dfs_window(embedding, path.len(), n, rng);
}

/// The random walk itself. Returns the vertices of the discovered path in
/// order; the path covers all vertices iff a Hamilton path was found.
fn find_path<R: Rng>(graph: &Graph, rng: &mut R) -> Vec<usize> {
    let n = graph.n();
    let mut path: Vec<usize> = Vec::new();
    if graph.m() == 0 {
        return path;
    }

    let mut in_path = vec![false; n];
    let mut edge_visited = vec![false; graph.m()];
    let mut restarts = 0u32;

    // start anywhere with positive degree
    let mut start = rng.gen_range(0..n);
    while graph.degree_of(start) == 0 {
        start = (start + 1) % n;
    }
    let target = start;
    let mut current = start;
    path.push(current);
    in_path[current] = true;

    loop {
        // pick an unvisited incident edge, scanning cyclically from a
        // random offset
        let incident = graph.vertex(current).edge_ids();
        let degree = incident.len();
        let mut e = rng.gen_range(0..degree);
        let mut tries = 1;
        while tries < degree && edge_visited[incident[e]] {
            e = (e + 1) % degree;
            tries += 1;
        }
        let edge_id = incident[e];

        if edge_visited[edge_id] {
            // dead end: turn the path around at most twice, else give up
            if path.len() > n / 2 && restarts < 2 {
                path.reverse();
                current = *path.last().expect("path is non-empty");
                restarts += 1;
                continue;
            }
            return path;
        }

        edge_visited[edge_id] = true;
        let next = graph.edge(edge_id).other_end(current);

        if next != target {
            if !in_path[next] {
                current = next;
                path.push(current);
                in_path[current] = true;
            } else {
                // short-circuit: rotate so the walk can continue from the
                // old successor of `next`
                let idx = path
                    .iter()
                    .position(|&v| v == next)
                    .expect("next is on the path");
                path[idx + 1..].reverse();
                current = *path.last().expect("path is non-empty");
            }
        }

        if path.len() >= n {
            return path;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn finds_the_path_in_a_path_graph_eventually() {
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let p = Problem::new(g, 1).unwrap();
        for seed in 0..12 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut e = crate::model::Embedding::new(&p);
            hamilton_path(&mut e, &mut rng);
            e.validate().unwrap();
        }
    }

    #[test]
    fn complete_graph_walks_cover_everything() {
        let mut pairs = Vec::new();
        for a in 0..6 {
            for b in a + 1..6 {
                pairs.push((a, b));
            }
        }
        let g = Graph::from_edges(6, &pairs).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let path = find_path(&g, &mut rng);
        assert!(path.len() <= 6);
        let p = Problem::new(g, 1).unwrap();
        let mut e = crate::model::Embedding::new(&p);
        hamilton_path(&mut e, &mut rng);
        e.validate().unwrap();
    }

    #[test]
    fn edgeless_graph_falls_back_to_dfs() {
        let g = Graph::from_edges(4, &[]).unwrap();
        let p = Problem::new(g, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let mut e = crate::model::Embedding::new(&p);
        hamilton_path(&mut e, &mut rng);
        e.validate().unwrap();
    }
}
