//! Ear-decomposition distribution.
//!
//! Works on the conflict graph: a DFS grows a tree, every back edge closes
//! an ear (the cycle through the unique tree path to the ancestor), and the
//! vertices of each ear are paged as a path: the interior picks the page
//! least used by its placed conflict neighbors, the ends pick a random page
//! distinct from their interior neighbor.

use rand::Rng;

use crate::conflict::conflict_graph;
use crate::model::{Embedding, Graph, NO_PAGE};

/// Distributes edges along ears of the conflict graph. Edges isolated in
/// the conflict graph get a uniformly random page.
pub fn ear_decomposition<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let k = embedding.k();
    if k == 1 {
        super::single_page(embedding);
        return;
    }

    let conflict = conflict_graph(embedding);
    let mut distribution = vec![NO_PAGE; embedding.m()];
    EarWalk::new(&conflict, k).run(&mut distribution, rng);
    embedding.set_distribution(&distribution);
}

/// DFS state over the conflict graph. Vertices of the conflict graph are
/// edge indices of the base graph.
struct EarWalk<'g> {
    graph: &'g Graph,
    k: usize,
    visited: Vec<bool>,
    tree_node: Vec<bool>,
    edge_visited: Vec<bool>,
    forward: Vec<bool>,
    current_dfs_edge: Vec<Option<usize>>,
    parent: Vec<Option<usize>>,
    dependencies: Vec<Vec<usize>>,
    paths: Vec<Vec<usize>>,
}

impl<'g> EarWalk<'g> {
    fn new(graph: &'g Graph, k: usize) -> Self {
        Self {
            graph,
            k,
            visited: vec![false; graph.n()],
            tree_node: vec![false; graph.n()],
            edge_visited: vec![false; graph.m()],
            forward: vec![false; graph.m()],
            current_dfs_edge: vec![None; graph.n()],
            parent: vec![None; graph.n()],
            dependencies: vec![Vec::new(); graph.m()],
            paths: Vec::new(),
        }
    }

    fn run<R: Rng>(&mut self, distribution: &mut [usize], rng: &mut R) {
        let n = self.graph.n();
        let connected_nodes = (0..n).filter(|&v| self.graph.degree_of(v) > 0).count();
        let mut num_visited = 0usize;

        while num_visited < connected_nodes {
            let base_edge = self.random_start_edge(rng);
            let start = self.graph.edge(base_edge).start();
            let end = self.graph.edge(base_edge).target();

            self.visited[start] = true;
            self.visited[end] = true;
            if !self.tree_node[start] {
                self.tree_node[start] = true;
                num_visited += 1;
            }
            if !self.tree_node[end] {
                self.tree_node[end] = true;
                num_visited += 1;
            }
            self.forward[base_edge] = true;
            self.current_dfs_edge[start] = Some(base_edge);
            self.parent[end] = Some(base_edge);
            self.paths.push(vec![start, end]);
            self.edge_visited[base_edge] = true;

            num_visited += self.dfs(end);

            self.place_paths(distribution, rng);
            self.paths.clear();
            self.visited.copy_from_slice(&self.tree_node);
            for v in 0..n {
                if self.tree_node[v] {
                    self.current_dfs_edge[v] = None;
                }
            }
            for dependency in self.dependencies.iter_mut() {
                dependency.clear();
            }
        }

        for v in 0..n {
            if self.graph.degree_of(v) == 0 {
                distribution[v] = rng.gen_range(0..self.k);
            }
        }
    }

    /// Origin of the directed traversal of `edge`.
    #[inline]
    fn origin(&self, edge: usize) -> usize {
        let e = self.graph.edge(edge);
        if self.forward[edge] {
            e.start()
        } else {
            e.target()
        }
    }

    fn dfs(&mut self, v: usize) -> usize {
        let mut num_visited = 0usize;
        let incident: Vec<usize> = self.graph.vertex(v).edge_ids().to_vec();

        for e in incident {
            let parent_origin = self.parent[v].map(|pe| self.origin(pe));
            let edge = self.graph.edge(e);
            let (w, forward) = if edge.start() == v {
                (edge.target(), true)
            } else {
                (edge.start(), false)
            };
            if Some(w) == parent_origin {
                continue;
            }
            self.forward[e] = forward;

            if !self.visited[w] {
                self.parent[w] = Some(e);
                self.visited[w] = true;
                self.current_dfs_edge[v] = Some(e);
                num_visited += self.dfs(w);
            } else if let Some(wx) = self.current_dfs_edge[w] {
                // back edge closes an ear rooted at the ancestor's DFS edge
                self.dependencies[wx].push(e);
                let x = self.graph.edge(wx).other_end(w);
                if self.tree_node[x] {
                    num_visited += self.process_ears(wx);
                }
            }
        }

        num_visited
    }

    fn process_ears(&mut self, wx: usize) -> usize {
        let mut num_visited = 0usize;
        let dependencies = std::mem::take(&mut self.dependencies[wx]);

        for vw in dependencies {
            let w = self.origin(wx);
            let v = self.origin(vw);
            let mut path = vec![w, v];
            let mut tree_edges: Vec<usize> = Vec::new();

            if !self.tree_node[v] {
                self.tree_node[v] = true;
                num_visited += 1;
            }
            let mut parent_edge = self.parent[v].expect("ear vertex lies on the tree");
            let mut u = self.origin(parent_edge);
            while !self.tree_node[u] {
                path.push(u);
                tree_edges.push(parent_edge);
                self.edge_visited[parent_edge] = true;
                self.tree_node[u] = true;
                num_visited += 1;

                parent_edge = self.parent[u].expect("ear vertex lies on the tree");
                u = self.origin(parent_edge);
            }
            if !self.edge_visited[parent_edge] {
                path.push(u);
                tree_edges.push(parent_edge);
                self.edge_visited[parent_edge] = true;
                if !self.tree_node[u] {
                    self.tree_node[u] = true;
                    num_visited += 1;
                }
            }
            self.paths.push(path);

            for e in tree_edges {
                num_visited += self.process_ears(e);
            }
        }

        num_visited
    }

    fn place_paths<R: Rng>(&self, distribution: &mut [usize], rng: &mut R) {
        for path in &self.paths {
            let first = path[0];
            if distribution[first] == NO_PAGE {
                let mut p = rng.gen_range(0..self.k);
                while path.len() > 1 && distribution[path[1]] == p {
                    p = (p + 1) % self.k;
                }
                distribution[first] = p;
            }

            for &v in &path[1..path.len().saturating_sub(1)] {
                if distribution[v] == NO_PAGE {
                    distribution[v] = self.pick_optimal_page(v, distribution);
                }
            }

            let last = path[path.len() - 1];
            if distribution[last] == NO_PAGE {
                let mut p = rng.gen_range(0..self.k);
                while p == distribution[path[path.len() - 2]] {
                    p = (p + 1) % self.k;
                }
                distribution[last] = p;
            }
        }
    }

    /// Page least used among the already placed conflict neighbors.
    fn pick_optimal_page(&self, v: usize, distribution: &[usize]) -> usize {
        let mut neighbors_on_page = vec![0usize; self.k];
        for u in self.graph.neighbors(v) {
            if distribution[u] != NO_PAGE {
                neighbors_on_page[distribution[u]] += 1;
            }
        }
        let mut best_page = 0;
        for (page, &count) in neighbors_on_page.iter().enumerate() {
            if count < neighbors_on_page[best_page] {
                best_page = page;
            }
        }
        best_page
    }

    fn random_start_edge<R: Rng>(&self, rng: &mut R) -> usize {
        let n = self.graph.n();
        let mut v = rng.gen_range(0..n);
        while self.visited[v] || self.graph.degree_of(v) == 0 {
            v = (v + 1) % n;
        }
        self.graph.vertex(v).edge_ids()[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn heavily_conflicting_instances_get_valid_pages() {
        let mut pairs = Vec::new();
        for a in 0..8usize {
            for b in a + 1..8 {
                pairs.push((a, b));
            }
        }
        let g = Graph::from_edges(8, &pairs).unwrap();
        let p = Problem::new(g, 3).unwrap();
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut e = crate::model::Embedding::new(&p);
            ear_decomposition(&mut e, &mut rng);
            e.validate().unwrap_or_else(|err| panic!("seed {seed}: {err}"));
        }
    }

    #[test]
    fn isolated_conflict_vertices_get_random_pages() {
        // a path has no conflicts on the identity spine
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let mut e = crate::model::Embedding::new(&p);
        ear_decomposition(&mut e, &mut rng);
        e.validate().unwrap();
    }
}
