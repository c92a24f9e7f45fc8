//! Index-addressed undirected graphs.
//!
//! Vertices and edges live in parallel arrays owned by [`Graph`]; identity is
//! the array index. Incident edges are stored per vertex as edge ids in
//! insertion order, so neighbor enumeration is deterministic and cheap.

use super::ModelError;

/// A vertex identified by its index, carrying its incident edge ids.
#[derive(Clone, Debug)]
pub struct Vertex {
    index: usize,
    edges: Vec<usize>,
}

impl Vertex {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Incident edge ids in insertion order.
    #[inline]
    pub fn edge_ids(&self) -> &[usize] {
        &self.edges
    }
}

/// An undirected edge with canonicalized endpoints (`start < target`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    start: usize,
    target: usize,
    index: usize,
}

impl Edge {
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The endpoint opposite to `vertex`. Panics if `vertex` is not an endpoint.
    #[inline]
    pub fn other_end(&self, vertex: usize) -> usize {
        if vertex == self.start {
            self.target
        } else if vertex == self.target {
            self.start
        } else {
            panic!("vertex {vertex} is not an endpoint of edge {}", self.index)
        }
    }
}

/// Graph with `vertices[0..n)` and `edges[0..m)`, index = array position.
#[derive(Clone, Debug)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds a graph from `n` vertices and an undirected edge list.
    ///
    /// Endpoint pairs are canonicalized so the smaller index comes first and
    /// each edge receives its slot index. Self-loops, parallel edges and
    /// out-of-range endpoints are rejected.
    pub fn from_edges(n: usize, pairs: &[(usize, usize)]) -> Result<Self, ModelError> {
        let mut vertices: Vec<Vertex> = (0..n)
            .map(|index| Vertex {
                index,
                edges: Vec::new(),
            })
            .collect();
        let mut edges = Vec::with_capacity(pairs.len());

        for &(a, b) in pairs {
            if a >= n || b >= n {
                return Err(ModelError::graph(format!(
                    "edge ({a},{b}) references a vertex outside 0..{n}"
                )));
            }
            if a == b {
                return Err(ModelError::graph(format!("self-loop at vertex {a}")));
            }
            let (start, target) = if a < b { (a, b) } else { (b, a) };
            let duplicate = vertices[start].edges.iter().any(|&e| {
                let existing: &Edge = &edges[e];
                existing.start == start && existing.target == target
            });
            if duplicate {
                return Err(ModelError::graph(format!(
                    "parallel edge ({start},{target})"
                )));
            }
            let index = edges.len();
            edges.push(Edge {
                start,
                target,
                index,
            });
            vertices[start].edges.push(index);
            vertices[target].edges.push(index);
        }

        let graph = Self { vertices, edges };
        graph.validate()?;
        Ok(graph)
    }

    /// Builds a graph from already-canonicalized parts. Used by internal
    /// constructions (spanning trees, conflict graphs) that uphold the
    /// invariants themselves; still validated.
    pub(crate) fn from_parts(
        vertices: Vec<Vertex>,
        edges: Vec<Edge>,
    ) -> Result<Self, ModelError> {
        let graph = Self { vertices, edges };
        graph.validate()?;
        Ok(graph)
    }

    /// Incremental builder used by algorithms that discover edges one by one.
    pub(crate) fn builder(n: usize) -> GraphBuilder {
        GraphBuilder {
            vertices: (0..n)
                .map(|index| Vertex {
                    index,
                    edges: Vec::new(),
                })
                .collect(),
            edges: Vec::new(),
        }
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.edges.len()
    }

    /// Edge count relative to the complete graph, in `[0, 1]`.
    pub fn density(&self) -> f64 {
        let max_m = self.n() * (self.n() - 1) / 2;
        self.m() as f64 / max_m as f64
    }

    #[inline]
    pub fn vertex(&self, vertex_index: usize) -> &Vertex {
        &self.vertices[vertex_index]
    }

    #[inline]
    pub fn edge(&self, edge_index: usize) -> &Edge {
        &self.edges[edge_index]
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn degree_of(&self, vertex_index: usize) -> usize {
        self.vertices[vertex_index].degree()
    }

    /// Neighbor vertex indices of `vertex_index` in incident-edge order.
    pub fn neighbors(&self, vertex_index: usize) -> Vec<usize> {
        self.vertices[vertex_index]
            .edges
            .iter()
            .map(|&e| self.edges[e].other_end(vertex_index))
            .collect()
    }

    /// Whether every vertex is reachable from vertex 0 (true for `n <= 1`).
    pub fn is_connected(&self) -> bool {
        if self.n() <= 1 {
            return true;
        }
        let mut seen = vec![false; self.n()];
        let mut stack = vec![0usize];
        seen[0] = true;
        let mut count = 1;
        while let Some(v) = stack.pop() {
            for &e in self.vertices[v].edge_ids() {
                let u = self.edges[e].other_end(v);
                if !seen[u] {
                    seen[u] = true;
                    count += 1;
                    stack.push(u);
                }
            }
        }
        count == self.n()
    }

    /// Structure with the same indices rebuilt from fresh storage.
    pub fn deep_copy(&self) -> Self {
        let pairs: Vec<(usize, usize)> = self
            .edges
            .iter()
            .map(|e| (e.start, e.target))
            .collect();
        Self::from_edges(self.n(), &pairs).expect("copy of a valid graph is valid")
    }

    /// Checks all structural invariants: index = slot for vertices and edges,
    /// canonical endpoint order, no self-loops, no parallel edges, and
    /// `sum(degree) = 2m`.
    pub fn validate(&self) -> Result<(), ModelError> {
        for (i, v) in self.vertices.iter().enumerate() {
            if v.index != i {
                return Err(ModelError::graph(format!(
                    "vertex at slot {i} has index {}",
                    v.index
                )));
            }
        }
        for (i, e) in self.edges.iter().enumerate() {
            if e.index != i {
                return Err(ModelError::graph(format!(
                    "edge at slot {i} has index {}",
                    e.index
                )));
            }
            if e.start >= e.target {
                return Err(ModelError::graph(format!(
                    "edge {i} endpoints ({},{}) not in canonical order",
                    e.start, e.target
                )));
            }
            if e.target >= self.n() {
                return Err(ModelError::graph(format!(
                    "edge {i} endpoint {} out of range",
                    e.target
                )));
            }
        }

        let mut degree_sum = 0usize;
        for v in &self.vertices {
            degree_sum += v.degree();
            for (slot, &e) in v.edges.iter().enumerate() {
                let edge = &self.edges[e];
                if edge.start != v.index && edge.target != v.index {
                    return Err(ModelError::graph(format!(
                        "edge {e} listed at vertex {} but not incident",
                        v.index
                    )));
                }
                let other = edge.other_end(v.index);
                for &f in &v.edges[slot + 1..] {
                    if self.edges[f].other_end(v.index) == other {
                        return Err(ModelError::graph(format!(
                            "parallel edges {e} and {f} at vertex {}",
                            v.index
                        )));
                    }
                }
            }
        }
        if degree_sum != 2 * self.m() {
            return Err(ModelError::graph(format!(
                "degree sum {degree_sum} != 2m = {}",
                2 * self.m()
            )));
        }

        Ok(())
    }
}

/// Builder collecting edges before the final validation pass.
pub(crate) struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl GraphBuilder {
    /// Adds an undirected edge; endpoints are canonicalized.
    pub(crate) fn add_edge(&mut self, a: usize, b: usize) {
        let (start, target) = if a < b { (a, b) } else { (b, a) };
        let index = self.edges.len();
        self.edges.push(Edge {
            start,
            target,
            index,
        });
        self.vertices[start].edges.push(index);
        self.vertices[target].edges.push(index);
    }

    pub(crate) fn finish(self) -> Result<Graph, ModelError> {
        Graph::from_parts(self.vertices, self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_canonicalizes_and_indexes() {
        let g = Graph::from_edges(4, &[(2, 0), (3, 1), (0, 1)]).unwrap();
        assert_eq!(g.n(), 4);
        assert_eq!(g.m(), 3);
        let e0 = g.edge(0);
        assert_eq!((e0.start(), e0.target()), (0, 2));
        assert_eq!(e0.index(), 0);
        assert_eq!(g.edge(2).index(), 2);
        // neighbors come back in incident-edge insertion order
        assert_eq!(g.neighbors(0), vec![2, 1]);
        assert_eq!(g.neighbors(1), vec![3, 0]);
    }

    #[test]
    fn rejects_self_loops_and_parallel_edges() {
        assert!(Graph::from_edges(3, &[(1, 1)]).is_err());
        assert!(Graph::from_edges(3, &[(0, 1), (1, 0)]).is_err());
        assert!(Graph::from_edges(2, &[(0, 2)]).is_err());
    }

    #[test]
    fn degree_sum_matches_twice_m() {
        let g = Graph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]).unwrap();
        let sum: usize = (0..5).map(|v| g.degree_of(v)).sum();
        assert_eq!(sum, 2 * g.m());
        g.validate().unwrap();
    }

    #[test]
    fn deep_copy_preserves_structure() {
        let g = Graph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        let copy = g.deep_copy();
        assert_eq!(copy.n(), g.n());
        assert_eq!(copy.m(), g.m());
        for i in 0..g.m() {
            assert_eq!(copy.edge(i).start(), g.edge(i).start());
            assert_eq!(copy.edge(i).target(), g.edge(i).target());
        }
    }

    #[test]
    fn connectivity_check() {
        let connected = Graph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert!(connected.is_connected());
        let split = Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        assert!(!split.is_connected());
    }
}
