//! Mutable embedding state: spine order, page distribution, crossing cache.

use std::cmp::Ordering;
use std::fmt;

use crate::crossings::CrossingCounter;

use super::{Edge, Graph, ModelError, Problem};

/// Sentinel page for edges not yet placed by an incremental heuristic.
pub const NO_PAGE: usize = usize::MAX;

/// A candidate solution for a [`Problem`]: a spine permutation plus a page
/// assignment per edge.
///
/// The spine is kept in both directions (`spine`: position -> vertex,
/// `vertex_on_spine`: vertex -> position) as owned arrays; they must stay
/// mutual inverses. The crossing count is cached and invalidated by every
/// mutation of spine or distribution. Cloning yields a deep copy whose
/// arrays are independent of the original.
#[derive(Clone)]
pub struct Embedding<'p> {
    problem: &'p Problem,
    spine: Vec<usize>,
    vertex_on_spine: Vec<usize>,
    distribution: Vec<usize>,
    crossings: Option<u64>,
    counter: CrossingCounter,
}

impl<'p> Embedding<'p> {
    /// Creates the trivial embedding: identity spine, all edges on page 0.
    pub fn new(problem: &'p Problem) -> Self {
        let n = problem.n();
        Self {
            problem,
            spine: (0..n).collect(),
            vertex_on_spine: (0..n).collect(),
            distribution: vec![0; problem.m()],
            crossings: None,
            counter: CrossingCounter::default(),
        }
    }

    /// Creates an embedding with the given spine (position -> vertex).
    pub fn with_spine(problem: &'p Problem, spine: &[usize]) -> Self {
        let mut embedding = Self::new(problem);
        embedding.set_spine(spine);
        embedding
    }

    /// Creates an embedding with the given spine and distribution.
    pub fn with_layout(problem: &'p Problem, spine: &[usize], distribution: &[usize]) -> Self {
        let mut embedding = Self::with_spine(problem, spine);
        embedding.set_distribution(distribution);
        embedding
    }

    // --- general accessors ---

    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[inline]
    pub fn graph(&self) -> &'p Graph {
        self.problem.graph()
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.spine.len()
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.distribution.len()
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.problem.k()
    }

    // --- spine accessors ---

    /// Vertex index sitting at `position` on the spine.
    #[inline]
    pub fn vertex_at(&self, position: usize) -> usize {
        self.spine[position]
    }

    /// Spine position of `vertex_index`.
    #[inline]
    pub fn position_of(&self, vertex_index: usize) -> usize {
        self.vertex_on_spine[vertex_index]
    }

    #[inline]
    pub fn spine(&self) -> &[usize] {
        &self.spine
    }

    #[inline]
    pub fn vertex_on_spine(&self) -> &[usize] {
        &self.vertex_on_spine
    }

    // --- distribution accessors ---

    /// Page of the edge with index `edge_index`.
    #[inline]
    pub fn page_of(&self, edge_index: usize) -> usize {
        self.distribution[edge_index]
    }

    #[inline]
    pub fn distribution(&self) -> &[usize] {
        &self.distribution
    }

    pub fn count_edges_on_page(&self, page: usize) -> usize {
        self.distribution.iter().filter(|&&p| p == page).count()
    }

    /// Edge indices assigned to `page`, ascending.
    pub fn edge_indices_on_page(&self, page: usize) -> Vec<usize> {
        self.distribution
            .iter()
            .enumerate()
            .filter(|(_, &p)| p == page)
            .map(|(e, _)| e)
            .collect()
    }

    /// Edge indices grouped by page: entry `p` holds the edges on page `p`.
    pub fn edges_grouped_by_page(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); self.k()];
        for (edge, &page) in self.distribution.iter().enumerate() {
            groups[page].push(edge);
        }
        groups
    }

    // --- endpoint positions and edge comparators ---

    /// The smaller of the two endpoint positions of `edge` on the spine.
    #[inline]
    pub fn smaller_endpoint_position(&self, edge: &Edge) -> usize {
        self.vertex_on_spine[edge.start()].min(self.vertex_on_spine[edge.target()])
    }

    /// The larger of the two endpoint positions of `edge` on the spine.
    #[inline]
    pub fn larger_endpoint_position(&self, edge: &Edge) -> usize {
        self.vertex_on_spine[edge.start()].max(self.vertex_on_spine[edge.target()])
    }

    /// Spine length of `edge`: distance between its endpoint positions.
    #[inline]
    pub fn edge_length(&self, edge: &Edge) -> usize {
        self.larger_endpoint_position(edge) - self.smaller_endpoint_position(edge)
    }

    /// Spine length of `edge` measured as a chord of the circular order,
    /// i.e. at most `n / 2`.
    pub fn edge_length_as_chord(&self, edge: &Edge) -> usize {
        let length = self.edge_length(edge);
        if length > self.n() / 2 {
            self.n() - length
        } else {
            length
        }
    }

    /// Orders edges by `(smaller endpoint position, larger endpoint position)`.
    pub fn compare_edges(&self, first: &Edge, second: &Edge) -> Ordering {
        let key = |e: &Edge| {
            (
                self.smaller_endpoint_position(e),
                self.larger_endpoint_position(e),
            )
        };
        key(first).cmp(&key(second))
    }

    /// Orders edges by smaller endpoint position; edges sharing it come in
    /// the order they are embedded around that vertex, which is *descending*
    /// larger endpoint position (the longest outgoing arc is drawn first).
    pub fn compare_edges_outgoing_as_embedded(&self, first: &Edge, second: &Edge) -> Ordering {
        self.smaller_endpoint_position(first)
            .cmp(&self.smaller_endpoint_position(second))
            .then_with(|| {
                self.larger_endpoint_position(second)
                    .cmp(&self.larger_endpoint_position(first))
            })
    }

    /// Orders the edges incident to the vertex at `endpoint_position` in the
    /// cyclic order they are embedded around it: arcs closing from the left
    /// come nearest-start-first, then arcs opening to the right
    /// longest-first. The sweep counter depends on exactly this sign.
    pub fn compare_edges_sharing_endpoint(
        &self,
        first: &Edge,
        second: &Edge,
        endpoint_position: usize,
    ) -> Ordering {
        let first_start = self.smaller_endpoint_position(first);
        let second_start = self.smaller_endpoint_position(second);
        if first_start < endpoint_position && second_start < endpoint_position {
            second_start.cmp(&first_start)
        } else if first_start < endpoint_position || second_start < endpoint_position {
            first_start.cmp(&second_start)
        } else {
            let first_end = self.larger_endpoint_position(first);
            let second_end = self.larger_endpoint_position(second);
            second_end.cmp(&first_end)
        }
    }

    // --- crossing predicate ---

    /// Whether the edges with indices `edge1` and `edge2` can cross, judging
    /// only by their endpoint positions (pages are ignored).
    pub fn can_edges_cross(&self, edge1: usize, edge2: usize) -> bool {
        let g = self.graph();
        let e1 = g.edge(edge1);
        let e2 = g.edge(edge2);
        can_edges_cross(
            self.vertex_on_spine[e1.start()],
            self.vertex_on_spine[e1.target()],
            self.vertex_on_spine[e2.start()],
            self.vertex_on_spine[e2.target()],
        )
    }

    // --- crossing cache ---

    /// The number of crossings, counting it first if the cache is invalid.
    pub fn crossings(&mut self) -> u64 {
        match self.crossings {
            Some(c) => c,
            None => self.recount_crossings(),
        }
    }

    /// Forces a full recount with the configured counter and refreshes the
    /// cache.
    pub fn recount_crossings(&mut self) -> u64 {
        let counter = self.counter;
        let count = counter.count(self);
        self.crossings = Some(count);
        count
    }

    /// Crossings on a single page. Not cached.
    pub fn crossings_on_page(&self, page: usize) -> u64 {
        self.counter.count_on_page(self, page)
    }

    #[inline]
    pub fn cached_crossings(&self) -> Option<u64> {
        self.crossings
    }

    /// Overwrites the cached crossing count. Callers maintaining the cache
    /// incrementally (gain bookkeeping) are responsible for exactness.
    #[inline]
    pub fn set_crossings(&mut self, crossings: u64) {
        self.crossings = Some(crossings);
    }

    #[inline]
    pub fn invalidate_crossings(&mut self) {
        self.crossings = None;
    }

    #[inline]
    pub fn counter(&self) -> CrossingCounter {
        self.counter
    }

    pub fn set_counter(&mut self, counter: CrossingCounter) {
        self.counter = counter;
        self.crossings = None;
    }

    // --- mutators ---

    /// Moves an edge to `page` and invalidates the crossing cache.
    pub fn move_edge_to_page(&mut self, edge_index: usize, page: usize) {
        self.distribution[edge_index] = page;
        self.invalidate_crossings();
    }

    /// Exchanges the spine positions of two vertices (by vertex index).
    pub fn swap_vertices(&mut self, vertex1: usize, vertex2: usize) {
        self.vertex_on_spine.swap(vertex1, vertex2);
        self.spine[self.vertex_on_spine[vertex1]] = vertex1;
        self.spine[self.vertex_on_spine[vertex2]] = vertex2;
        self.invalidate_crossings();
    }

    /// Exchanges the vertices sitting at two spine positions.
    pub fn swap_positions(&mut self, position1: usize, position2: usize) {
        self.swap_vertices(self.spine[position1], self.spine[position2]);
    }

    /// Shifts the vertex at `old_position` to `new_position` through a chain
    /// of adjacent swaps, displacing the vertices in between by one.
    pub fn move_vertex_to(&mut self, old_position: usize, new_position: usize) {
        if new_position < old_position {
            for i in (new_position + 1..=old_position).rev() {
                self.swap_positions(i, i - 1);
            }
        } else {
            for i in old_position..new_position {
                self.swap_positions(i, i + 1);
            }
        }
        self.invalidate_crossings();
    }

    /// Replaces the spine (position -> vertex) and recomputes its inverse.
    pub fn set_spine(&mut self, spine: &[usize]) {
        self.spine.copy_from_slice(spine);
        for (position, &vertex) in self.spine.iter().enumerate() {
            self.vertex_on_spine[vertex] = position;
        }
        self.invalidate_crossings();
    }

    /// Replaces the inverse spine (vertex -> position) and recomputes the
    /// spine from it.
    pub fn set_vertex_on_spine(&mut self, vertex_on_spine: &[usize]) {
        self.vertex_on_spine.copy_from_slice(vertex_on_spine);
        for (vertex, &position) in self.vertex_on_spine.iter().enumerate() {
            self.spine[position] = vertex;
        }
        self.invalidate_crossings();
    }

    /// Replaces the edge distribution.
    pub fn set_distribution(&mut self, distribution: &[usize]) {
        self.distribution.copy_from_slice(distribution);
        self.invalidate_crossings();
    }

    // --- validity checks ---

    /// Checks spine and distribution invariants, reporting the first
    /// violation found.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n = self.n();
        let mut seen = vec![false; n];
        for (position, &vertex) in self.spine.iter().enumerate() {
            if vertex >= n {
                return Err(ModelError::embedding(format!(
                    "spine[{position}] = {vertex} out of range"
                )));
            }
            if seen[vertex] {
                return Err(ModelError::embedding(format!(
                    "vertex {vertex} appears twice on the spine"
                )));
            }
            seen[vertex] = true;
        }
        for position in 0..n {
            if self.vertex_on_spine[self.spine[position]] != position {
                return Err(ModelError::embedding(format!(
                    "spine arrays are not inverse at position {position}"
                )));
            }
        }
        for vertex in 0..n {
            if self.spine[self.vertex_on_spine[vertex]] != vertex {
                return Err(ModelError::embedding(format!(
                    "spine arrays are not inverse at vertex {vertex}"
                )));
            }
        }

        if self.distribution.len() != self.problem.m() {
            return Err(ModelError::embedding(format!(
                "distribution has length {}, expected {}",
                self.distribution.len(),
                self.problem.m()
            )));
        }
        for (edge, &page) in self.distribution.iter().enumerate() {
            if page >= self.k() {
                return Err(ModelError::embedding(format!(
                    "edge {edge} assigned to page {page}, k = {}",
                    self.k()
                )));
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Whether the edge spanning positions `u, v` and the edge spanning
/// positions `x, y` cross when drawn as arcs over the spine: true iff the
/// two position intervals interleave.
#[inline]
pub fn can_edges_cross(u: usize, v: usize, x: usize, y: usize) -> bool {
    let (u, v) = if u <= v { (u, v) } else { (v, u) };
    let (x, y) = if x <= y { (x, y) } else { (y, x) };
    (u < x && x < v && v < y) || (x < u && u < y && y < v)
}

impl fmt::Display for Embedding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "embedding n = {}, m = {}, k = {}",
            self.n(),
            self.m(),
            self.k()
        )?;
        writeln!(f, "spine (position -> vertex): {:?}", self.spine)?;
        writeln!(f, "spine (vertex -> position): {:?}", self.vertex_on_spine)?;
        write!(f, "distribution: {:?}", self.distribution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};

    fn path_problem() -> Problem {
        let g = Graph::from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]).unwrap();
        Problem::new(g, 1).unwrap()
    }

    #[test]
    fn new_embedding_has_identity_spine() {
        let p = path_problem();
        let e = Embedding::new(&p);
        assert_eq!(e.spine(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(e.vertex_on_spine(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(e.distribution(), &[0, 0, 0, 0, 0]);
        e.validate().unwrap();
    }

    #[test]
    fn spine_arrays_stay_inverse_under_mutation() {
        let p = path_problem();
        let mut e = Embedding::new(&p);
        e.swap_vertices(0, 5);
        e.swap_positions(1, 3);
        e.move_vertex_to(4, 0);
        e.validate().unwrap();
        for i in 0..e.n() {
            assert_eq!(e.vertex_on_spine()[e.spine()[i]], i);
            assert_eq!(e.spine()[e.vertex_on_spine()[i]], i);
        }
    }

    #[test]
    fn identity_mutations_are_noops() {
        let p = path_problem();
        let mut e = Embedding::with_spine(&p, &[2, 0, 4, 1, 5, 3]);
        let spine_before = e.spine().to_vec();
        e.swap_vertices(3, 3);
        assert_eq!(e.spine(), &spine_before[..]);
        e.move_vertex_to(2, 2);
        assert_eq!(e.spine(), &spine_before[..]);
    }

    #[test]
    fn set_spine_and_inverse_round_trip() {
        let p = path_problem();
        let mut e = Embedding::new(&p);
        let order = [3, 1, 4, 0, 5, 2];
        e.set_spine(&order);
        let vos = e.vertex_on_spine().to_vec();
        let mut other = Embedding::new(&p);
        other.set_vertex_on_spine(&vos);
        assert_eq!(other.spine(), &order[..]);
    }

    #[test]
    fn cache_invalidation_discipline() {
        let p = path_problem();
        let mut e = Embedding::new(&p);
        assert_eq!(e.crossings(), 0);
        assert_eq!(e.cached_crossings(), Some(0));
        e.move_edge_to_page(0, 0);
        assert_eq!(e.cached_crossings(), None);
        assert_eq!(e.crossings(), 0);
        e.swap_positions(0, 3);
        assert_eq!(e.cached_crossings(), None);
    }

    #[test]
    fn deep_copy_is_independent() {
        let p = path_problem();
        let mut original = Embedding::with_spine(&p, &[5, 4, 3, 2, 1, 0]);
        let copy = original.clone();
        assert_eq!(copy.spine(), original.spine());
        assert_eq!(copy.distribution(), original.distribution());
        original.swap_positions(0, 1);
        original.move_edge_to_page(2, 0);
        assert_eq!(copy.spine(), &[5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn interleave_predicate_cases() {
        // u < x < v < y interleaves
        assert!(can_edges_cross(0, 2, 1, 3));
        // symmetric case
        assert!(can_edges_cross(1, 3, 0, 2));
        // nesting does not cross
        assert!(!can_edges_cross(0, 3, 1, 2));
        // disjoint intervals do not cross
        assert!(!can_edges_cross(0, 1, 2, 3));
        // shared endpoints never cross
        assert!(!can_edges_cross(0, 2, 2, 4));
        // unordered inputs are normalized
        assert!(can_edges_cross(2, 0, 3, 1));
    }

    #[test]
    fn chord_length_wraps_around() {
        let p = path_problem();
        let e = Embedding::new(&p);
        let g = e.graph();
        assert_eq!(e.edge_length(g.edge(0)), 1);
        assert_eq!(e.edge_length_as_chord(g.edge(0)), 1);
        let far = Graph::from_edges(6, &[(0, 5)]).unwrap();
        let p2 = Problem::new(far, 1).unwrap();
        let e2 = Embedding::new(&p2);
        assert_eq!(e2.edge_length(e2.graph().edge(0)), 5);
        assert_eq!(e2.edge_length_as_chord(e2.graph().edge(0)), 1);
    }

    #[test]
    fn embedded_edge_order_around_shared_endpoint() {
        // star at vertex 2 of a 5-path variant: edges (0,2), (1,2), (2,3), (2,4)
        let g = Graph::from_edges(5, &[(0, 2), (1, 2), (2, 3), (2, 4)]).unwrap();
        let p = Problem::new(g, 1).unwrap();
        let e = Embedding::new(&p);
        let graph = e.graph();
        let mut edges: Vec<&Edge> = graph.edges().iter().collect();
        edges.sort_by(|a, b| e.compare_edges_sharing_endpoint(a, b, 2));
        let keys: Vec<(usize, usize)> = edges.iter().map(|ed| (ed.start(), ed.target())).collect();
        // closing arcs nearest-start-first, then opening arcs longest-first
        assert_eq!(keys, vec![(1, 2), (0, 2), (2, 4), (2, 3)]);
    }
}
