//! Problem instances: a graph plus a page budget.

use super::{Graph, ModelError};

/// A book embedding problem: graph, number of pages `k >= 1`, and the
/// optimal crossing count when it is known (used as an optimizer target).
#[derive(Clone, Debug)]
pub struct Problem {
    graph: Graph,
    pages: usize,
    known_crossings: Option<u64>,
}

impl Problem {
    pub fn new(graph: Graph, pages: usize) -> Result<Self, ModelError> {
        Self::with_known_crossings(graph, pages, None)
    }

    pub fn with_known_crossings(
        graph: Graph,
        pages: usize,
        known_crossings: Option<u64>,
    ) -> Result<Self, ModelError> {
        if pages < 1 {
            return Err(ModelError::embedding("page count k must be at least 1"));
        }
        Ok(Self {
            graph,
            pages,
            known_crossings,
        })
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.pages
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.graph.n()
    }

    #[inline]
    pub fn m(&self) -> usize {
        self.graph.m()
    }

    #[inline]
    pub fn known_crossings(&self) -> Option<u64> {
        self.known_crossings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_pages() {
        let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
        assert!(Problem::new(g, 0).is_err());
    }

    #[test]
    fn carries_known_optimum() {
        let g = Graph::from_edges(2, &[(0, 1)]).unwrap();
        let p = Problem::with_known_crossings(g, 2, Some(0)).unwrap();
        assert_eq!(p.k(), 2);
        assert_eq!(p.known_crossings(), Some(0));
    }
}
