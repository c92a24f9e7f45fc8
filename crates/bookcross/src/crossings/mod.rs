//! Crossing counters for book embeddings.
//!
//! Three interchangeable algorithms compute the exact number of crossings of
//! an embedding; they must agree bit-for-bit on every valid input:
//!
//! - [`CrossingCounter::Pairwise`]: O(m²) reference, checks every pair.
//! - [`CrossingCounter::Sweep`]: walks the spine keeping per-page stacks of
//!   open edges, O(m + crossings).
//! - [`CrossingCounter::DivideAndConquer`]: per page, an over-count via
//!   starts-before prefix sums minus the nested pairs, which are recovered
//!   as inversions of a two-layer drawing by a modified merge sort.
//!   O(m log m + page sizes), the default and the optimizer hot path.

mod divide;
mod pairwise;
mod sweep;

pub use pairwise::{
    crossings_of_edge, crossings_of_edge_on_page, does_edge_cross, gain_of_move_edge_to_page,
};

use crate::model::Embedding;

/// Selects which counting algorithm an embedding uses for full recounts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CrossingCounter {
    Pairwise,
    Sweep,
    #[default]
    DivideAndConquer,
}

impl CrossingCounter {
    /// Total crossings of the embedding across all pages.
    pub fn count(self, embedding: &Embedding) -> u64 {
        match self {
            Self::Pairwise => pairwise::count(embedding),
            Self::Sweep => sweep::count(embedding),
            Self::DivideAndConquer => divide::count(embedding),
        }
    }

    /// Crossings among the edges assigned to `page`.
    pub fn count_on_page(self, embedding: &Embedding, page: usize) -> u64 {
        match self {
            Self::Pairwise => pairwise::count_on_page(embedding, page),
            Self::Sweep => sweep::count_on_page(embedding, page),
            Self::DivideAndConquer => divide::count_on_page(embedding, page),
        }
    }

    /// All counter variants, mainly for agreement tests and benches.
    pub const ALL: [CrossingCounter; 3] = [
        CrossingCounter::Pairwise,
        CrossingCounter::Sweep,
        CrossingCounter::DivideAndConquer,
    ];
}
