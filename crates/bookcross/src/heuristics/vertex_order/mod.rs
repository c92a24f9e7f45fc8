//! Vertex-order heuristics.
//!
//! Full variants write a complete spine permutation. Partial variants
//! reorder only the spine window `[begin, end)`; when `end < begin` the
//! window wraps around, covering `[begin, n) ∪ [0, end)`. Positions outside
//! the window keep their vertices.

mod bfs;
pub(crate) mod connectivity;
mod dfs;
mod hamilton;
mod max_nbr;

pub use bfs::{bfs_tree, random_bfs};
pub use connectivity::{connectivity_order, PlacementState, VertexPlacer, VertexSelector};
pub use dfs::{
    idfs, random_dfs, random_dfs_window, smallest_degree_dfs, smallest_degree_dfs_window,
};
pub use hamilton::hamilton_path;
pub use max_nbr::{max_nbr, max_nbr_removing, max_nbr_window};

pub(crate) mod greedy_connectivity;
pub use greedy_connectivity::greedy_connectivity_order;

use rand::Rng;

use crate::model::Embedding;
use crate::util::random_permutation;

/// Sentinel position for vertices cleared out of the window.
pub(crate) const UNPLACED: usize = usize::MAX;

/// Shuffles the spine uniformly at random.
pub fn random_order<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let spine = random_permutation(embedding.n(), rng);
    embedding.set_spine(&spine);
}

/// Whether the window `[begin, end)` covers one position or none.
pub(crate) fn window_is_trivial(begin: usize, end: usize) -> bool {
    begin == end || begin + 1 == end
}

/// Clears the window positions in `vertex_on_spine` to [`UNPLACED`].
pub(crate) fn clear_window(
    vertex_on_spine: &mut [usize],
    spine: &[usize],
    begin: usize,
    end: usize,
) {
    let n = spine.len();
    if begin < end {
        for i in begin..end {
            vertex_on_spine[spine[i]] = UNPLACED;
        }
    } else {
        for i in begin..n {
            vertex_on_spine[spine[i]] = UNPLACED;
        }
        for i in 0..end {
            vertex_on_spine[spine[i]] = UNPLACED;
        }
    }
}

/// Whether the running position `idx` still lies inside the window.
#[inline]
pub(crate) fn window_continues(idx: usize, begin: usize, end: usize) -> bool {
    idx < end || (end < begin && begin <= idx)
}
