//! Conflict-pair distribution: enumerate the pairs of edges that can
//! cross, then walk the pairs in random order pushing their members onto
//! distinct random pages.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{Embedding, NO_PAGE};
use crate::util::random_unequal;

/// Distributes edges by separating conflicting pairs. Edges without
/// conflicts default to page 0.
pub fn conflict_distribution<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let k = embedding.k();
    if k == 1 {
        super::single_page(embedding);
        return;
    }

    let mut conflicts = determine_conflicts(embedding);
    conflicts.shuffle(rng);

    let mut distribution = vec![NO_PAGE; embedding.m()];
    for &(e1, e2) in &conflicts {
        if distribution[e1] == NO_PAGE {
            distribution[e1] = random_unequal(k, distribution[e2], rng);
        }
        if distribution[e2] == NO_PAGE {
            distribution[e2] = random_unequal(k, distribution[e1], rng);
        }
    }

    for page in distribution.iter_mut() {
        if *page == NO_PAGE {
            *page = 0;
        }
    }

    embedding.set_distribution(&distribution);
}

/// All pairs `(e1, e2)` with `e1 < e2` whose endpoint intervals interleave
/// on the current spine.
fn determine_conflicts(embedding: &Embedding) -> Vec<(usize, usize)> {
    let m = embedding.m();
    let mut conflicts = Vec::new();
    for e1 in 0..m {
        for e2 in e1 + 1..m {
            if embedding.can_edges_cross(e1, e2) {
                conflicts.push((e1, e2));
            }
        }
    }
    conflicts
}
