//! Edge-distribution heuristics: assign every edge a page for a fixed
//! spine. With `k = 1` they all degenerate to the all-zero assignment.

mod conflict;
mod ear;
mod greedy;
mod slope;

pub use conflict::conflict_distribution;
pub use ear::ear_decomposition;
pub use greedy::{greedy_distribution, GreedyEdgeOrder};
pub use slope::slope_distribution;

use rand::Rng;

use crate::model::Embedding;

/// Uniformly random page per edge.
pub fn random_distribution<R: Rng>(embedding: &mut Embedding, rng: &mut R) {
    let k = embedding.k();
    let distribution: Vec<usize> = (0..embedding.m()).map(|_| rng.gen_range(0..k)).collect();
    embedding.set_distribution(&distribution);
}

/// Assigns every edge to page 0.
pub(super) fn single_page(embedding: &mut Embedding) {
    let distribution = vec![0usize; embedding.m()];
    embedding.set_distribution(&distribution);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::EdgeDistributionHeuristic;
    use crate::model::{Embedding, Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dense_graph() -> Graph {
        let mut pairs = Vec::new();
        for a in 0..9usize {
            for b in a + 1..9 {
                if a + b != 9 {
                    pairs.push((a, b));
                }
            }
        }
        Graph::from_edges(9, &pairs).unwrap()
    }

    #[test]
    fn every_heuristic_fills_all_pages_in_range() {
        let g = dense_graph();
        let p = Problem::new(g, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        let heuristics = [
            EdgeDistributionHeuristic::Random,
            EdgeDistributionHeuristic::Slope,
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::RowMajor),
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::RowMajorOnSpine),
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::Random),
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::ELen),
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::CeilFloor),
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::Circular),
            EdgeDistributionHeuristic::Conflict,
            EdgeDistributionHeuristic::EarDecomposition,
        ];
        for heuristic in heuristics {
            let mut e = Embedding::new(&p);
            heuristic.apply(&mut e, &mut rng);
            e.validate()
                .unwrap_or_else(|err| panic!("{heuristic:?} broke the distribution: {err}"));
        }
    }

    #[test]
    fn one_page_budget_collapses_to_zero() {
        let g = dense_graph();
        let p = Problem::new(g, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let heuristics = [
            EdgeDistributionHeuristic::Slope,
            EdgeDistributionHeuristic::Greedy(GreedyEdgeOrder::ELen),
            EdgeDistributionHeuristic::Conflict,
            EdgeDistributionHeuristic::EarDecomposition,
        ];
        for heuristic in heuristics {
            let mut e = Embedding::new(&p);
            heuristic.apply(&mut e, &mut rng);
            assert!(e.distribution().iter().all(|&p| p == 0));
        }
    }

    #[test]
    fn greedy_cached_count_matches_recount() {
        let g = dense_graph();
        let p = Problem::new(g, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for order in [
            GreedyEdgeOrder::RowMajor,
            GreedyEdgeOrder::ELen,
            GreedyEdgeOrder::CeilFloor,
            GreedyEdgeOrder::Circular,
        ] {
            let mut e = Embedding::new(&p);
            greedy_distribution(&mut e, order, &mut rng);
            let cached = e.cached_crossings().expect("greedy seeds the cache");
            assert_eq!(cached, e.recount_crossings(), "{order:?}");
        }
    }
}
