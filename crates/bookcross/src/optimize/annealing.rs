//! Simulated annealing over spine and distribution moves.
//!
//! Runs a fixed schedule of 980 temperature steps. The temperature decays
//! along a shifted-logarithm curve; reproduce it exactly, small deviations
//! visibly change acceptance rates:
//!
//! ```text
//! T(t) = T0 + (1/ln F − 1/ln(t+F)) · (Tmin − T0) / (1/ln F − 1/ln(Tmax+F))
//! ```
//!
//! with `F = 20`, `Tmin = 0.2`, `Tmax = 980` and a caller-supplied `T0`.
//! Each step runs four move phases: edge re-pages, neighbor swaps, vertex
//! teleports with page repair, and greedy vertex refinements.

use rand::Rng;

use crate::crossings::gain_of_move_edge_to_page;
use crate::model::Embedding;
use crate::util::random_unequal;

use super::local::{
    best_pages_for_incident_edges, find_best_position_for_vertex, move_vertex_tracked, swap_gain,
};
use super::{BestSolution, Monitor, OptimizeCfg, RunState};

/// Number of temperature steps in a run.
pub const MAX_ITERATIONS: u32 = 980;
/// Shift applied to the logarithm arguments of the cooling curve.
pub const ITERATION_FACTOR: f64 = 20.0;
/// Temperature floor at the end of the schedule.
pub const COOLING_LIMIT: f64 = 0.2;

/// Simulated-annealing optimizer with a fixed cooling schedule.
#[derive(Clone, Debug)]
pub struct SimulatedAnnealingOptimizer {
    pub cfg: OptimizeCfg,
    /// Starting temperature `T0` of the cooling schedule.
    pub initial_temperature: f64,
}

impl SimulatedAnnealingOptimizer {
    pub fn new(cfg: OptimizeCfg, initial_temperature: f64) -> Self {
        Self {
            cfg,
            initial_temperature,
        }
    }

    /// Temperature of the given iteration.
    pub fn temperature(&self, iteration: u32) -> f64 {
        let f = ITERATION_FACTOR;
        let t0 = self.initial_temperature;
        t0 + (1.0 / f.ln() - 1.0 / ((iteration as f64) + f).ln()) * (COOLING_LIMIT - t0)
            / (1.0 / f.ln() - 1.0 / ((MAX_ITERATIONS as f64) + f).ln())
    }

    /// Runs the full schedule (or until the time budget or known optimum is
    /// hit) and returns the best snapshot plus the monitoring traces.
    pub fn run<'p, R: Rng>(
        &self,
        embedding: &mut Embedding<'p>,
        rng: &mut R,
    ) -> (BestSolution<'p>, Monitor) {
        let n = embedding.n();
        let m = embedding.m();
        let k = embedding.k();
        let num_edge_moves = m;
        let num_vertex_swaps = n * (n as f64).sqrt() as usize;
        let num_vertex_moves = n;
        let num_vertex_refinements = n / 4 + 1;

        let mut run = RunState::start(&self.cfg, embedding);

        for iteration in 0..MAX_ITERATIONS {
            if run.budget_exhausted() || run.target_reached(embedding) {
                break;
            }
            let temperature = self.temperature(iteration);
            tracing::trace!(iteration, temperature, "annealing step");

            // 1) move random edges to random other pages
            if k > 1 {
                for _ in 0..num_edge_moves {
                    let edge = rng.gen_range(0..m);
                    let old_page = embedding.page_of(edge);
                    let new_page = random_unequal(k, old_page, rng);
                    let delta = -gain_of_move_edge_to_page(embedding, edge, new_page);

                    if accept(delta, temperature, rng) {
                        let crossings = embedding.crossings() as i64;
                        embedding.move_edge_to_page(edge, new_page);
                        embedding.set_crossings((crossings + delta) as u64);
                        run.submit(embedding);
                    }
                }
            }

            // 2) swap random vertices with their right neighbor (cyclic)
            if n > 1 {
                for _ in 0..num_vertex_swaps {
                    let vertex = rng.gen_range(0..n);
                    let position = embedding.position_of(vertex);
                    let right = (position + 1) % n;
                    let gain = swap_gain(embedding, position, right);

                    if accept(-gain, temperature, rng) {
                        let crossings = embedding.crossings() as i64;
                        let other = embedding.vertex_at(right);
                        embedding.swap_vertices(vertex, other);
                        embedding.set_crossings((crossings - gain) as u64);
                        run.submit(embedding);
                    }
                }
            }

            // 3) teleport random vertices, repairing their edges' pages;
            //    rejected moves restore position and distribution snapshot
            for _ in 0..num_vertex_moves {
                let vertex = rng.gen_range(0..n);
                let old_position = embedding.position_of(vertex);
                let new_position = rng.gen_range(0..n);
                if old_position == new_position {
                    continue;
                }

                let old_crossings = embedding.crossings();
                let snapshot = embedding.distribution().to_vec();

                move_vertex_tracked(embedding, old_position, new_position);
                best_pages_for_incident_edges(embedding, vertex);
                let delta = embedding.crossings() as i64 - old_crossings as i64;

                if accept(delta, temperature, rng) {
                    run.submit(embedding);
                } else {
                    embedding.move_vertex_to(new_position, old_position);
                    embedding.set_distribution(&snapshot);
                    embedding.set_crossings(old_crossings);
                }
            }

            // 4) greedy refinement of random vertices
            for _ in 0..num_vertex_refinements {
                let vertex = rng.gen_range(0..n);
                let old_position = embedding.position_of(vertex);
                let old_crossings = embedding.crossings();
                let snapshot = embedding.distribution().to_vec();

                find_best_position_for_vertex(embedding, old_position);
                best_pages_for_incident_edges(embedding, vertex);
                let delta = embedding.crossings() as i64 - old_crossings as i64;

                if delta < 0 || accept(delta, temperature, rng) {
                    run.submit(embedding);
                } else {
                    let current = embedding.position_of(vertex);
                    embedding.move_vertex_to(current, old_position);
                    embedding.set_distribution(&snapshot);
                    embedding.set_crossings(old_crossings);
                }
            }

            run.next_iteration();
        }

        run.finish(embedding)
    }
}

/// Metropolis criterion: always accept improvements, accept a worsening of
/// `delta` with probability `exp(-delta / temperature)`.
#[inline]
fn accept<R: Rng>(delta: i64, temperature: f64, rng: &mut R) -> bool {
    delta <= 0 || rng.gen::<f64>() < (-(delta as f64) / temperature).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Graph, Problem};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn schedule_interpolates_between_t0_and_the_floor() {
        let sa = SimulatedAnnealingOptimizer::new(OptimizeCfg::default(), 10.0);
        let start = sa.temperature(0);
        let end = sa.temperature(MAX_ITERATIONS);
        assert!((start - 10.0).abs() < 1e-12);
        assert!((end - COOLING_LIMIT).abs() < 1e-9);
        for t in 0..MAX_ITERATIONS {
            assert!(sa.temperature(t + 1) <= sa.temperature(t));
        }
    }

    #[test]
    fn annealing_does_not_lose_to_its_start() {
        let mut pairs = Vec::new();
        for a in 0..8 {
            for b in a + 1..8 {
                pairs.push((a, b));
            }
        }
        let g = Graph::from_edges(8, &pairs).unwrap();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(0xa11ea1);
        let mut e = crate::model::Embedding::new(&p);
        let start = e.crossings();
        let cfg = OptimizeCfg {
            time_budget: Duration::from_secs(5),
            ..OptimizeCfg::default()
        };
        let sa = SimulatedAnnealingOptimizer::new(cfg, 1.0);
        let (best, _) = sa.run(&mut e, &mut rng);
        assert!(best.crossings() <= start);
    }

    #[test]
    fn cache_stays_exact_across_phases() {
        let g = Graph::from_edges(6, &[(0, 2), (1, 3), (2, 4), (3, 5), (0, 4), (1, 5)]).unwrap();
        let p = Problem::new(g, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut e = crate::model::Embedding::new(&p);
        let cfg = OptimizeCfg {
            time_budget: Duration::from_secs(2),
            ..OptimizeCfg::default()
        };
        let sa = SimulatedAnnealingOptimizer::new(cfg, 0.5);
        let (_, _) = sa.run(&mut e, &mut rng);
        let cached = e.cached_crossings().unwrap();
        assert_eq!(cached, e.recount_crossings());
    }
}
