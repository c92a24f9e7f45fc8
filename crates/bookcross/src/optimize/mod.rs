//! Local-search optimizers and their shared run harness.
//!
//! Every optimizer mutates one embedding it exclusively owns for the run
//! and tracks the best solution seen as a deep-copy snapshot: the snapshot
//! field is replaced on improvement, never mutated, so a handed-out
//! [`BestSolution`] stays immutable no matter what the working embedding
//! does afterwards.

pub mod annealing;
pub mod greedy;
pub mod local;

pub use annealing::SimulatedAnnealingOptimizer;
pub use greedy::{GreedyOptimizer, TwoStepGreedyOptimizer};

use std::time::{Duration, Instant};

use crate::model::Embedding;

/// Shared optimizer configuration.
#[derive(Clone, Copy, Debug)]
pub struct OptimizeCfg {
    /// Wall-clock budget checked at the top of every outer round.
    pub time_budget: Duration,
    /// Record a monitoring sample every this many iterations.
    pub monitoring_interval: Option<u32>,
    /// Record a monitoring sample whenever this much time has passed.
    pub monitoring_time: Option<Duration>,
}

impl Default for OptimizeCfg {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_secs(15 * 60),
            monitoring_interval: Some(1),
            monitoring_time: None,
        }
    }
}

/// The best embedding an optimizer run has seen, with the bookkeeping of
/// when it was found.
#[derive(Clone)]
pub struct BestSolution<'p> {
    embedding: Embedding<'p>,
    crossings: u64,
    iteration: u32,
    elapsed: Duration,
}

impl<'p> BestSolution<'p> {
    /// The stored embedding snapshot.
    pub fn embedding(&self) -> &Embedding<'p> {
        &self.embedding
    }

    pub fn into_embedding(self) -> Embedding<'p> {
        self.embedding
    }

    pub fn crossings(&self) -> u64 {
        self.crossings
    }

    /// Iteration of the run in which this solution was found.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Time from the start of the run until this solution was found.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Time series recorded during a run, one entry per monitoring sample.
#[derive(Clone, Debug, Default)]
pub struct Monitor {
    pub best_crossings: Vec<u64>,
    pub last_submitted: Vec<u64>,
    pub iterations: Vec<u64>,
    pub elapsed_ms: Vec<u64>,
}

impl Monitor {
    fn record(&mut self, best: u64, submitted: u64, iteration: u32, elapsed: Duration) {
        self.best_crossings.push(best);
        self.last_submitted.push(submitted);
        self.iterations.push(iteration as u64);
        self.elapsed_ms.push(elapsed.as_millis() as u64);
    }
}

/// Per-run state every optimizer drives: incumbent snapshot, iteration and
/// time counters, monitoring traces, and the termination checks.
pub(crate) struct RunState<'p> {
    target: u64,
    time_budget: Duration,
    monitoring_interval: Option<u32>,
    monitoring_time: Option<Duration>,
    started: Instant,
    last_time_sample: Duration,
    iteration: u32,
    best: Option<BestSolution<'p>>,
    last_submitted: u64,
    monitor: Monitor,
}

impl<'p> RunState<'p> {
    pub(crate) fn start(cfg: &OptimizeCfg, embedding: &mut Embedding<'p>) -> Self {
        let target = embedding.problem().known_crossings().unwrap_or(0);
        let mut state = Self {
            target,
            time_budget: cfg.time_budget,
            monitoring_interval: cfg.monitoring_interval,
            monitoring_time: cfg.monitoring_time,
            started: Instant::now(),
            last_time_sample: Duration::ZERO,
            iteration: 0,
            best: None,
            last_submitted: 0,
            monitor: Monitor::default(),
        };
        state.submit(embedding);
        let initial = state.last_submitted;
        state
            .monitor
            .record(initial, initial, 0, state.started.elapsed());
        state
    }

    pub(crate) fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Stores a deep copy of the embedding iff it strictly improves on the
    /// current snapshot.
    pub(crate) fn submit(&mut self, embedding: &mut Embedding<'p>) {
        let crossings = embedding.crossings();
        self.last_submitted = crossings;
        let improved = self
            .best
            .as_ref()
            .map_or(true, |best| crossings < best.crossings);
        if improved {
            self.best = Some(BestSolution {
                embedding: embedding.clone(),
                crossings,
                iteration: self.iteration,
                elapsed: self.started.elapsed(),
            });
        }
    }

    /// The common round-loop checks: progress, target reached, budget.
    /// `current < target` means gain bookkeeping went wrong somewhere and
    /// fails fast.
    pub(crate) fn should_continue(&self, embedding: &mut Embedding<'p>, round_gain: i64) -> bool {
        if round_gain <= 0 {
            return false;
        }
        let crossings = embedding.crossings();
        if crossings == self.target {
            return false;
        }
        assert!(
            crossings > self.target,
            "crossing count {crossings} fell below the target {}:\n{embedding}",
            self.target
        );
        if self.budget_exhausted() {
            tracing::debug!(elapsed = ?self.started.elapsed(), "time budget reached");
            return false;
        }
        true
    }

    pub(crate) fn budget_exhausted(&self) -> bool {
        self.started.elapsed() > self.time_budget
    }

    pub(crate) fn target_reached(&mut self, embedding: &mut Embedding<'p>) -> bool {
        embedding.crossings() == self.target
    }

    /// Advances the iteration counter and takes monitoring samples.
    pub(crate) fn next_iteration(&mut self) {
        self.iteration += 1;

        let best = self.best.as_ref().map_or(0, |b| b.crossings);
        if let Some(interval) = self.monitoring_interval {
            if interval > 0 && self.iteration % interval == 0 {
                self.monitor.record(
                    best,
                    self.last_submitted,
                    self.iteration,
                    self.started.elapsed(),
                );
            }
        }
        if let Some(period) = self.monitoring_time {
            if !period.is_zero() {
                let elapsed = self.started.elapsed();
                while elapsed - self.last_time_sample >= period {
                    self.monitor.record(best, self.last_submitted, self.iteration, elapsed);
                    self.last_time_sample += period;
                }
            }
        }
    }

    /// Ends the run, handing back the snapshot and the recorded traces.
    pub(crate) fn finish(
        mut self,
        embedding: &mut Embedding<'p>,
    ) -> (BestSolution<'p>, Monitor) {
        self.submit(embedding);
        let best = self.best.take().expect("submit ran at least once");
        (best, self.monitor)
    }
}
