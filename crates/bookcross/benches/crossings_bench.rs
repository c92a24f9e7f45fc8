//! Criterion benchmarks for the crossing counters.
//! Sizes follow the optimizer hot path: repeated full recounts on random
//! embeddings of Erdős–Rényi graphs.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bookcross::crossings::CrossingCounter;
use bookcross::model::{Embedding, Graph, Problem};
use bookcross::util::random_permutation;

fn random_problem(n: usize, p: f64, k: usize, seed: u64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pairs = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            if rng.gen::<f64>() < p {
                pairs.push((a, b));
            }
        }
    }
    let graph = Graph::from_edges(n, &pairs).unwrap();
    Problem::new(graph, k).unwrap()
}

fn random_embedding<'p>(problem: &'p Problem, seed: u64) -> Embedding<'p> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spine = random_permutation(problem.n(), &mut rng);
    let distribution: Vec<usize> = (0..problem.m())
        .map(|_| rng.gen_range(0..problem.k()))
        .collect();
    Embedding::with_layout(problem, &spine, &distribution)
}

fn bench_counters(c: &mut Criterion) {
    let mut group = c.benchmark_group("crossings");
    for &n in &[32usize, 128, 512] {
        let problem = random_problem(n, 0.2, 3, 7);
        let embedding = random_embedding(&problem, 11);
        for (name, counter) in [
            ("pairwise", CrossingCounter::Pairwise),
            ("sweep", CrossingCounter::Sweep),
            ("divide_and_conquer", CrossingCounter::DivideAndConquer),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &embedding, |b, e| {
                b.iter(|| counter.count(e))
            });
        }
    }
    group.finish();
}

fn bench_swap_gain(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap_gain");
    for &n in &[64usize, 256] {
        let problem = random_problem(n, 0.2, 3, 13);
        let embedding = random_embedding(&problem, 17);
        group.bench_with_input(BenchmarkId::new("adjacent", n), &embedding, |b, e| {
            b.iter(|| {
                let mut total = 0i64;
                for left in 0..n - 1 {
                    total += bookcross::optimize::local::swap_gain(e, left, left + 1);
                }
                total
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_counters, bench_swap_gain);
criterion_main!(benches);
