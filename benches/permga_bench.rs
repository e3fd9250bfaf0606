//! Criterion benchmarks for the permutation GA.
//!
//! Measures whole searches on n-queens and the individual operators on
//! random permutations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use u_permga::ga::{order_crossover, swap_mutation, GaConfig, GeneticEngine, PermutationGa};
use u_permga::problems::NQueens;

fn shuffled(n: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut v: Vec<usize> = (0..n).collect();
    v.shuffle(rng);
    v
}

// ===========================================================================
// Whole search
// ===========================================================================

fn bench_nqueens_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("nqueens_search");
    group.sample_size(10);

    for &(n, population, generations) in &[(8usize, 50usize, 25usize), (16, 100, 150)] {
        group.bench_with_input(
            BenchmarkId::new("queens", n),
            &(n, population, generations),
            |b, &(n, population, generations)| {
                b.iter(|| {
                    let config = GaConfig::default()
                        .with_population_size(population)
                        .with_seed(42);
                    let ops = PermutationGa::new(0.05).expect("valid probability");
                    let mut engine =
                        GeneticEngine::new(NQueens::new(n), ops, config).expect("valid config");
                    black_box(engine.search(generations).expect("search"))
                });
            },
        );
    }

    group.finish();
}

// ===========================================================================
// Operators
// ===========================================================================

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");
    let mut rng = StdRng::seed_from_u64(42);

    for &n in &[16usize, 64, 256] {
        let p1 = shuffled(n, &mut rng);
        let p2 = shuffled(n, &mut rng);

        group.bench_with_input(BenchmarkId::new("order_crossover", n), &n, |b, _| {
            b.iter(|| black_box(order_crossover(&p1, &p2, &mut rng).expect("permutations")));
        });

        let mut perm = p1.clone();
        group.bench_with_input(BenchmarkId::new("swap_mutation", n), &n, |b, _| {
            b.iter(|| black_box(swap_mutation(&mut perm, 0.05, &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nqueens_search, bench_operators);
criterion_main!(benches);
