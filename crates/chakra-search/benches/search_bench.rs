// Criterion benchmarks for chakra-search.
//
// Grids are generated deterministically, so no data files are needed.
//
// Run:
//   cargo bench -p chakra-search

use std::time::Duration;

use chakra_search::{
    GeneticConfig, PathBuilder, PathKey, RunLimits, SearchConfig, SearchMode, Searcher, SearchStrategy,
    ToroidalGrid, Warnsdorff, GeneticSearch, PathSearch, strategy::grow,
};
use criterion::{Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn grid(side: usize) -> ToroidalGrid {
    let values: Vec<u32> = (0..(side * side) as u32)
        .map(|i| {
            let h = i.wrapping_mul(2_654_435_761) >> 9;
            if h % 3 == 0 { 1 + h % 27 } else { 28 + h % 33 }
        })
        .collect();
    ToroidalGrid::from_flat(&values).expect("square grid")
}

fn config(seed: u64) -> SearchConfig {
    SearchConfig {
        seed: Some(seed),
        timeout: Duration::from_secs(5),
        max_attempts: 256,
        ..SearchConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// One greedy Warnsdorff construction on a 27x27 grid (729 cells).
fn bench_greedy_construction(c: &mut Criterion) {
    let grid = grid(27);
    let mut rng = StdRng::seed_from_u64(1);
    c.bench_function("warnsdorff_construction_27x27", |b| {
        b.iter(|| {
            let mut builder = PathBuilder::new(&grid, RunLimits::default(), SearchMode::Path, 0);
            grow(&mut builder, &Warnsdorff, &mut rng);
            builder.len()
        })
    });
}

/// Restart search bounded to 256 attempts on a 9x9 grid.
fn bench_restart_search(c: &mut Criterion) {
    let grid = grid(9);
    let cfg = config(7);
    c.bench_function("restart_search_9x9", |b| {
        b.iter(|| Searcher::with_strategy(&grid, &cfg, SearchStrategy::Randomized).run_once())
    });
}

/// Ten generations of the genetic search on a 9x9 grid.
fn bench_genetic_generations(c: &mut Criterion) {
    let grid = grid(9);
    let genetic = GeneticConfig {
        generations: 10,
        ..GeneticConfig::default()
    };
    let search = GeneticSearch::new(config(3), genetic);
    c.bench_function("genetic_10_generations_9x9", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(3);
            search.search(&grid, &mut rng, &mut |_| true)
        })
    });
}

/// Canonical key of a 729-vertex path.
fn bench_canonical_key(c: &mut Criterion) {
    let grid = grid(27);
    let path: Vec<usize> = (0..grid.len()).collect();
    c.bench_function("canonical_key_729", |b| b.iter(|| PathKey::canonical(&grid, &path)));
}

criterion_group!(
    benches,
    bench_greedy_construction,
    bench_restart_search,
    bench_genetic_generations,
    bench_canonical_key
);
criterion_main!(benches);
