//! Benchmarks for the three scoring strategies
//!
//! Run with: cargo bench --package scorers
//!
//! Uses a synthetic catalog so the benchmark needs no dataset on disk.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::DataIndex;
use scorers::{rank_top_n, Strategy};

const USERS: usize = 300;
const ITEMS: usize = 400;
const TAGS: [&str; 8] = [
    "Action", "Adventure", "Comedy", "Drama", "Horror", "Romance", "Sci-Fi", "Thriller",
];

/// Deterministic pseudo-random sparse ratings (~5% density)
fn synthetic_index() -> DataIndex {
    let mut index = DataIndex::new();
    for item in 0..ITEMS {
        let tags = [TAGS[item % TAGS.len()], TAGS[(item * 7 + 3) % TAGS.len()]];
        index.register_item(format!("item-{}", item), tags);
    }

    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    for user in 0..USERS {
        let mut ratings = Vec::new();
        for item in 0..ITEMS {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            if (state >> 33) % 20 == 0 {
                let rating = ((state >> 40) % 5 + 1) as f64;
                ratings.push((format!("item-{}", item), rating));
            }
        }
        index.set_ratings(format!("user-{}", user), ratings);
    }
    index
}

fn bench_strategies(c: &mut Criterion) {
    let index = synthetic_index();

    for strategy in Strategy::ALL {
        c.bench_function(&format!("{}_recommend_top20", strategy), |b| {
            b.iter(|| {
                let scores = strategy.scorer().score(&index, black_box("user-1"));
                black_box(rank_top_n(scores, index.catalog(), strategy, black_box(20)))
            })
        });
    }
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
