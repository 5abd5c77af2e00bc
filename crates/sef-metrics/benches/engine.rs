//! Benchmarks for the metrics engine over a synthetic dataset.

#![allow(missing_docs)]

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sef_data::FirmRecord;
use sef_metrics::{
    DEFAULT_TOP_FIRMS, YearRange, derive_metrics, filter_by_range, group_by_firm, rank_firms,
};

/// 2000 firms over 2008..=2023, with roughly one year in ten missing.
fn synthetic_dataset() -> Vec<FirmRecord> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut records = Vec::new();

    for firm in 0..2000 {
        let name = format!("Firm {firm:04}");
        let mut sales: f64 = rng.gen_range(100.0..10_000.0);
        for year in 2008..=2023 {
            if rng.gen_bool(0.1) {
                continue;
            }
            sales *= rng.gen_range(0.9..1.2);
            let profit = sales * rng.gen_range(-0.05..0.2);
            let market_value = sales * rng.gen_range(0.5..4.0);
            records.push(FirmRecord::new(name.clone(), year, sales, profit, market_value));
        }
    }

    records
}

fn bench_engine(c: &mut Criterion) {
    let records = synthetic_dataset();
    let range = Some(YearRange::new(2013, 2023));
    let groups = group_by_firm(&records);

    c.bench_function("filter_by_range", |b| {
        b.iter(|| filter_by_range(black_box(&records), range));
    });

    c.bench_function("group_by_firm", |b| {
        b.iter(|| group_by_firm(black_box(&records)));
    });

    c.bench_function("rank_firms", |b| {
        b.iter(|| rank_firms(black_box(&groups), DEFAULT_TOP_FIRMS));
    });

    c.bench_function("derive_metrics_all_firms", |b| {
        b.iter(|| {
            groups
                .eligible()
                .map(|group| derive_metrics(black_box(group)).len())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
