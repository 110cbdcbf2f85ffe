//! Criterion benchmarks for the decision chain.
//!
//! Uses a synthetic class with spread-out scores and several seating rows
//! so every rule has work to do.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use roll_call::decision::{create_rng, DecisionConfig, DecisionEngine};
use roll_call::roster::{Candidate, Roster};
use roll_call::selection::SelectionMap;

const GROUPS: [&str; 3] = ["21INB-1", "21INB-2", "20INB-1"];

fn synthetic_class(size: usize) -> (Roster, SelectionMap) {
    let candidates: Vec<Candidate> = (0..size)
        .map(|i| Candidate::new(format!("S{i}"), GROUPS[i % GROUPS.len()], (i * 7 % 40) as u8))
        .collect();
    let mut selection = SelectionMap::new();
    for (i, c) in candidates.iter().enumerate() {
        selection.insert(i % 8, c.name());
    }
    (Roster::new("bench.csv", candidates), selection)
}

fn bench_decide(c: &mut Criterion) {
    let mut group = c.benchmark_group("decide");
    for size in [10, 100, 1000] {
        let (roster, selection) = synthetic_class(size);
        let config = DecisionConfig::default()
            .with_preferred_score(3)
            .with_target_group("21INB-1");
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            let mut rng = create_rng(42);
            b.iter(|| {
                let engine = DecisionEngine::new(&roster, config.clone(), &selection).unwrap();
                black_box(engine.decide_with(&mut rng).unwrap())
            });
        });
    }
    group.finish();
}

fn bench_preferred_far_above(c: &mut Criterion) {
    // Everyone scores 250 while 0 is preferred: the upward search walks
    // the full score range.
    let candidates: Vec<Candidate> = (0..50)
        .map(|i| Candidate::new(format!("S{i}"), "21INB-1", 250))
        .collect();
    let selection = SelectionMap::single_row(candidates.iter().map(|c| c.name().to_string()));
    let roster = Roster::new("bench.csv", candidates);
    let config = DecisionConfig::default();

    c.bench_function("preferred_far_above", |b| {
        let mut rng = create_rng(7);
        b.iter(|| {
            let engine = DecisionEngine::new(&roster, config.clone(), &selection).unwrap();
            black_box(engine.decide_with(&mut rng).unwrap())
        });
    });
}

criterion_group!(benches, bench_decide, bench_preferred_far_above);
criterion_main!(benches);
