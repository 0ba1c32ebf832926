//! Criterion benchmarks for the input deck codec.
//!
//! Run with:
//! ```bash
//! cargo bench --package dhybrid-input --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dhybrid_input::{parse_document, DHybridInput, GridSpace, Species};

// ── Deck fixtures ─────────────────────────────────────────────────────────────

fn make_default() -> DHybridInput {
    DHybridInput::default()
}

fn make_large_lists() -> DHybridInput {
    DHybridInput {
        grid_space: GridSpace {
            ncells: vec![4096, 4096, 512],
            boxsize: vec![2048.0, 2048.0, 256.0],
            ..Default::default()
        },
        species: Species {
            ct: (0..64).map(|i| f64::from(i) * 0.125).collect(),
            n_constants: 64,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn decks() -> Vec<(&'static str, DHybridInput)> {
    vec![
        ("default", make_default()),
        ("large_lists", make_large_lists()),
    ]
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

/// Benchmarks rendering a whole deck to text.
fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("serialize");
    for (name, deck) in decks() {
        group.bench_with_input(BenchmarkId::new("deck", name), &deck, |b, deck| {
            b.iter(|| black_box(deck).to_string())
        });
    }
    group.finish();
}

/// Benchmarks the untyped scan on its own.
fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for (name, deck) in decks() {
        let text = deck.to_string();
        group.bench_with_input(BenchmarkId::new("deck", name), &text, |b, text| {
            b.iter(|| parse_document(black_box(text)).expect("scan must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks scan plus typed build.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, deck) in decks() {
        let text = deck.to_string();
        group.bench_with_input(BenchmarkId::new("deck", name), &text, |b, text| {
            b.iter(|| {
                black_box(text)
                    .parse::<DHybridInput>()
                    .expect("parse must succeed")
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_serialize, bench_scan, bench_parse);
criterion_main!(benches);
