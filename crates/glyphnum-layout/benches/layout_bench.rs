//! Benchmarks for the layout hot path.
//!
//! A display recomputes a full pass on every value change, so per-pass cost
//! is the number that matters (score counters tick every frame).
//!
//! Run with: cargo bench -p glyphnum-layout --bench layout_bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glyphnum_core::geometry::Rect;
use glyphnum_core::glyph::{Glyph, GlyphSet, NUMERAL_COUNT};
use glyphnum_layout::{DigitCap, DigitLayout, FractionalLayout, IntegerLayout};
use std::hint::black_box;

fn glyphs() -> GlyphSet {
    GlyphSet::with_numerals([Glyph::from_size(6.0, 10.0); NUMERAL_COUNT])
        .decimal_point(Glyph::from_size(3.0, 10.0))
        .minus(Glyph::from_size(4.0, 10.0))
}

fn bench_integer_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/integer");
    let set = glyphs();

    for value in [7i64, 123_456, -9_007_199_254_740_993] {
        let engine = IntegerLayout::new(value)
            .max_digits(DigitCap::Unbounded)
            .letter_size(20.0)
            .spacing(1.0)
            .bounds(Rect::centered(400.0, 24.0));
        group.bench_with_input(BenchmarkId::from_parameter(value), &engine, |b, engine| {
            b.iter(|| black_box(engine.layout(&set)))
        });
    }

    group.finish();
}

fn bench_fractional_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/fractional");
    let set = glyphs();

    for (value, places) in [(3.15, 2u32), (-99_999.999, 3), (1.995, 2)] {
        let engine = FractionalLayout::new(value)
            .decimal_places(places)
            .letter_size(20.0)
            .spacing(1.0)
            .bounds(Rect::centered(400.0, 24.0));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{value}@{places}")),
            &engine,
            |b, engine| b.iter(|| black_box(engine.layout(&set))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_integer_pass, bench_fractional_pass);
criterion_main!(benches);
