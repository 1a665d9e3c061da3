use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use bionic_text::{measure, CosmicGlyphs, FixedAdvanceGlyphs, FontSpec, GlyphSource};

fn bench_measure_fixed(c: &mut Criterion) {
    let mut glyphs = FixedAdvanceGlyphs::new();
    let font = FontSpec::new("Poppins, sans-serif", 900, 100.0);

    c.bench_function("measure_fixed_heading", |b| {
        b.iter(|| {
            measure(
                black_box("HEADING STYLE"),
                black_box(&font),
                0.02,
                0.30,
                &mut glyphs,
            )
            .unwrap()
        });
    });
}

fn bench_measure_cosmic(c: &mut Criterion) {
    let mut glyphs = CosmicGlyphs::new();
    if glyphs.face_count() == 0 {
        return;
    }
    let font = FontSpec::new("sans-serif", 900, 100.0);

    c.bench_function("measure_cosmic_heading", |b| {
        b.iter(|| {
            measure(
                black_box("PROMOTIONAL"),
                black_box(&font),
                0.02,
                0.30,
                &mut glyphs,
            )
            .unwrap()
        });
    });
}

fn bench_mask_cosmic(c: &mut Criterion) {
    let mut glyphs = CosmicGlyphs::new();
    if glyphs.face_count() == 0 {
        return;
    }
    let font = FontSpec::new("sans-serif", 900, 100.0);

    c.bench_function("mask_cosmic_single_glyph", |b| {
        b.iter(|| glyphs.mask(black_box('M'), &font).unwrap());
    });
}

criterion_group!(benches, bench_measure_fixed, bench_measure_cosmic, bench_mask_cosmic);
criterion_main!(benches);
