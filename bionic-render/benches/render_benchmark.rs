use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use bionic_core::{BrandConstants, ExportMode, LayoutConfig};
use bionic_layout::HeadlineLayout;
use bionic_render::Rasterizer;
use bionic_text::FixedAdvanceGlyphs;

/// Benchmark: rasterize the default scene in every export mode
fn bench_render_modes(c: &mut Criterion) {
    let brand = BrandConstants::default();
    let mut glyphs = FixedAdvanceGlyphs::new();
    let scene = HeadlineLayout::new(&brand)
        .compute(&LayoutConfig::default(), &mut glyphs)
        .unwrap();
    let rasterizer = Rasterizer::new();
    let mut group = c.benchmark_group("render_mode");
    group.sample_size(20);

    for mode in ExportMode::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, &mode| {
            b.iter(|| rasterizer.render(black_box(&scene), mode, &mut glyphs).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: PNG encoding of a master raster
fn bench_encode_png(c: &mut Criterion) {
    let brand = BrandConstants::default();
    let mut glyphs = FixedAdvanceGlyphs::new();
    let scene = HeadlineLayout::new(&brand)
        .compute(&LayoutConfig::default(), &mut glyphs)
        .unwrap();
    let image = Rasterizer::new()
        .render(&scene, ExportMode::Master, &mut glyphs)
        .unwrap();

    let mut group = c.benchmark_group("encode");
    group.sample_size(10);
    group.bench_function("encode_png_master", |b| {
        b.iter(|| black_box(&image).encode_png().unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_render_modes, bench_encode_png);
criterion_main!(benches);
