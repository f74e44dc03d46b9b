//! Benchmarks for the renderer hot paths.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glyphcast_render::{render, RenderMode, RenderOptions};
use image::{Rgba, RgbaImage};

/// A plasma-like test pattern with structure at several scales.
fn test_image(size: u32) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let fx = x as f32 / size as f32;
        let fy = y as f32 / size as f32;
        let v = ((fx * 12.0).sin() + (fy * 9.0).cos() + ((fx + fy) * 7.0).sin()) / 3.0;
        let v = ((v * 0.5 + 0.5) * 255.0) as u8;
        *p = Rgba([v, 255 - v, v / 2 + 64, 255]);
    }
    img
}

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_modes");
    let img = test_image(256);
    let mut opts = RenderOptions::default();
    opts.max_width = 80;
    opts.max_height = 40;

    for mode in [RenderMode::Ascii, RenderMode::Braille, RenderMode::Blocks] {
        group.bench_with_input(BenchmarkId::new("solid", mode.name()), &mode, |b, &m| {
            b.iter(|| render(black_box(&img), m, black_box(&opts)).unwrap());
        });
    }
    group.finish();
}

fn bench_source_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("ascii_source_size");
    let mut opts = RenderOptions::default();
    opts.max_width = 100;
    opts.max_height = 40;

    for size in [128u32, 512, 1024] {
        let img = test_image(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &img, |b, img| {
            b.iter(|| render(black_box(img), RenderMode::Ascii, black_box(&opts)).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_modes, bench_source_sizes);
criterion_main!(benches);
