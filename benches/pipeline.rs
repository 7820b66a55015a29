//! Benchmarks for the beadwork pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgba, RgbaImage};

use beadwork::pipeline::{quantize, resample, segment_background, BackgroundMask};
use beadwork::{generate, rasterize, BuiltinPalettes, PaletteStore, RenderOptions, Settings};

/// A photo-sized test card: soft gradient with a framed subject.
fn test_card(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbaImage::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        let border = x < width / 8 || x > width * 7 / 8 || y < height / 8 || y > height * 7 / 8;
        *p = if border {
            Rgba([245, 245, 240, 255])
        } else {
            Rgba([
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x ^ y) & 0xFF) as u8,
                255,
            ])
        };
    }
    DynamicImage::ImageRgba8(img)
}

// -- Full pipeline --

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    let store = PaletteStore::builtin();
    let image = test_card(1024, 768);

    let plain = Settings::default();
    let dithered = Settings {
        dithering: true,
        ..Settings::default()
    };
    let background = Settings {
        remove_background: true,
        ..Settings::default()
    };

    group.bench_function("plain_48", |b| {
        b.iter(|| generate(black_box(&image), &plain, &store).unwrap())
    });

    group.bench_function("dithered_48", |b| {
        b.iter(|| generate(black_box(&image), &dithered, &store).unwrap())
    });

    group.bench_function("background_48", |b| {
        b.iter(|| generate(black_box(&image), &background, &store).unwrap())
    });

    group.finish();
}

// -- Individual stages at grid resolution --

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    let pixels = resample(&test_card(1024, 768), 128);
    let palette = BuiltinPalettes::standard();
    let empty = BackgroundMask::empty(pixels.width() as usize, pixels.height() as usize);

    group.bench_function("segment_background_128", |b| {
        b.iter(|| segment_background(black_box(&pixels), 10))
    });

    group.bench_function("quantize_direct_128", |b| {
        b.iter(|| quantize(black_box(&pixels), &empty, &palette, false))
    });

    group.bench_function("quantize_dithered_128", |b| {
        b.iter(|| quantize(black_box(&pixels), &empty, &palette, true))
    });

    let grid = quantize(&pixels, &empty, &palette, false);
    group.bench_function("rasterize_128_grid_lines", |b| {
        b.iter(|| rasterize(black_box(&grid), RenderOptions::default()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_generate, bench_stages);
criterion_main!(benches);
