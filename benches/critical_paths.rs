//! Criterion benchmarks for progmem-assets critical paths
//!
//! Benchmarks the core performance-critical operations:
//! - Config: line-oriented config parsing
//! - Codec: RGBA to RGB565 encoding
//! - Compositor: layer blitting and resize
//! - Header: C header text generation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{imageops, Rgba, RgbaImage};
use progmem_assets::composition::blit_layer;
use progmem_assets::config::{parse, PipelineConfig};
use progmem_assets::export::{bytes_to_progmem, emit_header};
use progmem_assets::models::EncodedImage;
use progmem_assets::rgb565;

// =============================================================================
// Test Data Generators
// =============================================================================

/// Generate a config with `entries` data entries of `layers` layers each
fn make_config_text(entries: usize, layers: usize) -> String {
    let mut text = String::from("[setting]\nprefix = img\n[resize]\nfrom = 2\nto = 1\n[offset]\n");
    for part in 0..8 {
        text.push_str(&format!("part{} = {}, {}, 64, 64\n", part, part * 10, part * 5));
    }
    for i in 0..entries {
        text.push_str(&format!("[[data]]\nparts = part{}\ntitle = entry {}\nlayers = <files>\n", i % 8, i));
        for l in 0..layers {
            text.push_str(&format!("layer{}_{}.W64_H64_X{}_Y{}.png\n", i, l, (i % 8) * 10, (i % 8) * 5));
        }
        text.push_str("</files>\n");
    }
    text
}

/// Image with a transparent border and opaque gradient body
fn make_layer(size: u32) -> RgbaImage {
    RgbaImage::from_fn(size, size, |x, y| {
        let alpha = if x < 4 || y < 4 { 0 } else { 255 };
        Rgba([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8, alpha])
    })
}

fn make_encoded(count: usize, size: u32) -> Vec<EncodedImage> {
    let pixels = rgb565::encode(&make_layer(size));
    (0..count)
        .map(|i| EncodedImage {
            width: size,
            height: size,
            pos_x: (i * 3) as i64,
            pos_y: (i * 2) as i64,
            pixels: pixels.clone(),
            parts: format!("part{}", i % 4),
            pidx: i / 4,
            title: format!("entry {}", i),
            layers: vec![format!("layer{}.W{}_H{}_X0_Y0.png", i, size, size)],
        })
        .collect()
}

// =============================================================================
// Config Benchmarks
// =============================================================================

fn bench_config(c: &mut Criterion) {
    let mut group = c.benchmark_group("config");

    for entries in [8, 64, 256].iter() {
        let text = make_config_text(*entries, 4);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse", entries), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });
    }

    let tree = parse(&make_config_text(64, 4)).expect("bench config parses");
    group.bench_function("schema_64", |b| b.iter(|| PipelineConfig::from_tree(black_box(&tree))));

    group.finish();
}

// =============================================================================
// Codec Benchmarks
// =============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("rgb565");

    for size in [32u32, 128, 320].iter() {
        let image = make_layer(*size);
        group.throughput(Throughput::Elements((*size * *size) as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &image, |b, image| {
            b.iter(|| rgb565::encode(black_box(image)))
        });
    }

    group.finish();
}

// =============================================================================
// Compositor Benchmarks
// =============================================================================

fn bench_compositor(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor");

    let layer = make_layer(128);
    group.bench_function("blit_128", |b| {
        b.iter(|| {
            let mut canvas = RgbaImage::new(160, 160);
            blit_layer(&mut canvas, black_box(&layer), 16, -8);
            canvas
        })
    });

    group.bench_function("resize_half_128", |b| {
        b.iter(|| imageops::resize(black_box(&layer), 64, 64, imageops::FilterType::Lanczos3))
    });

    group.finish();
}

// =============================================================================
// Header Benchmarks
// =============================================================================

fn bench_header(c: &mut Criterion) {
    let mut group = c.benchmark_group("header");

    for count in [4usize, 32].iter() {
        let images = make_encoded(*count, 64);
        group.bench_with_input(BenchmarkId::new("emit", count), &images, |b, images| {
            b.iter(|| emit_header(black_box(images), "img"))
        });
    }

    let data: Vec<u8> = (0..64 * 1024).map(|i| (i % 251) as u8).collect();
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function("bytes_to_progmem_64k", |b| {
        b.iter(|| bytes_to_progmem(black_box(&data), "sound000"))
    });

    group.finish();
}

criterion_group!(benches, bench_config, bench_codec, bench_compositor, bench_header);
criterion_main!(benches);
