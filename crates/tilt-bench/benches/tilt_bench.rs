//! Benchmarks for the tilt-shift pipeline.
//!
//! Run with: `cargo bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rustfft::num_complex::Complex;
use std::hint::black_box;

use tilt_core::Image;
use tilt_core::pixel::pack_rgb;
use tilt_ops::aperture::Aperture;
use tilt_ops::color::{HsbGains, adjust_hsb};
use tilt_ops::fft::Fft2d;
use tilt_ops::lens_blur::lens_blur;
use tilt_ops::{TiltShiftConfig, process};

fn photo(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        pack_rgb((x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8)
    })
}

/// Forward + inverse 2D FFT at tile sizes the blur uses.
fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft2d");

    for size in [64usize, 128, 256].iter() {
        let fft = Fft2d::new(*size, *size).unwrap();
        let data: Vec<Complex<f32>> = (0..size * size)
            .map(|i| Complex::new((i % 17) as f32, (i % 5) as f32))
            .collect();

        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("round_trip", size), &data, |b, d| {
            b.iter(|| {
                let mut buf = d.clone();
                fft.forward(&mut buf);
                fft.inverse(&mut buf);
                black_box(buf)
            })
        });
    }

    group.finish();
}

/// Lens blur over a fixed frame at growing radii.
fn bench_lens_blur(c: &mut Criterion) {
    let mut group = c.benchmark_group("lens_blur");
    group.sample_size(10);

    let img = photo(640, 480);
    group.throughput(Throughput::Elements(img.pixel_count() as u64));
    for radius in [2.0f32, 10.0, 40.0].iter() {
        let aperture = Aperture { radius: *radius, ..Aperture::default() };
        group.bench_with_input(BenchmarkId::new("pentagon", radius), &aperture, |b, a| {
            b.iter(|| lens_blur(black_box(&img), a).unwrap())
        });
    }
    let disc = Aperture::disc(10.0);
    group.bench_function("disc_10", |b| b.iter(|| lens_blur(black_box(&img), &disc).unwrap()));

    group.finish();
}

/// HSB adjustment.
fn bench_color(c: &mut Criterion) {
    let mut group = c.benchmark_group("color");

    let img = photo(1024, 768);
    let gains = HsbGains { saturation: 0.8, hue: 0.1, luminance: -0.2 };
    group.throughput(Throughput::Elements(img.pixel_count() as u64));
    group.bench_function("adjust_hsb", |b| b.iter(|| adjust_hsb(black_box(&img), &gains)));

    group.finish();
}

/// Full pipeline with default settings.
fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    group.sample_size(10);

    let img = photo(1024, 768);
    let config = TiltShiftConfig::default();
    group.throughput(Throughput::Elements(img.pixel_count() as u64));
    group.bench_function("default_1024x768", |b| {
        b.iter(|| process(Some(black_box(&img)), &config).unwrap())
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_fft,
    bench_lens_blur,
    bench_color,
    bench_process,
);

criterion_main!(benches);
