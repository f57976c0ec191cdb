//! Benchmarks for the one-pole low-pass.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tone::dsp::filter::{FilterCoefficients, OnePoleLowPass};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    group.bench_function("coefficients", |b| {
        b.iter(|| FilterCoefficients::lowpass(black_box(1_000.0), black_box(SAMPLE_RATE)))
    });

    for &size in BUFFER_SIZES {
        // Sawtooth-like ramp in the 16-bit domain
        let input: Vec<f64> = (0..size)
            .map(|i| ((i % 100) as f64 / 50.0 - 1.0) * 32_767.0)
            .collect();

        let filter = OnePoleLowPass::new(1_000.0);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("lowpass", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.render(black_box(&mut buffer), black_box(SAMPLE_RATE));
            })
        });
    }

    group.finish();
}
