//! Benchmarks for ADSR envelope shaping.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tone::dsp::envelope::Adsr;

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BUFFER_SIZES {
        let mut buffer = vec![1.0f64; size];

        // All four segments present
        let layout = Adsr::new(10.0, 50.0, 0.7, 100.0).layout(size, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("adsr", size), &size, |b, _| {
            b.iter(|| {
                layout.apply(black_box(&mut buffer));
            })
        });

        // Sustain only
        let layout = Adsr::flat().layout(size, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("flat", size), &size, |b, _| {
            b.iter(|| {
                layout.apply(black_box(&mut buffer));
            })
        });

        // Segments overrun the buffer
        let layout = Adsr::new(500.0, 500.0, 0.5, 500.0).layout(size, SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("truncated", size), &size, |b, _| {
            b.iter(|| {
                layout.apply(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
