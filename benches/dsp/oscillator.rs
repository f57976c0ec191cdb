//! Benchmarks for waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tone::dsp::oscillator::{Oscillator, TriangleMode};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BUFFER_SIZES {
        let mut buffer = vec![0.0f64; size];

        let oscillators = [
            // sin() per sample
            ("sine", Oscillator::sine()),
            // two floor() calls
            ("sawtooth", Oscillator::sawtooth()),
            // floor + rem_euclid
            ("square", Oscillator::square()),
            ("triangle", Oscillator::triangle()),
            (
                "triangle_wrapped",
                Oscillator::triangle().triangle_mode(TriangleMode::Wrapped),
            ),
        ];

        for (name, osc) in oscillators {
            let osc = osc.frequency(440.0);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    osc.render(black_box(&mut buffer), black_box(SAMPLE_RATE));
                })
            });
        }
    }

    group.finish();
}
