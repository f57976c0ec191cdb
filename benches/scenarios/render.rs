//! Full pipeline renders for each waveform.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_tone::{RenderConfig, ToneEngine, ToneParameters, Waveform};

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    let engine = ToneEngine::default();

    for duration_ms in [10, 100, 1_000] {
        let config = RenderConfig::new(44_100, duration_ms);

        for waveform in Waveform::ALL {
            let params = ToneParameters::new(waveform, 440.0)
                .amplitude(0.8)
                .cutoff(5_000.0)
                .adsr(10.0, 50.0, 0.7, 100.0);

            group.bench_with_input(
                BenchmarkId::new(waveform.name(), duration_ms),
                &duration_ms,
                |b, _| b.iter(|| engine.render(black_box(&params), black_box(&config))),
            );
        }

        // Filter bypassed
        let params = ToneParameters::new(Waveform::Sawtooth, 440.0);
        let bypass = engine.with_filter(false);
        group.bench_with_input(
            BenchmarkId::new("bypass", duration_ms),
            &duration_ms,
            |b, _| b.iter(|| bypass.render(black_box(&params), black_box(&config))),
        );
    }

    group.finish();
}
