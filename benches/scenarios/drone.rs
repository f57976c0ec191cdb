//! Drone ticks through a null sink and through the ring buffer handoff.

use std::hint::black_box;

use criterion::Criterion;
use saavy_tone::engine::drone::Drone;
use saavy_tone::io::ring::{ring_sink, CommandReceiver};
use saavy_tone::io::NullSink;
use saavy_tone::{RenderConfig, ToneEngine, ToneParameters, Waveform};

pub fn bench_drone(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/drone");
    let config = RenderConfig::default();
    let params = ToneParameters::new(Waveform::Square, 220.0).pulse_width(0.3);

    let mut drone = Drone::new(ToneEngine::default(), config, NullSink)
        .expect("default config is valid");
    drone.activate(&params).expect("render");
    group.bench_function("tick_null_sink", |b| {
        b.iter(|| drone.tick(black_box(&params)))
    });

    let (sink, mut receiver) = ring_sink(4);
    let mut drone = Drone::new(ToneEngine::default(), config, sink)
        .expect("default config is valid");
    drone.activate(&params).expect("render");
    group.bench_function("tick_ring_sink", |b| {
        b.iter(|| {
            let ticked = drone.tick(black_box(&params));
            // drain like the audio callback so every tick is queued, not dropped
            while receiver.pop().is_some() {}
            ticked
        })
    });

    group.finish();
}
