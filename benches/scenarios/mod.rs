//! End-to-end benchmarks: what a drone tick actually costs.

mod drone;
mod render;

pub use drone::bench_drone;
pub use render::bench_render;
