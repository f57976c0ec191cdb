pub mod analysis; // FFT view of rendered buffers
pub mod dsp;
pub mod engine; // Render pipeline and the drone state machine
pub mod error;
pub mod io;
pub mod notes;
pub mod params;

pub use dsp::{Adsr, FilterCoefficients, TriangleMode, Waveform};
pub use engine::drone::{Drone, DroneState, ParameterSource};
pub use engine::{render, ToneEngine};
pub use error::{ToneError, ToneResult};
pub use io::{PlaybackSink, SampleBuffer};
pub use notes::{note_frequency, Note, Pitch};
pub use params::{EngineOptions, RenderConfig, ToneParameters};

/// `(b, a)` for the tone filter at the given cutoff and sample rate.
pub fn derive_filter_coefficients(cutoff_hz: f64, sample_rate_hz: u32) -> FilterCoefficients {
    FilterCoefficients::lowpass(cutoff_hz, f64::from(sample_rate_hz))
}
