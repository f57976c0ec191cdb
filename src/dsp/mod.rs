//! Signal stages of the tone pipeline.
//!
//! Each stage is a pure function of its parameters and the buffer it is
//! handed. Nothing here remembers anything between renders: oscillator phase
//! is derived from the sample index, envelope segments from the buffer length,
//! and filter memory starts at zero on every call.

/// Attack/decay/sustain/release envelope laid out over a fixed buffer.
pub mod envelope;
/// First-order Butterworth low-pass.
pub mod filter;
/// Periodic waveforms as closed-form functions of time.
pub mod oscillator;

pub use envelope::{Adsr, EnvelopeLayout};
pub use filter::{FilterCoefficients, OnePoleLowPass};
pub use oscillator::{Oscillator, TriangleMode, Waveform};
