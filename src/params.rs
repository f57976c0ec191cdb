//! Parameter records passed into each render.
//!
//! `ToneParameters` replaces the slider values the synth front-ends used to
//! read from shared state: the caller snapshots them once per tick and hands
//! the record to the engine by reference. Setters clamp silently.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::Adsr;
use crate::dsp::oscillator::{TriangleMode, Waveform};
use crate::error::{ToneError, ToneResult};
use crate::notes::{note_frequency, Note, Pitch};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
pub const DEFAULT_DURATION_MS: u32 = 100;

/// Sample rate and buffer duration. Together they fix the buffer length.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub sample_rate_hz: u32,
    pub duration_ms: u32,
}

impl RenderConfig {
    pub fn new(sample_rate_hz: u32, duration_ms: u32) -> Self {
        Self {
            sample_rate_hz,
            duration_ms,
        }
    }

    /// `round(sample_rate_hz * duration_ms / 1000)`, rejecting configurations
    /// that would produce an empty buffer.
    pub fn buffer_len(&self) -> ToneResult<usize> {
        if self.duration_ms == 0 {
            return Err(ToneError::ZeroDuration);
        }
        if self.sample_rate_hz == 0 {
            return Err(ToneError::InvalidSampleRate {
                rate: self.sample_rate_hz,
            });
        }

        // integer rounding, exact for every u32 pair
        let product = u64::from(self.sample_rate_hz) * u64::from(self.duration_ms);
        let len = ((product + 500) / 1000) as usize;
        if len == 0 {
            return Err(ToneError::EmptyBuffer {
                sample_rate_hz: self.sample_rate_hz,
                duration_ms: self.duration_ms,
            });
        }
        Ok(len)
    }

    pub fn sample_rate(&self) -> f64 {
        f64::from(self.sample_rate_hz)
    }

    pub fn nyquist_hz(&self) -> f64 {
        0.5 * self.sample_rate()
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, DEFAULT_DURATION_MS)
    }
}

/// Everything a single render reads. Immutable for the duration of the call.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParameters {
    pub amplitude: f64,
    pub frequency_hz: f64,
    pub waveform: Waveform,
    pub pulse_width: f64,
    pub cutoff_hz: f64,
    pub envelope: Adsr,
}

impl ToneParameters {
    pub fn new(waveform: Waveform, frequency_hz: f64) -> Self {
        Self {
            waveform,
            frequency_hz,
            ..Self::default()
        }
    }

    /// Pitch from the note table, see [`note_frequency`].
    pub fn from_note(waveform: Waveform, note: Note, octave: i32) -> Self {
        Self::new(waveform, note_frequency(note, octave))
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }

    pub fn frequency(mut self, frequency_hz: f64) -> Self {
        self.frequency_hz = frequency_hz;
        self
    }

    pub fn pitch(mut self, pitch: Pitch) -> Self {
        self.frequency_hz = pitch.frequency_hz();
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn pulse_width(mut self, pulse_width: f64) -> Self {
        self.pulse_width = pulse_width.clamp(0.0, 1.0);
        self
    }

    /// Slider-style pulse width in percent, 0 - 100.
    pub fn pulse_width_percent(self, percent: f64) -> Self {
        self.pulse_width(percent / 100.0)
    }

    pub fn cutoff(mut self, cutoff_hz: f64) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn adsr(
        mut self,
        attack_ms: f64,
        decay_ms: f64,
        sustain_level: f64,
        release_ms: f64,
    ) -> Self {
        self.envelope = Adsr::new(attack_ms, decay_ms, sustain_level, release_ms);
        self
    }

    pub fn envelope(mut self, envelope: Adsr) -> Self {
        self.envelope = envelope;
        self
    }
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self {
            amplitude: 0.5,
            frequency_hz: 440.0,
            waveform: Waveform::Sine,
            pulse_width: 0.5,
            cutoff_hz: 10_000.0,
            envelope: Adsr::flat(),
        }
    }
}

/// Engine-wide switches that are not part of a single tone.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// When false the low-pass stage is skipped entirely.
    pub filter_enabled: bool,
    pub triangle: TriangleMode,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            filter_enabled: true,
            triangle: TriangleMode::Verbatim,
        }
    }
}
