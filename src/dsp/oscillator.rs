use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ToneError;

/*
Waveform Oscillator
===================

The oscillator turns a frequency into a periodic signal. Each kind is written
as a closed-form function of absolute time `t = i / sample_rate`, so a buffer
is fully determined by its index; there is no phase accumulator carried between
renders.

    f   frequency in Hz
    A   amplitude, 0.0 - 1.0
    pw  pulse width (duty offset), 0.0 - 1.0, square only

Sine
    A * sin(2π f t)

Sawtooth
    A * 2 * (f t - floor(0.5 + f t))

    Phase is wrapped through floor(), so the ramp repeats every period and
    stays centered on zero:

       ╱│  ╱│  ╱│
      ╱ │ ╱ │ ╱ │
        │╱  │╱  │╱

Square
    A * (floor(2 f t + pw) mod 2)

    A 0 / A bi-level signal, not a symmetric ±A square. Moving `pw` slides the
    transition points inside the period.

     ┌──┐  ┌──┐  ┌──
     │  │  │  │  │
    ─┘  └──┘  └──┘

Triangle
    A * (2 * |2 f t - 1| - 1)

    This is the formula the synth has always used and it is kept verbatim.
    Note that `f t` is NOT wrapped into [0, 1): the shape is a triangle only
    while `f t` stays near that range, after which `|2 f t - 1|` grows without
    bound and the output rails. `TriangleMode::Wrapped` substitutes the
    fractional phase `f t - floor(f t)` and yields a proper periodic triangle:

    verbatim:   ╲  ╱  then a straight line off to +∞ (saturates downstream)
    wrapped:    ╲╱╲╱╲╱


Dispatch
--------

Waveform selection is a table lookup: `WAVE_TABLE[waveform as usize]` holds one
plain function per kind. The match happens once per render, not once per
sample.
*/

/// Waveform kinds. Mutually exclusive; there is no blending between them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Triangle,
    Sawtooth,
    Square,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Square,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Triangle => "Triangle",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square => "Square",
        }
    }

    /// Keyboard shortcut used by the synth front-ends: q w e r.
    pub fn from_key(key: char) -> Option<Self> {
        match key {
            'q' => Some(Waveform::Sine),
            'w' => Some(Waveform::Triangle),
            'e' => Some(Waveform::Sawtooth),
            'r' => Some(Waveform::Square),
            _ => None,
        }
    }

    #[inline]
    fn wave_fn(self) -> WaveFn {
        WAVE_TABLE[self as usize]
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = ToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToneError::UnknownWaveform {
                name: s.to_string(),
            })
    }
}

/// How the triangle kind treats phase.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriangleMode {
    /// `2|2ft - 1| - 1` without wrapping; only a triangle for the first period.
    #[default]
    Verbatim,
    /// Same shape on the fractional phase; periodic for all t.
    Wrapped,
}

/// Per-render arguments shared by every wave function.
#[derive(Debug, Clone, Copy)]
struct WaveArgs {
    amplitude: f64,
    frequency: f64,
    pulse_width: f64,
    triangle: TriangleMode,
}

type WaveFn = fn(f64, &WaveArgs) -> f64;

// Indexed by `Waveform as usize`; keep in declaration order.
const WAVE_TABLE: [WaveFn; 4] = [sine, triangle, sawtooth, square];

fn sine(t: f64, w: &WaveArgs) -> f64 {
    w.amplitude * (TAU * w.frequency * t).sin()
}

fn triangle(t: f64, w: &WaveArgs) -> f64 {
    let ft = w.frequency * t;
    let phase = match w.triangle {
        TriangleMode::Verbatim => ft,
        TriangleMode::Wrapped => ft - ft.floor(),
    };
    w.amplitude * (2.0 * (2.0 * phase - 1.0).abs() - 1.0)
}

fn sawtooth(t: f64, w: &WaveArgs) -> f64 {
    let ft = w.frequency * t;
    w.amplitude * 2.0 * (ft - (0.5 + ft).floor())
}

fn square(t: f64, w: &WaveArgs) -> f64 {
    let level = (2.0 * w.frequency * t + w.pulse_width).floor().rem_euclid(2.0);
    w.amplitude * level
}

/// Stateless oscillator description. Rendering the same oscillator twice
/// produces identical buffers.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    waveform: Waveform,
    args: WaveArgs,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            args: WaveArgs {
                amplitude: 1.0,
                frequency: 440.0,
                pulse_width: 0.5,
                triangle: TriangleMode::Verbatim,
            },
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.args.amplitude = amplitude.clamp(0.0, 1.0);
        self
    }

    pub fn frequency(mut self, frequency_hz: f64) -> Self {
        self.args.frequency = frequency_hz;
        self
    }

    pub fn pulse_width(mut self, pulse_width: f64) -> Self {
        self.args.pulse_width = pulse_width.clamp(0.0, 1.0);
        self
    }

    pub fn triangle_mode(mut self, mode: TriangleMode) -> Self {
        self.args.triangle = mode;
        self
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// False for zero, negative or non-finite frequencies ("no note selected").
    pub fn is_audible(&self) -> bool {
        self.args.frequency.is_finite() && self.args.frequency > 0.0
    }

    /// Value at absolute time `t` seconds, in `[-amplitude, amplitude]` for
    /// every kind except a verbatim triangle past its first period.
    #[inline]
    pub fn sample_at(&self, t: f64) -> f64 {
        if !self.is_audible() {
            return 0.0;
        }
        (self.waveform.wave_fn())(t, &self.args)
    }

    /// Fill `out` with `out[i] = wave(i / sample_rate)`.
    pub fn render(&self, out: &mut [f64], sample_rate: f64) {
        if !self.is_audible() {
            out.fill(0.0);
            return;
        }

        let wave = self.waveform.wave_fn();
        for (i, sample) in out.iter_mut().enumerate() {
            let t = i as f64 / sample_rate;
            *sample = wave(t, &self.args);
        }
    }
}
