#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
ADSR Envelope Shaping
=====================

A linear ADSR envelope laid out over a fixed-length buffer. Unlike a gated
envelope that advances sample by sample until note_off arrives, this one knows
the buffer length up front: the release is pinned to the tail of the buffer
and everything else is measured from the head.

Vocabulary
----------

  level       Envelope value at a sample index (0.0 to 1.0). Multiplies the
              oscillator output.

  segment     One of attack, decay, sustain, release. Attack, decay and release
              have fixed sample lengths derived from milliseconds; sustain
              fills whatever is left.

  N           Buffer length in samples.


The Layout
----------

  Level
    1.0 ┐   ╱╲
        │  ╱  ╲_____________
    S   │ ╱                 ╲
        │╱                   ╲
    0.0 └─────────────────────╲──→ index
        0    A    A+D     N-R   N

  attack   [0, A)       0 → 1          A = round(attack_ms  / 1000 * sr)
  decay    [A, A+D)     1 → S          D = round(decay_ms   / 1000 * sr)
  sustain  [A+D, N-R)   S              length max(0, N - A - D - R)
  release  [N-R, N)     S → 0          R = round(release_ms / 1000 * sr)

Ramps are inclusive of both endpoints, the way `linspace(from, to, len)`
would lay them out: the first attack sample is exactly 0.0, the last attack
sample exactly 1.0, and the final sample of the buffer exactly 0.0. A
one-sample segment jumps straight to its target.


When A + D + R > N
------------------

The segments no longer fit. Release keeps priority over the tail, so it still
ends at index N - 1; whatever attack/decay would have occupied the overlap is
cut off. The release ramp starts from the level the envelope had reached at
N - R instead of from S, which avoids a step in the middle of an attack:

    A + D + R > N:

        ╱│
       ╱ │╲
      ╱  │ ╲          release starts here from the attack level
     ╱   │  ╲
    0    N-R  N

If R alone exceeds N, the release begins before the buffer does. It is then
treated as starting from S at the virtual index N - R and only its visible
tail is written.
*/

/// ADSR timings in milliseconds plus a sustain level.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    pub attack_ms: f64,
    pub decay_ms: f64,
    pub sustain_level: f64,
    pub release_ms: f64,
}

impl Adsr {
    /// Negative or NaN times collapse to zero; sustain is clamped to [0, 1]
    /// and a NaN sustain holds at unity.
    pub fn new(attack_ms: f64, decay_ms: f64, sustain_level: f64, release_ms: f64) -> Self {
        Self {
            attack_ms: attack_ms.max(0.0),
            decay_ms: decay_ms.max(0.0),
            sustain_level: clamp_sustain(sustain_level),
            release_ms: release_ms.max(0.0),
        }
    }

    /// Unity gain across the whole buffer.
    pub fn flat() -> Self {
        Self::new(0.0, 0.0, 1.0, 0.0)
    }

    /// Resolve millisecond timings into sample counts for a buffer of `len`
    /// samples.
    pub fn layout(&self, len: usize, sample_rate: f64) -> EnvelopeLayout {
        EnvelopeLayout {
            len,
            attack: ms_to_samples(self.attack_ms, sample_rate),
            decay: ms_to_samples(self.decay_ms, sample_rate),
            release: ms_to_samples(self.release_ms, sample_rate),
            sustain_level: clamp_sustain(self.sustain_level),
        }
    }
}

fn clamp_sustain(level: f64) -> f64 {
    if level.is_nan() {
        1.0
    } else {
        level.clamp(0.0, 1.0)
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::flat()
    }
}

#[inline]
fn ms_to_samples(ms: f64, sample_rate: f64) -> usize {
    (ms.max(0.0) / 1000.0 * sample_rate).round() as usize
}

/// Position `k` of `len` along an inclusive ramp, 0.0 to 1.0.
#[inline]
fn ramp(k: usize, len: usize) -> f64 {
    if len <= 1 {
        1.0
    } else {
        k as f64 / (len - 1) as f64
    }
}

/// Sample-domain envelope for one buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeLayout {
    len: usize,
    attack: usize,
    decay: usize,
    release: usize,
    sustain_level: f64,
}

impl EnvelopeLayout {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn attack_samples(&self) -> usize {
        self.attack
    }

    pub fn decay_samples(&self) -> usize {
        self.decay
    }

    pub fn release_samples(&self) -> usize {
        self.release
    }

    pub fn sustain_samples(&self) -> usize {
        self.len
            .saturating_sub(self.attack)
            .saturating_sub(self.decay)
            .saturating_sub(self.release)
    }

    /// True when attack + decay + release do not fit in the buffer.
    pub fn is_truncated(&self) -> bool {
        self.attack
            .saturating_add(self.decay)
            .saturating_add(self.release)
            > self.len
    }

    /// Signed so that a release longer than the buffer starts before index 0.
    fn release_start(&self) -> i64 {
        self.len as i64 - i64::try_from(self.release).unwrap_or(i64::MAX)
    }

    fn head_level(&self, index: usize) -> f64 {
        if index < self.attack {
            ramp(index, self.attack)
        } else if index < self.attack.saturating_add(self.decay) {
            let progress = ramp(index - self.attack, self.decay);
            1.0 - (1.0 - self.sustain_level) * progress
        } else {
            self.sustain_level
        }
    }

    /// Envelope level at `index`. Indices at or past `len` read as 0.0.
    pub fn level_at(&self, index: usize) -> f64 {
        if index >= self.len {
            return 0.0;
        }

        let release_start = self.release_start();
        if (index as i64) < release_start {
            return self.head_level(index);
        }

        let start_level = if release_start >= 0 {
            self.head_level(release_start as usize)
        } else {
            self.sustain_level
        };
        let elapsed = (index as i64 - release_start) as usize;
        let progress = ramp(elapsed, self.release);
        (start_level * (1.0 - progress)).clamp(0.0, 1.0)
    }

    /// Write envelope levels for indices `0..out.len()`.
    pub fn render(&self, out: &mut [f64]) {
        for (i, level) in out.iter_mut().enumerate() {
            *level = self.level_at(i);
        }
    }

    /// Multiply `signal` in place by the envelope.
    pub fn apply(&self, signal: &mut [f64]) {
        for (i, sample) in signal.iter_mut().enumerate() {
            *sample *= self.level_at(i);
        }
    }
}
