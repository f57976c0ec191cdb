use std::f64::consts::FRAC_PI_2;

use tracing::{debug, trace};

/*
One-Pole Low-Pass
=================

A first-order Butterworth low-pass, designed by bilinear transform with
frequency prewarping. The analog prototype is

    H(s) = ωc / (s + ωc)

Substituting s = (1 - z⁻¹) / (1 + z⁻¹) with the prewarped corner
K = tan(π · Wn / 2) gives

            K (1 + z⁻¹)
    H(z) = ─────────────────────
           (1 + K) + (K - 1) z⁻¹

so, normalised to a[0] = 1:

    b = [ K/(1+K),  K/(1+K) ]
    a = [ 1,        (K-1)/(K+1) ]

where Wn = cutoff / nyquist. The filter runs as the direct-form difference
equation

    y[n] = b0·x[n] + b1·x[n-1] - a1·y[n-1]

with x[-1] = y[-1] = 0 for every call: there is no memory between renders.

| Wn        | K        | behaviour                         |
| --------- | -------- | --------------------------------- |
| → 0       | → 0      | b → 0, a1 → -1: passes only DC    |
| 0.5       | 1        | b = 0.5, a1 = 0: two-tap average  |
| → 1       | → ∞      | b → 1, a1 → 1: H(z) → 1           |

Wn outside (0, 1) is clamped just inside the interval. A cutoff above Nyquist
therefore degrades to a near pass-through rather than an error.

Filtering is not idempotent: running a filtered buffer through the same
filter attenuates it again.
*/

/// Smallest distance kept between the normalised cutoff and 0 or 1.
const CUTOFF_EPSILON: f64 = 1e-6;

/// `(b, a)` coefficient pairs of a first-order IIR filter, `a[0] == 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCoefficients {
    pub b: [f64; 2],
    pub a: [f64; 2],
}

impl FilterCoefficients {
    /// Butterworth order-1 low-pass for `cutoff_hz` at `sample_rate_hz`.
    ///
    /// Pure: the same inputs always produce the same coefficients, and nothing
    /// is cached, so a sample-rate change can never leave stale values behind.
    pub fn lowpass(cutoff_hz: f64, sample_rate_hz: f64) -> Self {
        let nyquist = 0.5 * sample_rate_hz;
        let requested = cutoff_hz / nyquist;
        let normalized = normalize_cutoff(requested);
        if normalized != requested {
            debug!(
                cutoff_hz,
                sample_rate_hz, normalized, "cutoff outside (0, nyquist), clamped"
            );
        }

        let k = (FRAC_PI_2 * normalized).tan();
        let gain = k / (1.0 + k);
        let coefficients = Self {
            b: [gain, gain],
            a: [1.0, (k - 1.0) / (k + 1.0)],
        };
        trace!(?coefficients, cutoff_hz, sample_rate_hz, "derived low-pass");
        coefficients
    }
}

fn normalize_cutoff(normalized: f64) -> f64 {
    if normalized.is_nan() {
        return 1.0 - CUTOFF_EPSILON;
    }
    normalized.clamp(CUTOFF_EPSILON, 1.0 - CUTOFF_EPSILON)
}

/// First-order low-pass over a whole buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnePoleLowPass {
    pub cutoff_hz: f64,
}

impl OnePoleLowPass {
    pub fn new(cutoff_hz: f64) -> Self {
        Self { cutoff_hz }
    }

    pub fn set_cutoff(&mut self, cutoff_hz: f64) {
        self.cutoff_hz = cutoff_hz;
    }

    /// Coefficients for this cutoff at `sample_rate_hz`, derived on every call.
    pub fn coefficients(&self, sample_rate_hz: f64) -> FilterCoefficients {
        FilterCoefficients::lowpass(self.cutoff_hz, sample_rate_hz)
    }

    /// Filter `buffer` in place, starting from zero filter memory.
    pub fn render(&self, buffer: &mut [f64], sample_rate_hz: f64) {
        apply(&self.coefficients(sample_rate_hz), buffer);
    }
}

/// Run the direct-form difference equation over `buffer` in place.
pub fn apply(coefficients: &FilterCoefficients, buffer: &mut [f64]) {
    let FilterCoefficients { b, a } = *coefficients;
    let mut x1 = 0.0;
    let mut y1 = 0.0;

    for sample in buffer.iter_mut() {
        let x0 = *sample;
        let y0 = b[0] * x0 + b[1] * x1 - a[1] * y1;
        x1 = x0;
        y1 = y0;
        *sample = y0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Oscillator;

    const SAMPLE_RATE: f64 = 48_000.0;

    fn sine(freq: f64, len: usize) -> Vec<f64> {
        let mut buffer = vec![0.0; len];
        Oscillator::sine().frequency(freq).render(&mut buffer, SAMPLE_RATE);
        buffer
    }

    fn peak_after_transient(buffer: &[f64]) -> f64 {
        let skip = buffer.len().min(64);
        buffer[skip..].iter().fold(0.0f64, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn half_nyquist_is_two_tap_average() {
        let c = FilterCoefficients::lowpass(12_000.0, SAMPLE_RATE);
        assert!((c.b[0] - 0.5).abs() < 1e-12);
        assert!((c.b[1] - 0.5).abs() < 1e-12);
        assert_eq!(c.a[0], 1.0);
        assert!(c.a[1].abs() < 1e-12);
    }

    #[test]
    fn unity_dc_gain() {
        let c = FilterCoefficients::lowpass(1_000.0, SAMPLE_RATE);
        let dc_gain = (c.b[0] + c.b[1]) / (c.a[0] + c.a[1]);
        assert!((dc_gain - 1.0).abs() < 1e-9);

        let mut buffer = vec![1.0; 2_048];
        apply(&c, &mut buffer);
        assert!((buffer[2_047] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coefficients_follow_sample_rate() {
        let filter = OnePoleLowPass::new(2_000.0);
        assert_ne!(filter.coefficients(44_100.0), filter.coefficients(48_000.0));
        assert_eq!(
            filter.coefficients(44_100.0),
            FilterCoefficients::lowpass(2_000.0, 44_100.0)
        );
    }

    #[test]
    fn cutoff_above_nyquist_is_clamped_to_pass_through() {
        let c = FilterCoefficients::lowpass(40_000.0, SAMPLE_RATE);
        assert!(c.b.iter().all(|b| b.is_finite()));
        assert!((c.b[0] - 1.0).abs() < 1e-5);
        assert!((c.a[1] - 1.0).abs() < 1e-5);

        let mut buffer = sine(3_000.0, 512);
        let original = buffer.clone();
        apply(&c, &mut buffer);
        for (filtered, dry) in buffer.iter().zip(&original) {
            assert!((filtered - dry).abs() < 1e-3);
        }
    }

    #[test]
    fn non_positive_cutoff_stays_finite() {
        for cutoff in [0.0, -100.0, f64::NAN] {
            let c = FilterCoefficients::lowpass(cutoff, SAMPLE_RATE);
            assert!(c.b.iter().chain(&c.a).all(|v| v.is_finite()), "{cutoff}");
        }
    }

    #[test]
    fn attenuates_above_cutoff() {
        let filter = OnePoleLowPass::new(500.0);

        let mut low = sine(100.0, 4_800);
        filter.render(&mut low, SAMPLE_RATE);
        let mut high = sine(10_000.0, 4_800);
        filter.render(&mut high, SAMPLE_RATE);

        let pass = peak_after_transient(&low);
        let stop = peak_after_transient(&high);
        assert!(pass > 0.9, "passband peak {pass}");
        assert!(stop < 0.1, "stopband peak {stop}");
    }

    #[test]
    fn refiltering_changes_the_signal() {
        let filter = OnePoleLowPass::new(2_000.0);
        let mut once = sine(3_000.0, 1_024);
        filter.render(&mut once, SAMPLE_RATE);
        let mut twice = once.clone();
        filter.render(&mut twice, SAMPLE_RATE);

        assert!(peak_after_transient(&twice) < peak_after_transient(&once));
    }

    #[test]
    fn each_render_starts_from_zero_memory() {
        let filter = OnePoleLowPass::new(1_000.0);
        let mut first = vec![1.0; 16];
        let mut second = vec![1.0; 16];
        filter.render(&mut first, SAMPLE_RATE);
        filter.render(&mut second, SAMPLE_RATE);
        assert_eq!(first, second);
    }
}
