//! Tone rendering: oscillator → envelope → 16-bit quantise → low-pass.

pub mod drone;

use tracing::debug;

use crate::dsp::filter::OnePoleLowPass;
use crate::dsp::oscillator::{Oscillator, TriangleMode};
use crate::error::ToneResult;
use crate::io::{to_i16, SampleBuffer, FULL_SCALE};
use crate::params::{EngineOptions, RenderConfig, ToneParameters};

/// Renders one buffer per call from a parameter snapshot.
///
/// The engine holds only its options. Coefficients, envelope layout and the
/// output buffer are all rebuilt from the arguments of each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToneEngine {
    options: EngineOptions,
}

impl ToneEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn with_filter(mut self, enabled: bool) -> Self {
        self.options.filter_enabled = enabled;
        self
    }

    pub fn with_triangle(mut self, mode: TriangleMode) -> Self {
        self.options.triangle = mode;
        self
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    fn oscillator(&self, params: &ToneParameters) -> Oscillator {
        Oscillator::new(params.waveform)
            .amplitude(params.amplitude)
            .frequency(params.frequency_hz)
            .pulse_width(params.pulse_width)
            .triangle_mode(self.options.triangle)
    }

    /// Oscillator output scaled to full scale, before envelope, quantisation
    /// or filtering.
    pub fn render_raw(
        &self,
        params: &ToneParameters,
        config: &RenderConfig,
    ) -> ToneResult<Vec<f64>> {
        let len = config.buffer_len()?;
        let osc = self.oscillator(params);
        if !osc.is_audible() {
            debug!(
                frequency_hz = params.frequency_hz,
                "no audible frequency, rendering silence"
            );
        }

        let mut signal = vec![0.0; len];
        osc.render(&mut signal, config.sample_rate());
        for sample in signal.iter_mut() {
            *sample *= FULL_SCALE;
        }
        Ok(signal)
    }

    /// Oscillator and envelope, quantised to 16 bits. This is exactly what the
    /// filter stage receives.
    fn render_shaped(
        &self,
        params: &ToneParameters,
        config: &RenderConfig,
    ) -> ToneResult<Vec<f64>> {
        let mut signal = self.render_raw(params, config)?;

        let layout = params.envelope.layout(signal.len(), config.sample_rate());
        if layout.is_truncated() {
            debug!(
                len = layout.len(),
                attack = layout.attack_samples(),
                decay = layout.decay_samples(),
                release = layout.release_samples(),
                "envelope longer than buffer, segments truncated"
            );
        }
        layout.apply(&mut signal);

        for sample in signal.iter_mut() {
            *sample = f64::from(to_i16(*sample));
        }
        Ok(signal)
    }

    /// Oscillator and envelope only; the filter is never applied.
    pub fn render_unfiltered(
        &self,
        params: &ToneParameters,
        config: &RenderConfig,
    ) -> ToneResult<SampleBuffer> {
        let signal = self.render_shaped(params, config)?;
        Ok(SampleBuffer::from_scaled(&signal, config.sample_rate_hz))
    }

    /// Run the full pipeline.
    ///
    /// Fails only on a configuration that cannot produce a buffer (zero
    /// duration, zero sample rate, or a combination that rounds to zero
    /// samples). Everything else is corrected silently.
    pub fn render(
        &self,
        params: &ToneParameters,
        config: &RenderConfig,
    ) -> ToneResult<SampleBuffer> {
        let mut signal = self.render_shaped(params, config)?;

        if self.options.filter_enabled {
            OnePoleLowPass::new(params.cutoff_hz).render(&mut signal, config.sample_rate());
        }

        debug!(
            len = signal.len(),
            waveform = %params.waveform,
            frequency_hz = params.frequency_hz,
            filter = self.options.filter_enabled,
            "rendered tone"
        );
        Ok(SampleBuffer::from_scaled(&signal, config.sample_rate_hz))
    }
}

/// Render with default options (filter on, verbatim triangle).
pub fn render(params: &ToneParameters, config: &RenderConfig) -> ToneResult<SampleBuffer> {
    ToneEngine::default().render(params, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::Waveform;
    use crate::error::ToneError;

    fn config_1s() -> RenderConfig {
        RenderConfig::new(44_100, 1_000)
    }

    #[test]
    fn raw_sine_reaches_full_scale() {
        let params = ToneParameters::new(Waveform::Sine, 440.0).amplitude(1.0);
        let raw = ToneEngine::default().render_raw(&params, &config_1s()).unwrap();

        assert_eq!(raw.len(), 44_100);
        assert_eq!(raw[0], 0.0);
        // t = 1 / (4 * 440) lands between samples 25 and 26
        let peak = raw[25].max(raw[26]);
        assert!((peak - FULL_SCALE).abs() < 1.0, "peak={peak}");
    }

    #[test]
    fn bypass_matches_unfiltered_render() {
        let engine = ToneEngine::default().with_filter(false);
        let params = ToneParameters::new(Waveform::Sawtooth, 330.0)
            .cutoff(200.0)
            .adsr(5.0, 10.0, 0.6, 20.0);
        let config = RenderConfig::new(48_000, 80);

        let bypassed = engine.render(&params, &config).unwrap();
        let shaped = engine.render_unfiltered(&params, &config).unwrap();
        assert_eq!(bypassed, shaped);

        let filtered = ToneEngine::default().render(&params, &config).unwrap();
        assert_ne!(filtered, shaped);
    }

    #[test]
    fn silence_for_missing_note() {
        let params = ToneParameters::new(Waveform::Square, 0.0).amplitude(1.0);
        let buffer = render(&params, &RenderConfig::default()).unwrap();
        assert_eq!(buffer.len(), 4_410);
        assert_eq!(buffer.peak(), 0);
    }

    #[test]
    fn zero_duration_is_an_error() {
        let params = ToneParameters::default();
        assert_eq!(
            render(&params, &RenderConfig::new(44_100, 0)),
            Err(ToneError::ZeroDuration)
        );
    }

    #[test]
    fn verbatim_triangle_saturates_instead_of_wrapping() {
        let params = ToneParameters::new(Waveform::Triangle, 440.0).amplitude(1.0);
        let buffer = ToneEngine::default()
            .with_filter(false)
            .render(&params, &RenderConfig::new(44_100, 100))
            .unwrap();

        // past the first period the formula leaves [-1, 1] and pins to +full scale
        let tail = &buffer.as_slice()[1_000..];
        assert!(tail.iter().all(|&s| s == i16::MAX));
    }

    #[test]
    fn wrapped_triangle_stays_periodic() {
        let params = ToneParameters::new(Waveform::Triangle, 441.0).amplitude(1.0);
        let buffer = ToneEngine::default()
            .with_filter(false)
            .with_triangle(TriangleMode::Wrapped)
            .render(&params, &RenderConfig::new(44_100, 100))
            .unwrap();

        let samples = buffer.as_slice();
        assert!(samples.iter().any(|&s| s < -30_000));
        for i in 0..(samples.len() - 100) {
            assert!((samples[i] as i32 - samples[i + 100] as i32).abs() <= 1);
        }
    }
}
