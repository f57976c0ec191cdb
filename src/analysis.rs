//! Frequency-domain view of a rendered buffer.
//!
//! Hann-windowed FFT magnitudes, for spectrum displays next to the
//! amplitude-over-time plot and for checking pitch and filter response.

use std::f32::consts::PI;

use rustfft::{num_complex::Complex, FftPlanner};

use crate::io::SampleBuffer;

/// One-sided magnitude spectrum of a buffer.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Linear magnitude per bin, `0..=len/2`.
    magnitudes: Vec<f32>,
    /// Hz per bin.
    bin_width: f64,
}

impl Spectrum {
    pub fn analyze(buffer: &SampleBuffer) -> Self {
        Self::from_samples(&buffer.to_f32(), f64::from(buffer.sample_rate_hz()))
    }

    pub fn from_samples(samples: &[f32], sample_rate: f64) -> Self {
        let len = samples.len();
        if len == 0 {
            return Self {
                magnitudes: Vec::new(),
                bin_width: 0.0,
            };
        }

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(len);

        // Hann window - reduces spectral leakage
        let mut scratch: Vec<Complex<f32>> = samples
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let w = if len > 1 {
                    0.5 * (1.0 - (2.0 * PI * i as f32 / (len - 1) as f32).cos())
                } else {
                    1.0
                };
                Complex::new(s * w, 0.0)
            })
            .collect();
        fft.process(&mut scratch);

        let magnitudes = scratch[..=len / 2].iter().map(|c| c.norm()).collect();
        Self {
            magnitudes,
            bin_width: sample_rate / len as f64,
        }
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Magnitude of the bin nearest `frequency_hz`, 0.0 outside the range or
    /// for a non-finite frequency.
    pub fn magnitude_at(&self, frequency_hz: f64) -> f32 {
        if self.bin_width <= 0.0 || !frequency_hz.is_finite() || frequency_hz < 0.0 {
            return 0.0;
        }
        let index = (frequency_hz / self.bin_width).round() as usize;
        self.magnitudes.get(index).copied().unwrap_or(0.0)
    }

    /// Centre frequency of the strongest non-DC bin.
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .filter(|(_, m)| **m > 0.0)
            .map(|(i, _)| i as f64 * self.bin_width)
    }

    /// `(frequency_hz, magnitude_db)` pairs for plotting.
    pub fn points_db(&self) -> Vec<(f64, f64)> {
        self.magnitudes
            .iter()
            .enumerate()
            .map(|(i, &m)| {
                let power = f64::from(m * m).max(1e-12);
                (i as f64 * self.bin_width, 10.0 * power.log10())
            })
            .collect()
    }
}
