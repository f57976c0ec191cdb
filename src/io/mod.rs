// Purpose - output boundary: rendered PCM and the sink it is handed to

#[cfg(feature = "rtrb")]
pub mod ring;

/// Largest positive 16-bit sample; full-scale for amplitude 1.0.
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Mono signed 16-bit PCM produced by one render call.
///
/// Owned by whoever called render. The engine never sees it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate_hz: u32,
}

impl SampleBuffer {
    pub fn new(samples: Vec<i16>, sample_rate_hz: u32) -> Self {
        Self {
            samples,
            sample_rate_hz,
        }
    }

    /// Saturating conversion from full-scale floating samples. Values are
    /// truncated toward zero, NaN becomes 0.
    pub fn from_scaled(scaled: &[f64], sample_rate_hz: u32) -> Self {
        let samples = scaled.iter().map(|&s| to_i16(s)).collect();
        Self::new(samples, sample_rate_hz)
    }

    pub fn as_slice(&self) -> &[i16] {
        &self.samples
    }

    pub fn into_inner(self) -> Vec<i16> {
        self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate_hz)
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples
            .iter()
            .map(|s| s.unsigned_abs())
            .max()
            .unwrap_or(0)
    }

    /// Raw little-endian bytes, mono, two bytes per sample.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    /// Samples normalised to -1.0..=1.0.
    pub fn to_f32(&self) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| f32::from(s) / i16::MAX as f32)
            .collect()
    }

    /// `(time_secs, sample)` pairs for an amplitude-over-time plot.
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        let sample_rate = f64::from(self.sample_rate_hz);
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &s)| (i as f64 / sample_rate, f64::from(s)))
            .collect()
    }
}

impl AsRef<[i16]> for SampleBuffer {
    fn as_ref(&self) -> &[i16] {
        &self.samples
    }
}

#[inline]
pub(crate) fn to_i16(sample: f64) -> i16 {
    // `as` saturates and maps NaN to 0
    sample.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Destination for rendered buffers, e.g. an audio device wrapper.
///
/// `play` replaces whatever was playing; `stop` silences the sink.
pub trait PlaybackSink {
    fn play(&mut self, buffer: SampleBuffer);

    fn stop(&mut self);
}

/// Sink that drops everything. Useful for driving a drone without audio.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl PlaybackSink for NullSink {
    fn play(&mut self, _buffer: SampleBuffer) {}

    fn stop(&mut self) {}
}

impl<S: PlaybackSink + ?Sized> PlaybackSink for Box<S> {
    fn play(&mut self, buffer: SampleBuffer) {
        (**self).play(buffer)
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}
