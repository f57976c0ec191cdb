//! Error types for tone rendering.

use thiserror::Error;

/// Result type for tone operations.
pub type ToneResult<T> = Result<T, ToneError>;

/// Configuration errors. Everything else the engine meets at render time is
/// corrected silently (saturation, clamping, silence).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToneError {
    /// A render was requested with a duration of zero milliseconds.
    #[error("duration must be greater than zero milliseconds")]
    ZeroDuration,

    /// Sample rate of zero.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The rejected sample rate.
        rate: u32,
    },

    /// Sample rate and duration round to an empty buffer.
    #[error("{duration_ms} ms at {sample_rate_hz} Hz rounds to zero samples")]
    EmptyBuffer {
        /// Configured sample rate.
        sample_rate_hz: u32,
        /// Configured duration.
        duration_ms: u32,
    },

    /// Waveform name not in {Sine, Triangle, Sawtooth, Square}.
    #[error("unknown waveform kind: '{name}'")]
    UnknownWaveform {
        /// The rejected name.
        name: String,
    },

    /// Note name outside C..B.
    #[error("unknown note: '{name}'")]
    UnknownNote {
        /// The rejected name.
        name: String,
    },

    /// Drone tick interval outside 1..=300 ms.
    #[error("tick interval must be within 1..=300 ms, got {interval_ms} ms")]
    InvalidTickInterval {
        /// The rejected interval.
        interval_ms: u32,
    },
}
