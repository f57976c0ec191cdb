use std::time::Duration;

use tracing::debug;

use super::ToneEngine;
use crate::error::{ToneError, ToneResult};
use crate::io::{PlaybackSink, SampleBuffer};
use crate::params::{RenderConfig, ToneParameters};

/*
Drone
=====

A held tone that is re-rendered on a fixed timer while it is on.

    ┌─────┐  activate   ┌────┐
    │ Off │ ──────────→ │ On │ ──┐
    └─────┘             └────┘   │ tick: re-read parameters,
       ↑                  │  ↑   │       render, replace buffer
       │    deactivate    │  └───┘
       └──────────────────┘

Off is both the initial and the terminal state. The drone itself owns no
timer: whoever drives it (an event loop, a test) calls `tick` every
`tick_interval()`. Ticking while Off does nothing.

Every tick produces a new buffer which is moved into the sink. The drone keeps
its own copy for display through `last_buffer()`; that copy is dropped on
deactivate.
*/

pub const MIN_TICK_MS: u32 = 1;
pub const MAX_TICK_MS: u32 = 300;
pub const DEFAULT_TICK_MS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DroneState {
    Off,
    On,
}

/// Supplies the current parameter snapshot, e.g. by reading UI controls.
pub trait ParameterSource {
    fn current(&self) -> ToneParameters;
}

impl<F: Fn() -> ToneParameters> ParameterSource for F {
    fn current(&self) -> ToneParameters {
        self()
    }
}

impl ParameterSource for ToneParameters {
    fn current(&self) -> ToneParameters {
        *self
    }
}

pub struct Drone<S: PlaybackSink> {
    engine: ToneEngine,
    config: RenderConfig,
    sink: S,
    state: DroneState,
    tick_interval: Duration,
    last_buffer: Option<SampleBuffer>,
}

impl<S: PlaybackSink> Drone<S> {
    /// Validates `config` up front so a running drone cannot hit a
    /// configuration error mid-tick.
    pub fn new(engine: ToneEngine, config: RenderConfig, sink: S) -> ToneResult<Self> {
        config.buffer_len()?;
        Ok(Self {
            engine,
            config,
            sink,
            state: DroneState::Off,
            tick_interval: Duration::from_millis(u64::from(DEFAULT_TICK_MS)),
            last_buffer: None,
        })
    }

    pub fn with_tick_interval(mut self, interval_ms: u32) -> ToneResult<Self> {
        if !(MIN_TICK_MS..=MAX_TICK_MS).contains(&interval_ms) {
            return Err(ToneError::InvalidTickInterval { interval_ms });
        }
        self.tick_interval = Duration::from_millis(u64::from(interval_ms));
        Ok(self)
    }

    pub fn state(&self) -> DroneState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == DroneState::On
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Most recent buffer handed to the sink, `None` while off.
    pub fn last_buffer(&self) -> Option<&SampleBuffer> {
        self.last_buffer.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn render_and_play(&mut self, params: &ToneParameters) -> ToneResult<()> {
        let buffer = self.engine.render(params, &self.config)?;
        self.last_buffer = Some(buffer.clone());
        self.sink.play(buffer);
        Ok(())
    }

    /// Off → On. Renders the first buffer and starts playback. Activating an
    /// already running drone behaves like a tick.
    pub fn activate(&mut self, params: &ToneParameters) -> ToneResult<()> {
        self.render_and_play(params)?;
        if self.state == DroneState::Off {
            debug!(waveform = %params.waveform, frequency_hz = params.frequency_hz, "drone on");
            self.state = DroneState::On;
        }
        Ok(())
    }

    /// On → Off. Stops the sink and clears the display buffer.
    pub fn deactivate(&mut self) {
        if self.state == DroneState::Off {
            return;
        }
        self.sink.stop();
        self.last_buffer = None;
        self.state = DroneState::Off;
        debug!("drone off");
    }

    /// On → On with fresh parameters. Returns whether a buffer was rendered.
    pub fn tick(&mut self, params: &ToneParameters) -> ToneResult<bool> {
        if self.state == DroneState::Off {
            return Ok(false);
        }
        self.render_and_play(params)?;
        Ok(true)
    }

    /// Tick using whatever `source` currently reports.
    pub fn tick_from(&mut self, source: &impl ParameterSource) -> ToneResult<bool> {
        let params = source.current();
        self.tick(&params)
    }

    /// The space-bar behaviour: switch on with the current parameters, or off.
    pub fn toggle(&mut self, source: &impl ParameterSource) -> ToneResult<DroneState> {
        match self.state {
            DroneState::Off => self.activate(&source.current())?,
            DroneState::On => self.deactivate(),
        }
        Ok(self.state)
    }
}
