//! Lock-free handoff of rendered buffers to an audio thread.
//!
//! The control side owns a [`RingSink`] and pushes commands; the audio side
//! owns a [`PlaybackReceiver`] and pops them. Buffers move through the queue
//! by value, so once pushed the control side can no longer touch them.

use rtrb::{Consumer, Producer, PushError, RingBuffer};
use tracing::debug;

use super::{PlaybackSink, SampleBuffer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackCommand {
    /// Replace the currently playing buffer.
    Play(SampleBuffer),
    Stop,
}

pub trait CommandReceiver {
    fn pop(&mut self) -> Option<PlaybackCommand>;
}

impl CommandReceiver for Consumer<PlaybackCommand> {
    fn pop(&mut self) -> Option<PlaybackCommand> {
        Consumer::pop(self).ok()
    }
}

/// Producer half, used as the drone's playback sink.
///
/// The last free slot is reserved for `Stop`: a `Play` that would fill the
/// queue is dropped instead, so a stop request always reaches the audio
/// thread. With every slot but one taken by `Play`, the tail of the queue can
/// only ever be a `Stop`.
pub struct RingSink {
    tx: Producer<PlaybackCommand>,
    dropped: u64,
}

impl RingSink {
    /// Commands rejected because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn reject(&mut self, stop: bool) {
        self.dropped += 1;
        debug!(dropped = self.dropped, stop, "playback queue full, command dropped");
    }
}

impl PlaybackSink for RingSink {
    fn play(&mut self, buffer: SampleBuffer) {
        if self.tx.slots() <= 1 {
            self.reject(false);
            return;
        }
        if let Err(PushError::Full(_)) = self.tx.push(PlaybackCommand::Play(buffer)) {
            self.reject(false);
        }
    }

    fn stop(&mut self) {
        // full here means the queue already ends in a Stop
        if let Err(PushError::Full(_)) = self.tx.push(PlaybackCommand::Stop) {
            self.reject(true);
        }
    }
}

/// Consumer half. Drain it from the audio callback.
pub struct PlaybackReceiver {
    rx: Consumer<PlaybackCommand>,
}

impl PlaybackReceiver {
    /// Pop every pending command and return the last one; older buffers are
    /// superseded anyway.
    pub fn latest(&mut self) -> Option<PlaybackCommand> {
        let mut latest = None;
        while let Ok(command) = self.rx.pop() {
            latest = Some(command);
        }
        latest
    }

    pub fn pending(&self) -> usize {
        self.rx.slots()
    }
}

impl CommandReceiver for PlaybackReceiver {
    fn pop(&mut self) -> Option<PlaybackCommand> {
        self.rx.pop().ok()
    }
}

/// Create a connected sink/receiver pair holding at most `capacity` commands.
///
/// One slot is kept for `Stop`, so the capacity is raised to at least two.
pub fn ring_sink(capacity: usize) -> (RingSink, PlaybackReceiver) {
    let (tx, rx) = RingBuffer::new(capacity.max(2));
    (RingSink { tx, dropped: 0 }, PlaybackReceiver { rx })
}
