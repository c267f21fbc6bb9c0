//! Audio-output primitive boundary
//!
//! Abstracts the platform's media element (web audio element, native
//! backend) behind a command trait and an event stream. The engine only
//! commands the sink; decoding, buffering, and hardware output live on the
//! other side of this boundary.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Platform-agnostic audio output
///
/// Implementors wrap whatever actually plays audio on the host. Commands
/// are fire-and-forget except `play`, which can fail synchronously when the
/// source cannot be started at all; everything else (decode failures,
/// network stalls) is reported asynchronously via [`SinkEvent`].
pub trait AudioSink {
    /// Point the sink at a new source URL
    ///
    /// Implicitly stops playback of the previous source; events for the
    /// previous source must not be delivered after `load` returns.
    fn load(&mut self, url: &str);

    /// Begin or resume playback of the loaded source
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping position
    fn pause(&mut self);

    /// Seek to a position within the loaded source
    fn seek(&mut self, position: Duration);

    /// Set linear output gain in `[0.0, 1.0]`
    fn set_gain(&mut self, gain: f32);

    /// Mute or unmute independently of gain
    fn set_muted(&mut self, muted: bool);
}

/// Token identifying one `load`-to-`load` lifetime of the sink
///
/// The store stamps every bind with a fresh binding and discards incoming
/// events carrying an older one, so a previous track's event stream is dead
/// the moment a new track is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SinkBinding(u64);

impl SinkBinding {
    pub(crate) fn new(seq: u64) -> Self {
        Self(seq)
    }
}

/// Events emitted by the audio-output primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SinkEvent {
    /// Periodic position report for the playing source
    TimeUpdate {
        /// Elapsed playback time
        position: Duration,
    },

    /// The loaded source played to its end
    Ended,

    /// The source failed to load or decode
    Error {
        /// Host-provided failure description
        message: String,
    },
}

/// Sink that discards every command
///
/// Useful for headless hosts and for driving the engine in tests where no
/// audio output exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl AudioSink for NullSink {
    fn load(&mut self, _url: &str) {}

    fn play(&mut self) -> Result<()> {
        Ok(())
    }

    fn pause(&mut self) {}

    fn seek(&mut self, _position: Duration) {}

    fn set_gain(&mut self, _gain: f32) {}

    fn set_muted(&mut self, _muted: bool) {}
}
