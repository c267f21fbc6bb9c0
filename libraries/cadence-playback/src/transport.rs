//! Transport binding to the audio-output primitive
//!
//! Owns the sink and the lifetime of its per-track binding: loading a
//! track invalidates the previous binding's event stream, releasing drops
//! the binding entirely. Position and duration bookkeeping for the bound
//! track lives here so seek clamping and the previous-button threshold
//! never consult the sink.

use crate::error::{PlayerError, Result};
use crate::sink::{AudioSink, SinkBinding};
use cadence_core::Track;
use std::time::Duration;
use tracing::debug;

/// Transport over one audio sink
pub struct Transport {
    sink: Box<dyn AudioSink>,
    binding: Option<SinkBinding>,
    seq: u64,
    position: Duration,
    duration: Duration,
}

impl Transport {
    /// Create a transport over the given sink
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            binding: None,
            seq: 0,
            position: Duration::ZERO,
            duration: Duration::ZERO,
        }
    }

    /// Bind the sink to a track's audio source
    ///
    /// Any previous binding is invalidated: its events will no longer be
    /// accepted. Returns the fresh binding for the host's event routing.
    pub fn bind(&mut self, track: &Track) -> SinkBinding {
        self.seq += 1;
        let binding = SinkBinding::new(self.seq);
        self.binding = Some(binding);
        self.position = Duration::ZERO;
        self.duration = track.duration;
        self.sink.load(&track.audio_url);
        debug!(track_id = %track.id, "bound audio sink");
        binding
    }

    /// Drop the current binding and stop output
    ///
    /// Called on pause-to-idle transitions and teardown so no stale events
    /// survive past the bound track's lifetime.
    pub fn release(&mut self) {
        if self.binding.take().is_some() {
            self.sink.pause();
        }
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
    }

    /// Whether `binding` is the live one
    pub fn accepts(&self, binding: SinkBinding) -> bool {
        self.binding == Some(binding)
    }

    /// Whether a track is currently bound
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// The live binding, if a track is bound
    pub fn binding(&self) -> Option<SinkBinding> {
        self.binding
    }

    /// Start or resume playback of the bound track
    pub fn play(&mut self) -> Result<()> {
        if self.binding.is_none() {
            return Err(PlayerError::NoTrackLoaded);
        }
        self.sink.play()
    }

    /// Pause playback, keeping position
    pub fn pause(&mut self) {
        self.sink.pause();
    }

    /// Seek within the bound track, clamped into `[0, duration]`
    ///
    /// Returns the clamped position actually commanded.
    pub fn seek(&mut self, position: Duration) -> Duration {
        let clamped = position.min(self.duration);
        self.position = clamped;
        self.sink.seek(clamped);
        clamped
    }

    /// Record a position report from the sink
    pub fn record_position(&mut self, position: Duration) {
        self.position = position.min(self.duration);
    }

    /// Elapsed playback time of the bound track
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Duration of the bound track
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Command the sink's linear gain
    pub fn set_gain(&mut self, gain: f32) {
        self.sink.set_gain(gain);
    }

    /// Command the sink's mute state
    pub fn set_muted(&mut self, muted: bool) {
        self.sink.set_muted(muted);
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("binding", &self.binding)
            .field("position", &self.position)
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}
