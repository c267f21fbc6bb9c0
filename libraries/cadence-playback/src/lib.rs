//! Cadence Player - Playback Engine
//!
//! Client-side queue and transport management for the "now playing"
//! experience.
//!
//! This crate provides:
//! - An ordered play queue (append, remove, reorder, replace)
//! - Reversible shuffle (Fisher-Yates with an exact-restore snapshot)
//! - Repeat modes (Off, All, One)
//! - Transport control (play/pause/toggle, next/previous, clamped seek)
//! - Volume control (logarithmic, 0-100%, mute/unmute)
//! - Recommendation merging (key-scoped, deduplicated, batch-stamped)
//! - A snapshot-publishing store for any rendering layer
//!
//! # Architecture
//!
//! `cadence-playback` is completely platform-agnostic. Audio output is an
//! external primitive behind the [`AudioSink`] trait; the engine commands
//! it and consumes its event stream, nothing more. Rendering layers bind
//! through [`PlayerStore::subscribe`] and receive immutable [`PlayerState`]
//! snapshots, so the engine has no dependency on any UI framework.
//!
//! Execution is single-threaded and event-driven. Every command is a
//! synchronous, atomic state transition; stale asynchronous results
//! (recommendation batches, sink events from a previously bound track) are
//! discarded by key and binding comparison rather than by locking.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::Track;
//! use cadence_playback::{NullSink, PlayerConfig, PlayerStore};
//!
//! let mut store = PlayerStore::new(Box::new(NullSink), PlayerConfig::default());
//!
//! let tracks = vec![
//!     Track::new("First", "https://cdn.example.com/1.mp3", 180),
//!     Track::new("Second", "https://cdn.example.com/2.mp3", 200),
//! ];
//!
//! store.subscribe(|state| {
//!     // re-render the now-playing UI from the snapshot
//!     let _ = &state.queue;
//! });
//!
//! store.play(tracks[0].clone(), Some(tracks));
//! store.toggle_shuffle();
//! store.next();
//! ```

mod error;
mod events;
mod queue;
mod recommend;
mod shuffle;
mod sink;
mod store;
mod transport;
pub mod types;
mod volume;

// Public exports
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use recommend::RecommendationKey;
pub use sink::{AudioSink, NullSink, SinkBinding, SinkEvent};
pub use store::{PlayerStore, SubscriptionId};
pub use types::{
    PlayerConfig, PlayerState, RecommendationId, RecommendedTrack, RepeatMode, TransportState,
};
