//! Core types for the playback engine

use cadence_core::Track;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Repeat mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when the queue ends
    Off,

    /// Loop the entire queue
    All,

    /// Loop the current track only
    One,
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// No current track
    Idle,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Batch-scoped identifier for a recommended track
///
/// Regenerated every time a recommendation batch is computed, never reused,
/// so the UI gets a collision-free key even when the same track resurfaces
/// in a later batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationId(String);

impl RecommendationId {
    /// Generate a fresh recommendation ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecommendationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A system-suggested track not yet part of the user's queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedTrack {
    /// Batch-scoped identity for the UI
    pub recommendation_id: RecommendationId,

    /// The suggested track
    pub track: Track,
}

/// Immutable snapshot of the player published to subscribers
///
/// Built once per state transition, after every field has been updated, so
/// observers never see a partially applied mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Currently playing track, if any
    pub current_track: Option<Track>,

    /// The play queue in playback order
    pub queue: Vec<Track>,

    /// Pre-shuffle order (present only while shuffled)
    pub original_queue: Option<Vec<Track>>,

    /// Whether the queue is currently shuffled
    pub is_shuffled: bool,

    /// Whether the transport is playing
    pub is_playing: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Volume level (0-100)
    pub volume: u8,

    /// Whether audio is muted
    pub is_muted: bool,

    /// Current recommendation batch
    pub recommended_tracks: Vec<RecommendedTrack>,
}

/// Configuration for the player store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Initial volume (0-100, default: 80)
    pub volume: u8,

    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 80,
            repeat: RepeatMode::Off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.volume, 80);
        assert_eq!(config.repeat, RepeatMode::Off);
    }

    #[test]
    fn recommendation_ids_are_unique() {
        let a = RecommendationId::generate();
        let b = RecommendationId::generate();
        assert_ne!(a, b);
    }
}
