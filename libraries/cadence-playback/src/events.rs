//! Player events
//!
//! Side-effect notifications for the host, drained via
//! `PlayerStore::take_events`. Subscribers get full state snapshots; these
//! events exist for the things a snapshot cannot express: requests to
//! refetch recommendations, failures worth surfacing, transition edges.

use crate::types::TransportState;
use cadence_core::TrackId;
use serde::{Deserialize, Serialize};

/// Events emitted by the player store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Transport state changed (playing, paused, idle)
    StateChanged {
        /// The new transport state
        state: TransportState,
    },

    /// A different track became current
    TrackChanged {
        /// Id of the new current track
        track_id: TrackId,
        /// Id of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// The current track played to its natural end
    TrackFinished {
        /// Id of the finished track
        track_id: TrackId,
    },

    /// A track could not be played and was skipped
    TrackFailed {
        /// Id of the failing track
        track_id: TrackId,
        /// Sink-provided failure description
        message: String,
    },

    /// Queue contents changed (added/removed/reordered/replaced)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// The recommendation key changed; the host should fetch a new batch
    ///
    /// The current key is available from `PlayerStore::recommendation_key`
    /// and must be passed back with the results so stale batches can be
    /// rejected.
    RecommendationsInvalidated,

    /// A new recommendation batch was published
    RecommendationsChanged {
        /// Number of recommendations in the batch
        count: usize,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Periodic position report
    PositionUpdate {
        /// Current playback position
        position_ms: u64,
        /// Total track duration
        duration_ms: u64,
    },
}
