//! Track domain type

use super::{AlbumRef, ArtistRef, TrackId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio track
///
/// Immutable from the playback engine's perspective; the content API owns
/// these records and hands them over fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Track duration
    pub duration: Duration,

    /// Streaming URL for the audio-output primitive
    pub audio_url: String,

    /// Album reference (denormalized)
    pub album: Option<AlbumRef>,

    /// Artist reference (denormalized)
    pub artist: Option<ArtistRef>,

    /// When the track was added to the catalog
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(title: impl Into<String>, audio_url: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            duration: Duration::from_secs(duration_secs),
            audio_url: audio_url.into(),
            album: None,
            artist: None,
            added_at: Utc::now(),
        }
    }
}
