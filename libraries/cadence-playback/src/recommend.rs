//! Recommendation merging
//!
//! Candidates arrive ranked from an external lookup keyed on the live
//! queue. Merging filters out anything the user already has queued or
//! playing, dedupes within the batch, and stamps each survivor with a
//! batch-scoped id so the UI never sees colliding keys.

use crate::types::{RecommendationId, RecommendedTrack};
use cadence_core::{Track, TrackId};
use std::collections::HashSet;

/// Identity of one recommendation computation
///
/// A batch is valid only for the exact `(queue ids, current id)` it was
/// requested for; a key mismatch on delivery means the queue moved on and
/// the batch is stale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecommendationKey {
    queue_ids: Vec<TrackId>,
    current: Option<TrackId>,
}

impl RecommendationKey {
    /// Build a key from the live queue order and current track
    pub fn new(queue_ids: Vec<TrackId>, current: Option<TrackId>) -> Self {
        Self { queue_ids, current }
    }

    /// Queue ids the lookup should be keyed on, in playback order
    pub fn queue_ids(&self) -> &[TrackId] {
        &self.queue_ids
    }

    /// Id of the current track, if any
    pub fn current(&self) -> Option<&TrackId> {
        self.current.as_ref()
    }

    /// Whether there is anything to look up at all
    pub fn is_empty(&self) -> bool {
        self.queue_ids.is_empty() && self.current.is_none()
    }

    fn contains(&self, id: &TrackId) -> bool {
        self.current.as_ref() == Some(id) || self.queue_ids.contains(id)
    }
}

/// Filter ranked candidates against the key they were computed for
///
/// Drops candidates already queued or playing and duplicates within the
/// batch, preserving the ranked order of the survivors. Each survivor is
/// assigned a fresh `RecommendationId`.
pub fn merge_candidates(candidates: Vec<Track>, key: &RecommendationKey) -> Vec<RecommendedTrack> {
    let mut seen: HashSet<TrackId> = HashSet::new();

    candidates
        .into_iter()
        .filter(|track| !key.contains(&track.id) && seen.insert(track.id.clone()))
        .map(|track| RecommendedTrack {
            recommendation_id: RecommendationId::generate(),
            track,
        })
        .collect()
}
