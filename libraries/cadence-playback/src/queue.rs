//! Play queue with positional invariants
//!
//! A single ordered queue: insertion order is playback order, position is
//! the index. The currently playing entry is tracked logically so it
//! survives reorders and shuffles, and the pre-shuffle order is kept as a
//! snapshot for exact restoration.

use crate::shuffle::shuffle_tracks;
use cadence_core::{Track, TrackId};

/// Ordered play queue
///
/// Out-of-range indices are silently ignored on every operation; the queue
/// never panics or errors on bad positional input.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in playback order
    tracks: Vec<Track>,

    /// Order before shuffle (present only while shuffled)
    original: Option<Vec<Track>>,

    /// Index of the currently playing entry
    current: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale
    ///
    /// `start` becomes the current track if its id is present in `tracks`,
    /// otherwise it is prepended at index 0. Queue order equals input order,
    /// so any shuffle snapshot is discarded.
    pub fn set_queue(&mut self, mut tracks: Vec<Track>, start: Track) {
        match tracks.iter().position(|t| t.id == start.id) {
            Some(pos) => self.current = Some(pos),
            None => {
                tracks.insert(0, start);
                self.current = Some(0);
            }
        }
        self.tracks = tracks;
        self.original = None;
    }

    /// Append a track at the end
    ///
    /// No uniqueness constraint: a track may legitimately appear twice.
    /// While shuffled, the track is appended to the snapshot as well so
    /// membership stays consistent across a later restore.
    pub fn push(&mut self, track: Track) {
        if let Some(original) = &mut self.original {
            original.push(track.clone());
        }
        self.tracks.push(track);
    }

    /// Remove the track at `index`
    ///
    /// Returns `None` (and changes nothing) when the index is out of range.
    /// Removing the current entry moves current to the new occupant of that
    /// index, else to the new last track, else clears it entirely.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }

        let track = self.tracks.remove(index);

        // Keep the snapshot's membership in sync
        if let Some(original) = &mut self.original {
            if let Some(pos) = original.iter().position(|t| t.id == track.id) {
                original.remove(pos);
            }
        }

        self.current = match self.current {
            Some(cur) if index < cur => Some(cur - 1),
            Some(cur) if index == cur => {
                if self.tracks.is_empty() {
                    None
                } else if cur < self.tracks.len() {
                    Some(cur)
                } else {
                    Some(self.tracks.len() - 1)
                }
            }
            other => other,
        };

        Some(track)
    }

    /// Move the track at `old_index` to `new_index`
    ///
    /// Returns whether the reorder was applied. Invalid indices are ignored.
    /// The logical current entry is transformed through the permutation, so
    /// its "current" status survives even when the same id appears twice.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> bool {
        let len = self.tracks.len();
        if old_index >= len || new_index >= len {
            return false;
        }
        if old_index == new_index {
            return true;
        }

        let track = self.tracks.remove(old_index);
        self.tracks.insert(new_index, track);

        if let Some(cur) = self.current {
            self.current = Some(if cur == old_index {
                new_index
            } else if old_index < cur && new_index >= cur {
                cur - 1
            } else if old_index > cur && new_index <= cur {
                cur + 1
            } else {
                cur
            });
        }

        true
    }

    /// Empty the queue, the shuffle snapshot, and the current entry
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.original = None;
        self.current = None;
    }

    /// Snapshot the live order and shuffle the queue
    ///
    /// The current track is pinned to index 0 of the shuffled order; the
    /// snapshot is taken first so the disable round-trip is exact.
    pub fn enable_shuffle(&mut self) {
        if self.original.is_some() {
            return;
        }

        self.original = Some(self.tracks.clone());

        let current_id = self.current.map(|i| self.tracks[i].id.clone());
        shuffle_tracks(&mut self.tracks);

        if let Some(id) = current_id {
            if let Some(pos) = self.tracks.iter().position(|t| t.id == id) {
                let track = self.tracks.remove(pos);
                self.tracks.insert(0, track);
            }
            self.current = Some(0);
        }
    }

    /// Restore the pre-shuffle order exactly and drop the snapshot
    pub fn disable_shuffle(&mut self) {
        let Some(original) = self.original.take() else {
            return;
        };

        let current_id = self.current.map(|i| self.tracks[i].id.clone());
        self.tracks = original;
        self.current = current_id.and_then(|id| self.tracks.iter().position(|t| t.id == id));
    }

    /// Whether the queue is currently shuffled
    pub fn is_shuffled(&self) -> bool {
        self.original.is_some()
    }

    /// Make the track at `index` current
    ///
    /// Returns the selected track, or `None` (no change) when out of range.
    pub fn select(&mut self, index: usize) -> Option<&Track> {
        if index >= self.tracks.len() {
            return None;
        }
        self.current = Some(index);
        Some(&self.tracks[index])
    }

    /// Clear the current entry (queue contents are untouched)
    pub fn deselect(&mut self) {
        self.current = None;
    }

    /// The currently playing track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.map(|i| &self.tracks[i])
    }

    /// Index of the currently playing track
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// All tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Pre-shuffle order, while shuffled
    pub fn original(&self) -> Option<&[Track]> {
        self.original.as_deref()
    }

    /// Ids of all queued tracks, in playback order
    pub fn ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
