//! Property-based tests for the player store
//!
//! Uses proptest to verify invariants across many random inputs: multiset
//! preservation under reorder, the shuffle round-trip law, the
//! remove-current transition chain, and recommendation disjointness under
//! arbitrary operation sequences.

use cadence_core::{Track, TrackId};
use cadence_playback::{NullSink, PlayerConfig, PlayerStore};
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Strategies =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,8}",   // id
        "[A-Za-z ]{1,30}", // title
        1u64..600,         // duration (seconds)
    )
        .prop_map(|(id, title, duration_secs)| {
            let mut track = Track::new(title, format!("https://cdn.test/{}.mp3", id), duration_secs);
            track.id = TrackId::new(id);
            track
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 1..30)
}

/// Tracks with ids made unique by position, for properties that reason
/// about which exact entry is current.
fn arbitrary_unique_tracks() -> impl Strategy<Value = Vec<Track>> {
    arbitrary_tracks().prop_map(|mut tracks| {
        for (i, track) in tracks.iter_mut().enumerate() {
            track.id = TrackId::new(format!("{}-{}", track.id, i));
        }
        tracks
    })
}

fn store_playing(tracks: &[Track], start_index: usize) -> PlayerStore {
    let mut store = PlayerStore::new(Box::new(NullSink), PlayerConfig::default());
    store.play(tracks[start_index].clone(), Some(tracks.to_vec()));
    store
}

fn sorted_ids(tracks: &[Track]) -> Vec<String> {
    let mut ids: Vec<String> = tracks.iter().map(|t| t.id.to_string()).collect();
    ids.sort_unstable();
    ids
}

// ===== Properties =====

proptest! {
    /// Reordering never changes the multiset of queued tracks, only their
    /// order, no matter which index pairs arrive (including invalid and
    /// duplicated ones).
    #[test]
    fn reorder_preserves_multiset(
        tracks in arbitrary_tracks(),
        moves in prop::collection::vec((0usize..40, 0usize..40), 1..25)
    ) {
        let mut store = store_playing(&tracks, 0);
        let expected = sorted_ids(&tracks);

        for (old_index, new_index) in moves {
            store.reorder_queue(old_index, new_index);
            prop_assert_eq!(sorted_ids(&store.snapshot().queue), expected.clone());
        }
    }

    /// Enable-then-disable shuffle with no intervening mutation restores
    /// the exact pre-shuffle queue.
    #[test]
    fn shuffle_round_trip_law(
        tracks in arbitrary_tracks(),
        start in 0usize..30
    ) {
        let start_index = start % tracks.len();
        let mut store = store_playing(&tracks, start_index);

        let before = store.snapshot().queue;

        store.toggle_shuffle();
        prop_assert!(store.snapshot().is_shuffled);

        store.toggle_shuffle();
        let after = store.snapshot();
        prop_assert!(!after.is_shuffled);
        prop_assert!(after.original_queue.is_none());
        prop_assert_eq!(after.queue, before);
    }

    /// Removing the currently playing index hands playback to the track
    /// that now occupies that position, else the previous one, else goes
    /// idle.
    #[test]
    fn remove_current_transition_chain(
        tracks in arbitrary_unique_tracks(),
        start in 0usize..30
    ) {
        let start_index = start % tracks.len();
        let mut store = store_playing(&tracks, start_index);

        let before = store.snapshot().queue;
        store.remove_from_queue(start_index);
        let after = store.snapshot();

        if before.len() == 1 {
            prop_assert!(after.current_track.is_none());
            prop_assert!(!after.is_playing);
        } else if start_index + 1 < before.len() {
            prop_assert_eq!(
                after.current_track.unwrap().id,
                before[start_index + 1].id.clone()
            );
        } else {
            prop_assert_eq!(
                after.current_track.unwrap().id,
                before[start_index - 1].id.clone()
            );
        }
    }

    /// For any interleaving of queue and recommendation operations, the
    /// published recommendations never contain an id that is queued or
    /// currently playing, and the shuffle snapshot exists exactly while
    /// shuffled.
    #[test]
    fn recommendations_stay_disjoint_under_any_ops(
        tracks in arbitrary_tracks(),
        pool in arbitrary_tracks(),
        ops in prop::collection::vec((0u8..6, 0usize..40), 1..30)
    ) {
        let mut store = store_playing(&tracks, 0);

        for (op, arg) in ops {
            match op {
                0 => store.add_to_queue(pool[arg % pool.len()].clone()),
                1 => store.remove_from_queue(arg),
                2 => store.next(),
                3 => {
                    let key = store.recommendation_key().clone();
                    store.apply_recommendations(&key, pool.clone());
                }
                4 => store.add_recommended_to_queue(),
                _ => store.toggle_shuffle(),
            }

            let state = store.snapshot();
            prop_assert_eq!(state.original_queue.is_some(), state.is_shuffled);

            let queue_ids: HashSet<&str> =
                state.queue.iter().map(|t| t.id.as_str()).collect();
            for rec in &state.recommended_tracks {
                prop_assert!(!queue_ids.contains(rec.track.id.as_str()));
                if let Some(current) = &state.current_track {
                    prop_assert!(rec.track.id != current.id);
                }
            }
        }
    }
}
