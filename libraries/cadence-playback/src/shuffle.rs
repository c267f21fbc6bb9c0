//! Shuffle algorithm for queue randomization

use cadence_core::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle tracks in place using the Fisher-Yates algorithm
///
/// Each track has equal probability of appearing at any position. The
/// caller is responsible for snapshotting the original order first if the
/// permutation has to be reversible.
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    tracks.shuffle(&mut rng);
}
