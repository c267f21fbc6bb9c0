//! Player store - core orchestration
//!
//! Composition root owning every piece of player state: the queue, the
//! transport, volume, repeat mode, and the recommendation batch. Each
//! command is a synchronous, atomic state transition; subscribers observe
//! only completed transitions via immutable snapshots, and host-side
//! effects (recommendation refetches, failures) are drained as events.

use crate::error::PlayerError;
use crate::events::PlayerEvent;
use crate::queue::Queue;
use crate::recommend::{merge_candidates, RecommendationKey};
use crate::sink::{AudioSink, SinkBinding, SinkEvent};
use crate::transport::Transport;
use crate::types::{PlayerConfig, PlayerState, RecommendedTrack, RepeatMode, TransportState};
use crate::volume::Volume;
use cadence_core::{Track, TrackId};
use std::time::Duration;
use tracing::{debug, warn};

/// Elapsed time beyond which `previous` restarts the current track instead
/// of moving back through the queue
const PREVIOUS_RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Handle to a registered state subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PlayerState)>;

/// Central player state management
///
/// Owns the play queue, the transport over the audio sink, volume/mute,
/// repeat mode, and the current recommendation batch. All mutation happens
/// through the command methods; out-of-range indices and commands issued
/// while idle are silently ignored so the UI layer never has to handle
/// errors from routine interaction.
pub struct PlayerStore {
    // State
    state: TransportState,
    queue: Queue,
    repeat: RepeatMode,
    volume: Volume,

    // Recommendations
    recommended: Vec<RecommendedTrack>,
    recommendation_key: RecommendationKey,

    // Audio output
    transport: Transport,

    // Observers
    subscribers: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
    pending_events: Vec<PlayerEvent>,

    // Drag-and-drop dedup memos (cleared by any other mutation)
    last_queue_reorder: Option<(usize, usize)>,
    last_recommendation_reorder: Option<(usize, usize)>,
}

impl PlayerStore {
    /// Create a new player store over the given audio sink
    pub fn new(sink: Box<dyn AudioSink>, config: PlayerConfig) -> Self {
        let volume = Volume::new(config.volume);
        let mut transport = Transport::new(sink);
        transport.set_gain(volume.gain());
        transport.set_muted(volume.is_muted());

        Self {
            state: TransportState::Idle,
            queue: Queue::new(),
            repeat: config.repeat,
            volume,
            recommended: Vec::new(),
            recommendation_key: RecommendationKey::default(),
            transport,
            subscribers: Vec::new(),
            next_subscription: 0,
            pending_events: Vec::new(),
            last_queue_reorder: None,
            last_recommendation_reorder: None,
        }
    }

    // ===== Playback Control =====

    /// Play a track, optionally replacing the whole queue
    ///
    /// With `tracks`, the queue is replaced wholesale and `track` becomes
    /// current (prepended if absent from the list). Without, the queue
    /// becomes the single given track.
    pub fn play(&mut self, track: Track, tracks: Option<Vec<Track>>) {
        let previous_track_id = self.current_track_id();
        self.queue.set_queue(tracks.unwrap_or_default(), track);
        self.clear_reorder_memos();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.start_or_skip(previous_track_id);
        self.after_mutation();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if self.state != TransportState::Playing {
            return;
        }
        self.transport.pause();
        self.state = TransportState::Paused;
        self.emit(PlayerEvent::StateChanged {
            state: TransportState::Paused,
        });
        self.notify();
    }

    /// Toggle between playing and paused; no-op while idle
    pub fn toggle(&mut self) {
        match self.state {
            TransportState::Playing => self.pause(),
            TransportState::Paused => match self.transport.play() {
                Ok(()) => {
                    self.state = TransportState::Playing;
                    self.emit(PlayerEvent::StateChanged {
                        state: TransportState::Playing,
                    });
                    self.notify();
                }
                Err(err) => {
                    self.fail_current(err.to_string());
                    self.after_mutation();
                }
            },
            TransportState::Idle => {}
        }
    }

    /// Skip to the next track (manual skip)
    ///
    /// Always advances, even under repeat-one. At the end of the queue,
    /// wraps to the start only under repeat-all; otherwise goes idle.
    /// No-op while idle.
    pub fn next(&mut self) {
        let Some(previous_track_id) = self.current_track_id() else {
            return;
        };
        if self.select_following() {
            self.start_or_skip(Some(previous_track_id));
        } else {
            self.enter_idle();
        }
        self.after_mutation();
    }

    /// Go to the previous track
    ///
    /// More than a few seconds into the current track, restarts it instead.
    /// At the first queue position, wraps to the last track only under
    /// repeat-all; otherwise the call is a no-op. No-op while idle.
    pub fn previous(&mut self) {
        let Some(cur) = self.queue.current_index() else {
            return;
        };

        if self.transport.position() > PREVIOUS_RESTART_THRESHOLD {
            self.transport.seek(Duration::ZERO);
            return;
        }

        let target = if cur > 0 {
            cur - 1
        } else if self.repeat == RepeatMode::All && !self.queue.is_empty() {
            self.queue.len() - 1
        } else {
            return;
        };

        let previous_track_id = self.current_track_id();
        self.queue.select(target);
        self.start_or_skip(previous_track_id);
        self.after_mutation();
    }

    /// Seek within the current track, clamped into `[0, duration]`
    pub fn seek(&mut self, position: Duration) {
        if self.queue.current_index().is_none() {
            return;
        }
        self.transport.seek(position);
    }

    // ===== Volume =====

    /// Set volume level (0-100)
    pub fn set_volume(&mut self, level: u8) {
        self.volume.set_level(level);
        self.transport.set_gain(self.volume.gain());
        self.emit(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
        self.notify();
    }

    /// Toggle mute state (preserves volume level)
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.transport.set_muted(self.volume.is_muted());
        self.transport.set_gain(self.volume.gain());
        self.emit(PlayerEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
        self.notify();
    }

    // ===== Queue Management =====

    /// Append a track at the end of the queue
    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.push(track);
        self.clear_reorder_memos();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.after_mutation();
    }

    /// Remove the track at `index`; out-of-range is a silent no-op
    ///
    /// Removing the current track hands playback to the new occupant of
    /// that position, else the new last track, else goes idle.
    pub fn remove_from_queue(&mut self, index: usize) {
        let was_current = self.queue.current_index() == Some(index);
        let previous_track_id = if was_current {
            self.current_track_id()
        } else {
            None
        };

        if self.queue.remove(index).is_none() {
            return;
        }
        self.clear_reorder_memos();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });

        if was_current {
            if let Some(track) = self.queue.current_track().cloned() {
                if self.state == TransportState::Playing {
                    self.start_or_skip(previous_track_id);
                } else {
                    // Paused: load the replacement but stay paused
                    self.transport.bind(&track);
                    self.emit(PlayerEvent::TrackChanged {
                        track_id: track.id,
                        previous_track_id,
                    });
                }
            } else {
                self.enter_idle();
            }
        }

        self.after_mutation();
    }

    /// Move the track at `old_index` to `new_index`
    ///
    /// Out-of-range indices are ignored. An immediately repeated identical
    /// event (duplicate drag-and-drop delivery) is not applied twice.
    pub fn reorder_queue(&mut self, old_index: usize, new_index: usize) {
        if self.last_queue_reorder == Some((old_index, new_index)) {
            debug!(old_index, new_index, "ignoring duplicate queue reorder");
            return;
        }
        if !self.queue.reorder(old_index, new_index) {
            return;
        }
        self.last_queue_reorder = Some((old_index, new_index));
        self.last_recommendation_reorder = None;
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.after_mutation();
    }

    /// Empty the queue and the recommendation batch, and go idle
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.recommended.clear();
        self.clear_reorder_memos();
        self.enter_idle();
        self.emit(PlayerEvent::QueueChanged { length: 0 });
        self.after_mutation();
    }

    // ===== Shuffle & Repeat =====

    /// Toggle shuffle
    ///
    /// Enabling snapshots the live order and applies an unbiased random
    /// permutation with the current track pinned to the front; disabling
    /// restores the snapshot exactly.
    pub fn toggle_shuffle(&mut self) {
        if self.queue.is_shuffled() {
            self.queue.disable_shuffle();
        } else {
            self.queue.enable_shuffle();
        }
        self.clear_reorder_memos();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.after_mutation();
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        if self.repeat == mode {
            return;
        }
        self.repeat = mode;
        self.notify();
    }

    // ===== Recommendations =====

    /// The key the next recommendation lookup must be requested for
    pub fn recommendation_key(&self) -> &RecommendationKey {
        &self.recommendation_key
    }

    /// Deliver the ranked candidates of a recommendation lookup
    ///
    /// `key` must be the key the lookup was issued for; if the live key has
    /// moved on since, the batch is stale and is discarded silently
    /// (last-relevant-result-wins). Survivors replace the published batch.
    pub fn apply_recommendations(&mut self, key: &RecommendationKey, candidates: Vec<Track>) {
        if *key != self.recommendation_key {
            debug!("discarding stale recommendation batch");
            return;
        }
        self.recommended = merge_candidates(candidates, key);
        self.last_recommendation_reorder = None;
        self.emit(PlayerEvent::RecommendationsChanged {
            count: self.recommended.len(),
        });
        self.notify();
    }

    /// Append every current recommendation to the queue and clear the batch
    pub fn add_recommended_to_queue(&mut self) {
        if self.recommended.is_empty() {
            return;
        }
        for rec in std::mem::take(&mut self.recommended) {
            self.queue.push(rec.track);
        }
        self.clear_reorder_memos();
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.after_mutation();
    }

    /// Remove one recommendation by index; out-of-range is a silent no-op
    pub fn remove_from_recommendations(&mut self, index: usize) {
        if index >= self.recommended.len() {
            return;
        }
        self.recommended.remove(index);
        self.last_recommendation_reorder = None;
        self.emit(PlayerEvent::RecommendationsChanged {
            count: self.recommended.len(),
        });
        self.notify();
    }

    /// Move one recommendation; same bounds and dedup policy as the queue
    pub fn reorder_recommendations(&mut self, old_index: usize, new_index: usize) {
        if self.last_recommendation_reorder == Some((old_index, new_index)) {
            debug!(old_index, new_index, "ignoring duplicate recommendation reorder");
            return;
        }
        let len = self.recommended.len();
        if old_index >= len || new_index >= len {
            return;
        }
        if old_index != new_index {
            let rec = self.recommended.remove(old_index);
            self.recommended.insert(new_index, rec);
        }
        self.last_recommendation_reorder = Some((old_index, new_index));
        self.last_queue_reorder = None;
        self.emit(PlayerEvent::RecommendationsChanged { count: len });
        self.notify();
    }

    // ===== Sink Events =====

    /// Route an event from the audio sink into the store
    ///
    /// Events stamped with a binding other than the live one belong to a
    /// previously bound track and are discarded.
    pub fn handle_sink_event(&mut self, binding: SinkBinding, event: SinkEvent) {
        if !self.transport.accepts(binding) {
            debug!("discarding sink event from a stale binding");
            return;
        }

        match event {
            SinkEvent::TimeUpdate { position } => {
                self.transport.record_position(position);
                self.emit(PlayerEvent::PositionUpdate {
                    position_ms: as_millis_u64(self.transport.position()),
                    duration_ms: as_millis_u64(self.transport.duration()),
                });
            }
            SinkEvent::Ended => {
                let Some(track) = self.queue.current_track().cloned() else {
                    return;
                };
                self.emit(PlayerEvent::TrackFinished {
                    track_id: track.id.clone(),
                });
                if self.repeat == RepeatMode::One {
                    // Restart the same track without advancing
                    self.transport.seek(Duration::ZERO);
                    if let Err(err) = self.transport.play() {
                        self.fail_current(err.to_string());
                    }
                } else if self.select_following() {
                    self.start_or_skip(Some(track.id));
                } else {
                    self.enter_idle();
                }
                self.after_mutation();
            }
            SinkEvent::Error { message } => {
                self.fail_current(message);
                self.after_mutation();
            }
        }
    }

    // ===== Observation =====

    /// Register a state subscriber
    ///
    /// The listener is invoked immediately with the current snapshot, then
    /// after every completed state transition.
    pub fn subscribe(&mut self, mut listener: impl FnMut(&PlayerState) + 'static) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        let snapshot = self.snapshot();
        listener(&snapshot);
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a previously registered subscriber
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub, _)| *sub != id);
    }

    /// Drain pending host-effect events
    pub fn take_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Build an immutable snapshot of the current state
    pub fn snapshot(&self) -> PlayerState {
        PlayerState {
            current_track: self.queue.current_track().cloned(),
            queue: self.queue.tracks().to_vec(),
            original_queue: self.queue.original().map(<[Track]>::to_vec),
            is_shuffled: self.queue.is_shuffled(),
            is_playing: self.state == TransportState::Playing,
            repeat_mode: self.repeat,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            recommended_tracks: self.recommended.clone(),
        }
    }

    /// Current transport state
    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Elapsed playback time of the current track
    pub fn position(&self) -> Duration {
        self.transport.position()
    }

    /// The live sink binding, for stamping incoming sink events
    pub fn sink_binding(&self) -> Option<SinkBinding> {
        self.transport.binding()
    }

    // ===== Internal =====

    fn current_track_id(&self) -> Option<TrackId> {
        self.queue.current_track().map(|t| t.id.clone())
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn clear_reorder_memos(&mut self) {
        self.last_queue_reorder = None;
        self.last_recommendation_reorder = None;
    }

    /// Recompute the recommendation key; on change, drop the published
    /// batch and ask the host for a fresh one
    fn sync_recommendations(&mut self) {
        let key = RecommendationKey::new(self.queue.ids(), self.current_track_id());
        if key == self.recommendation_key {
            return;
        }
        self.recommendation_key = key;
        self.recommended.clear();
        if !self.recommendation_key.is_empty() {
            self.emit(PlayerEvent::RecommendationsInvalidated);
        }
    }

    fn after_mutation(&mut self) {
        self.sync_recommendations();
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        for (_, listener) in &mut self.subscribers {
            listener(&snapshot);
        }
    }

    fn enter_idle(&mut self) {
        self.queue.deselect();
        self.transport.release();
        if self.state != TransportState::Idle {
            self.state = TransportState::Idle;
            self.emit(PlayerEvent::StateChanged {
                state: TransportState::Idle,
            });
        }
    }

    /// Select the track after the current one, honoring repeat-all at the
    /// queue boundary. Returns false when the queue is exhausted.
    fn select_following(&mut self) -> bool {
        let Some(cur) = self.queue.current_index() else {
            return false;
        };
        if cur + 1 < self.queue.len() {
            self.queue.select(cur + 1);
            true
        } else if self.repeat == RepeatMode::All && !self.queue.is_empty() {
            self.queue.select(0);
            true
        } else {
            false
        }
    }

    /// Bind and start the current track; on a sink failure, skip forward
    /// with manual-next semantics until a track starts or the queue is
    /// exhausted. Each track gets one attempt per transition, so a fully
    /// failing queue cannot cycle forever under repeat-all.
    fn start_or_skip(&mut self, mut previous_track_id: Option<TrackId>) {
        let mut attempts = self.queue.len();
        while let Some(track) = self.queue.current_track().cloned() {
            if attempts == 0 {
                break;
            }
            attempts -= 1;

            match self.start_track(&track, previous_track_id.take()) {
                Ok(()) => return,
                Err(err) => {
                    warn!(track_id = %track.id, error = %err, "could not play track, skipping");
                    self.emit(PlayerEvent::TrackFailed {
                        track_id: track.id.clone(),
                        message: err.to_string(),
                    });
                    previous_track_id = Some(track.id);
                    if !self.select_following() {
                        break;
                    }
                }
            }
        }
        self.enter_idle();
    }

    fn start_track(
        &mut self,
        track: &Track,
        previous_track_id: Option<TrackId>,
    ) -> Result<(), PlayerError> {
        self.transport.bind(track);
        self.transport.set_gain(self.volume.gain());
        self.transport.set_muted(self.volume.is_muted());
        self.transport.play()?;
        self.state = TransportState::Playing;
        self.emit(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.emit(PlayerEvent::StateChanged {
            state: TransportState::Playing,
        });
        Ok(())
    }

    /// The current track failed mid-stream: surface it and skip forward
    fn fail_current(&mut self, message: String) {
        let Some(track) = self.queue.current_track().cloned() else {
            return;
        };
        warn!(track_id = %track.id, %message, "could not play track, skipping");
        self.emit(PlayerEvent::TrackFailed {
            track_id: track.id.clone(),
            message,
        });
        if self.select_following() {
            self.start_or_skip(Some(track.id));
        } else {
            self.enter_idle();
        }
    }
}

fn as_millis_u64(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;
    use cadence_core::TrackId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_test_track(id: &str) -> Track {
        let mut track = Track::new(
            format!("Track {}", id),
            format!("https://cdn.test/{}.mp3", id),
            180,
        );
        track.id = TrackId::new(id);
        track
    }

    fn store() -> PlayerStore {
        PlayerStore::new(Box::new(NullSink), PlayerConfig::default())
    }

    #[test]
    fn starts_idle() {
        let store = store();
        assert_eq!(store.state(), TransportState::Idle);
        let snapshot = store.snapshot();
        assert!(snapshot.current_track.is_none());
        assert!(!snapshot.is_playing);
    }

    #[test]
    fn subscriber_gets_initial_snapshot() {
        let mut store = store();
        let seen: Rc<RefCell<Vec<PlayerState>>> = Rc::default();
        let sink = Rc::clone(&seen);

        store.subscribe(move |state| sink.borrow_mut().push(state.clone()));

        assert_eq!(seen.borrow().len(), 1);
        assert!(!seen.borrow()[0].is_playing);
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let mut store = store();
        let count: Rc<RefCell<usize>> = Rc::default();
        let sink = Rc::clone(&count);

        let id = store.subscribe(move |_| *sink.borrow_mut() += 1);
        assert_eq!(*count.borrow(), 1);

        store.unsubscribe(id);
        store.play(create_test_track("a"), None);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn play_single_track_sets_queue() {
        let mut store = store();
        store.play(create_test_track("a"), None);

        let snapshot = store.snapshot();
        assert!(snapshot.is_playing);
        assert_eq!(snapshot.queue.len(), 1);
        assert_eq!(snapshot.current_track.unwrap().id.as_str(), "a");
    }

    #[test]
    fn pause_and_toggle() {
        let mut store = store();
        store.play(create_test_track("a"), None);

        store.pause();
        assert_eq!(store.state(), TransportState::Paused);

        store.toggle();
        assert_eq!(store.state(), TransportState::Playing);

        store.toggle();
        assert_eq!(store.state(), TransportState::Paused);
    }

    #[test]
    fn toggle_while_idle_is_noop() {
        let mut store = store();
        store.toggle();
        assert_eq!(store.state(), TransportState::Idle);
    }

    #[test]
    fn next_previous_while_idle_are_noops() {
        let mut store = store();
        store.next();
        store.previous();
        assert_eq!(store.state(), TransportState::Idle);
        assert!(store.take_events().is_empty());
    }

    #[test]
    fn duplicate_reorder_applies_once() {
        let mut store = store();
        let tracks: Vec<Track> = ["a", "b", "c"].iter().map(|id| create_test_track(id)).collect();
        store.play(tracks[0].clone(), Some(tracks));

        store.reorder_queue(0, 2);
        let after_first: Vec<String> = store
            .snapshot()
            .queue
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(after_first, vec!["b", "c", "a"]);

        // Same gesture delivered twice
        store.reorder_queue(0, 2);
        let after_second: Vec<String> = store
            .snapshot()
            .queue
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(after_second, after_first);
    }

    #[test]
    fn reorder_memo_cleared_by_other_mutation() {
        let mut store = store();
        let tracks: Vec<Track> = ["a", "b", "c"].iter().map(|id| create_test_track(id)).collect();
        store.play(tracks[0].clone(), Some(tracks));

        store.reorder_queue(0, 2);
        store.add_to_queue(create_test_track("d"));

        // The same indices are a new gesture now
        store.reorder_queue(0, 2);
        let order: Vec<String> = store
            .snapshot()
            .queue
            .iter()
            .map(|t| t.id.to_string())
            .collect();
        assert_eq!(order, vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn stale_sink_event_is_discarded() {
        let mut store = store();
        store.play(create_test_track("a"), None);
        let stale = store.sink_binding().unwrap();

        store.next(); // queue exhausted -> idle, binding released

        store.handle_sink_event(stale, SinkEvent::Ended);
        assert_eq!(store.state(), TransportState::Idle);
    }

    #[test]
    fn volume_commands_apply_in_any_state() {
        let mut store = store();
        store.set_volume(40);
        store.toggle_mute();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.volume, 40);
        assert!(snapshot.is_muted);
    }

    #[test]
    fn clear_queue_goes_idle_and_drops_recommendations() {
        let mut store = store();
        let tracks: Vec<Track> = ["a", "b"].iter().map(|id| create_test_track(id)).collect();
        store.play(tracks[0].clone(), Some(tracks));

        let key = store.recommendation_key().clone();
        store.apply_recommendations(&key, vec![create_test_track("r")]);
        assert_eq!(store.snapshot().recommended_tracks.len(), 1);

        store.clear_queue();

        let snapshot = store.snapshot();
        assert!(snapshot.queue.is_empty());
        assert!(snapshot.recommended_tracks.is_empty());
        assert!(snapshot.current_track.is_none());
        assert!(!snapshot.is_playing);
    }
}
