//! Shared test helpers: track constructors and a command-recording sink.

#![allow(dead_code)]

use cadence_core::{Track, TrackId};
use cadence_playback::{AudioSink, PlayerError, Result};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

pub fn create_track(id: &str, title: &str, duration_secs: u64) -> Track {
    let mut track = Track::new(title, format!("https://cdn.test/{}.mp3", id), duration_secs);
    track.id = TrackId::new(id);
    track
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter()
        .map(|id| create_track(id, &format!("Track {}", id), 180))
        .collect()
}

/// One command observed by the recording sink
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCommand {
    Load(String),
    Play,
    Pause,
    Seek(Duration),
    Gain(f32),
    Muted(bool),
}

/// Shared view into a `RecordingSink`
///
/// The store owns the sink as a boxed trait object; tests keep this handle
/// to inspect commands and to script failures.
#[derive(Default)]
pub struct SinkLog {
    commands: RefCell<Vec<SinkCommand>>,
    failing_urls: RefCell<HashSet<String>>,
    loaded: RefCell<Option<String>>,
}

impl SinkLog {
    pub fn commands(&self) -> Vec<SinkCommand> {
        self.commands.borrow().clone()
    }

    pub fn clear(&self) {
        self.commands.borrow_mut().clear();
    }

    /// Make `play()` fail while the given URL is loaded
    pub fn fail_url(&self, url: impl Into<String>) {
        self.failing_urls.borrow_mut().insert(url.into());
    }

    pub fn loaded_url(&self) -> Option<String> {
        self.loaded.borrow().clone()
    }
}

/// Sink that records every command it receives
pub struct RecordingSink {
    log: Rc<SinkLog>,
}

impl RecordingSink {
    /// Build a sink plus the log handle tests inspect
    pub fn new() -> (Self, Rc<SinkLog>) {
        let log = Rc::new(SinkLog::default());
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl AudioSink for RecordingSink {
    fn load(&mut self, url: &str) {
        *self.log.loaded.borrow_mut() = Some(url.to_string());
        self.log
            .commands
            .borrow_mut()
            .push(SinkCommand::Load(url.to_string()));
    }

    fn play(&mut self) -> Result<()> {
        let loaded = self.log.loaded.borrow().clone();
        if let Some(url) = loaded {
            if self.log.failing_urls.borrow().contains(&url) {
                return Err(PlayerError::Sink(format!("failed to load {url}")));
            }
        }
        self.log.commands.borrow_mut().push(SinkCommand::Play);
        Ok(())
    }

    fn pause(&mut self) {
        self.log.commands.borrow_mut().push(SinkCommand::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.log
            .commands
            .borrow_mut()
            .push(SinkCommand::Seek(position));
    }

    fn set_gain(&mut self, gain: f32) {
        self.log.commands.borrow_mut().push(SinkCommand::Gain(gain));
    }

    fn set_muted(&mut self, muted: bool) {
        self.log
            .commands
            .borrow_mut()
            .push(SinkCommand::Muted(muted));
    }
}
