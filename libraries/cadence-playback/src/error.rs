//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
///
/// Most invalid inputs (out-of-range indices, commands issued while idle)
/// are silently ignored rather than surfaced; only failures of the audio
/// primitive itself become errors.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// No track is bound to the audio sink
    #[error("no track loaded")]
    NoTrackLoaded,

    /// The audio sink failed to load, decode, or start a source
    #[error("audio sink error: {0}")]
    Sink(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlayerError>;
