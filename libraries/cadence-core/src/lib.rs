//! Cadence Player Core
//!
//! Content-API data model shared across the Cadence Player crates.
//!
//! This crate defines the value types the content API hands to the playback
//! engine: tracks with denormalized album/artist references, and the
//! string-backed id newtypes used to address them. It contains no playback
//! logic; the engine treats everything here as opaque, pre-validated input.
//!
//! # Example
//!
//! ```rust
//! use cadence_core::types::Track;
//!
//! let track = Track::new("My Favorite Song", "https://cdn.example.com/audio/1.mp3", 214);
//! assert_eq!(track.duration.as_secs(), 214);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

// Re-export commonly used types
pub use types::{AlbumId, AlbumRef, ArtistId, ArtistRef, Track, TrackId};
