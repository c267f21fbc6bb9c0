//! Album types

use super::AlbumId;
use serde::{Deserialize, Serialize};

/// Denormalized album reference carried on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    /// Album identifier
    pub id: AlbumId,
    /// Album title (denormalized)
    pub title: String,
    /// Cover art URL, if the album has one
    pub cover_url: Option<String>,
}

impl AlbumRef {
    /// Create a new album reference
    pub fn new(id: AlbumId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            cover_url: None,
        }
    }
}
