//! Artist types

use super::ArtistId;
use serde::{Deserialize, Serialize};

/// Denormalized artist reference carried on a track
///
/// Enough for display and navigation without a second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Artist identifier
    pub id: ArtistId,
    /// Artist name (denormalized)
    pub name: String,
}

impl ArtistRef {
    /// Create a new artist reference
    pub fn new(id: ArtistId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
