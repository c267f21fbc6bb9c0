//! Domain value types owned by the content API.

mod album;
mod artist;
mod ids;
mod track;

pub use album::AlbumRef;
pub use artist::ArtistRef;
pub use ids::{AlbumId, ArtistId, TrackId};
pub use track::Track;
