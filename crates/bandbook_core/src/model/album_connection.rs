//! Album connections: the band/album junction.
//!
//! # Invariants
//! - `band_id` and `album_id` resolved to existing rows when last written.
//! - `release_year` is this band's release of the album and may differ from
//!   `Album::release_year` (re-issues, compilation credits).

use super::album::AlbumId;
use super::band::BandId;
use serde::{Deserialize, Serialize};

/// Storage-assigned album connection identity.
pub type AlbumConnectionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumConnection {
    pub id: AlbumConnectionId,
    pub band_id: BandId,
    pub album_id: AlbumId,
    /// Free-text label such as "Primary Artist", "Featured" or "Collaboration".
    pub connection_type: Option<String>,
    pub release_year: Option<i32>,
}

/// Editable album connection fields, with full-replace update semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumConnectionInput {
    pub band_id: BandId,
    pub album_id: AlbumId,
    pub connection_type: Option<String>,
    pub release_year: Option<i32>,
}

impl AlbumConnectionInput {
    pub fn new(band_id: BandId, album_id: AlbumId) -> Self {
        Self {
            band_id,
            album_id,
            connection_type: None,
            release_year: None,
        }
    }
}
