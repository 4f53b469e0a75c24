//! Album records.

use super::{normalize_required, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned album identity.
pub type AlbumId = i64;

/// A release. Bands attach to it through album connections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub release_year: Option<i32>,
}

/// Fields accepted when adding an album.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAlbum {
    pub title: String,
    pub release_year: Option<i32>,
}

impl NewAlbum {
    pub fn new(title: impl Into<String>, release_year: Option<i32>) -> Self {
        Self {
            title: title.into(),
            release_year,
        }
    }

    /// Returns a copy with the title trimmed, or the blank-title error.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            title: normalize_required("album title", &self.title)?,
            release_year: self.release_year,
        })
    }
}
