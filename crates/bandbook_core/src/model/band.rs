//! Band records.

use super::{normalize_required, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned band identity.
pub type BandId = i64;

/// A musical group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub id: BandId,
    pub name: String,
    pub formed_year: Option<i32>,
    pub home_location: Option<String>,
}

/// Fields accepted when adding a band.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBand {
    pub name: String,
    pub formed_year: Option<i32>,
    pub home_location: Option<String>,
}

impl NewBand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns a copy with the name trimmed, or the blank-name error.
    pub fn normalized(&self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: normalize_required("band name", &self.name)?,
            formed_year: self.formed_year,
            home_location: self.home_location.clone(),
        })
    }
}
