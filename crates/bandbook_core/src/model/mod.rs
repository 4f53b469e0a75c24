//! Catalog domain model.
//!
//! # Responsibility
//! - Define the five catalog records and the typed inputs that create them.
//! - Own the "required text must not be blank" rule shared by every entity.
//!
//! # Invariants
//! - Record ids are assigned by storage and never change afterwards.
//! - Optional years are `None` when unknown; `Some(0)` is a real year.
//! - No ordering is implied between any two year fields.

pub mod album;
pub mod album_connection;
pub mod band;
pub mod member;
pub mod membership;

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Names the catalog collection a record id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Band,
    Member,
    Membership,
    Album,
    AlbumConnection,
}

impl RecordKind {
    /// Stable lowercase label used in messages and log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Band => "band",
            Self::Member => "member",
            Self::Membership => "membership",
            Self::Album => "album",
            Self::AlbumConnection => "album connection",
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Input rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required name/title is empty after trimming.
    BlankName { field: &'static str },
    /// A required form field was not submitted or was blank.
    MissingField(&'static str),
    /// A numeric form field did not parse.
    MalformedNumber { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName { field } => write!(f, "{field} must not be blank"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::MalformedNumber { field, value } => {
                write!(f, "field `{field}` expects a whole number, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims a required name and rejects it when nothing is left.
pub(crate) fn normalize_required(
    field: &'static str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankName { field });
    }
    Ok(trimmed.to_string())
}
