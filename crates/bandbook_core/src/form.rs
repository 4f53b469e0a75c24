//! Text form input coercion.
//!
//! # Responsibility
//! - Turn submitted `key=value` text into the typed inputs of the catalog
//!   store, so store signatures never see raw strings.
//!
//! # Invariants
//! - A missing or blank optional number is `None`, never `0`.
//! - A missing or blank optional text field is `None`.
//! - Numbers are trimmed before parsing; anything else that fails to parse
//!   is `ValidationError::MalformedNumber`.

use crate::model::album::NewAlbum;
use crate::model::album_connection::AlbumConnectionInput;
use crate::model::band::NewBand;
use crate::model::membership::MembershipInput;
use crate::model::ValidationError;
use std::collections::HashMap;
use std::str::FromStr;

pub const BAND_NAME: &str = "bandname";
pub const FORMED_YEAR: &str = "formedyear";
pub const HOME_LOCATION: &str = "homelocation";
pub const MEMBER_NAME: &str = "membername";
pub const ALBUM_TITLE: &str = "albumtitle";
pub const RELEASE_YEAR: &str = "releaseyear";
pub const BAND_ID: &str = "bandid";
pub const MEMBER_ID: &str = "memberid";
pub const ALBUM_ID: &str = "albumid";
pub const ROLE: &str = "role";
pub const START_YEAR: &str = "startyear";
pub const END_YEAR: &str = "endyear";
pub const BAND_CONNECTION: &str = "bandconnection";

/// Submitted form fields, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; a later value for the same key wins.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Raw value, or `None` when the field is absent or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    pub fn required_text(&self, key: &'static str) -> Result<String, ValidationError> {
        self.get(key)
            .map(str::to_string)
            .ok_or(ValidationError::MissingField(key))
    }

    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }

    pub fn optional_year(&self, key: &'static str) -> Result<Option<i32>, ValidationError> {
        self.get(key).map(|raw| parse_number(key, raw)).transpose()
    }

    pub fn required_id(&self, key: &'static str) -> Result<i64, ValidationError> {
        let raw = self.get(key).ok_or(ValidationError::MissingField(key))?;
        parse_number(key, raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.insert(key, value);
        }
        fields
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> Result<T, ValidationError> {
    raw.parse::<T>()
        .map_err(|_| ValidationError::MalformedNumber {
            field,
            value: raw.to_string(),
        })
}

/// "Add band" form.
pub struct BandForm;

impl BandForm {
    pub fn parse(fields: &FormFields) -> Result<NewBand, ValidationError> {
        Ok(NewBand {
            name: fields.required_text(BAND_NAME)?,
            formed_year: fields.optional_year(FORMED_YEAR)?,
            home_location: fields.optional_text(HOME_LOCATION),
        })
    }
}

/// "Add member" form. Yields the member name.
pub struct MemberForm;

impl MemberForm {
    pub fn parse(fields: &FormFields) -> Result<String, ValidationError> {
        fields.required_text(MEMBER_NAME)
    }
}

/// "Add album" form.
pub struct AlbumForm;

impl AlbumForm {
    pub fn parse(fields: &FormFields) -> Result<NewAlbum, ValidationError> {
        Ok(NewAlbum {
            title: fields.required_text(ALBUM_TITLE)?,
            release_year: fields.optional_year(RELEASE_YEAR)?,
        })
    }
}

/// "Assign membership" and "edit membership" form.
pub struct MembershipForm;

impl MembershipForm {
    pub fn parse(fields: &FormFields) -> Result<MembershipInput, ValidationError> {
        Ok(MembershipInput {
            band_id: fields.required_id(BAND_ID)?,
            member_id: fields.required_id(MEMBER_ID)?,
            role: fields.optional_text(ROLE),
            start_year: fields.optional_year(START_YEAR)?,
            end_year: fields.optional_year(END_YEAR)?,
        })
    }
}

/// "Assign album" and "edit album connection" form.
pub struct AlbumConnectionForm;

impl AlbumConnectionForm {
    pub fn parse(fields: &FormFields) -> Result<AlbumConnectionInput, ValidationError> {
        Ok(AlbumConnectionInput {
            band_id: fields.required_id(BAND_ID)?,
            album_id: fields.required_id(ALBUM_ID)?,
            connection_type: fields.optional_text(BAND_CONNECTION),
            release_year: fields.optional_year(RELEASE_YEAR)?,
        })
    }
}
