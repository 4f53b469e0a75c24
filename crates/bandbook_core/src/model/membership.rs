//! Membership records: one member in one band over an optional span of years.
//!
//! # Invariants
//! - `band_id` and `member_id` resolved to existing rows when last written.
//! - `start_year` and `end_year` are independent; either may be unset.

use super::band::BandId;
use super::member::MemberId;
use serde::{Deserialize, Serialize};

/// Storage-assigned membership identity.
pub type MembershipId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: MembershipId,
    pub band_id: BandId,
    pub member_id: MemberId,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    /// Free text, e.g. "lead vocals, 1998 tour".
    pub role: Option<String>,
}

/// Editable membership fields.
///
/// Used for both create and update; an update replaces every field, so a
/// `None` here clears whatever was stored before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipInput {
    pub band_id: BandId,
    pub member_id: MemberId,
    pub role: Option<String>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl MembershipInput {
    /// Open-ended membership with no role or years recorded.
    pub fn new(band_id: BandId, member_id: MemberId) -> Self {
        Self {
            band_id,
            member_id,
            role: None,
            start_year: None,
            end_year: None,
        }
    }
}
