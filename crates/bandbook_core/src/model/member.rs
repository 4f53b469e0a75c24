//! Member records.

use serde::{Deserialize, Serialize};

/// Storage-assigned member identity.
pub type MemberId = i64;

/// A person who may play in any number of bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    /// Never set by the catalog today; kept so stored rows round-trip.
    pub main_position: Option<String>,
}
