//! Core catalog for the Bandbook music database.
//! Bands, members, albums and the memberships/album connections that tie
//! them together, persisted in SQLite.

pub mod config;
pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CatalogConfig;
pub use form::{
    AlbumConnectionForm, AlbumForm, BandForm, FormFields, MemberForm, MembershipForm,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::album::{Album, AlbumId, NewAlbum};
pub use model::album_connection::{AlbumConnection, AlbumConnectionId, AlbumConnectionInput};
pub use model::band::{Band, BandId, NewBand};
pub use model::member::{Member, MemberId};
pub use model::membership::{Membership, MembershipId, MembershipInput};
pub use model::{RecordKind, ValidationError};
pub use repo::{
    AlbumConnectionView, CatalogRepository, EntityRepository, LinkRepository, MembershipView,
    RepoError, RepoResult, SqliteCatalogRepository,
};
pub use service::catalog_service::{BandDetail, CatalogError, CatalogResult, CatalogService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
