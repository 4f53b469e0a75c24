//! Catalog store: the one sanctioned entry point for catalog reads and writes.
//!
//! # Responsibility
//! - Normalize required names and reject blank ones.
//! - Resolve every band/member/album reference before a link row is written.
//! - Assemble per-band detail views for listings.
//!
//! # Invariants
//! - A failed call leaves the database unchanged.
//! - Link updates replace all editable fields; nothing is merged.
//! - Deleting a link never removes the band, member or album it pointed at.
//! - No chronological checks between year fields.

use crate::model::album::{Album, AlbumId, NewAlbum};
use crate::model::album_connection::{AlbumConnection, AlbumConnectionId, AlbumConnectionInput};
use crate::model::band::{Band, BandId, NewBand};
use crate::model::member::{Member, MemberId};
use crate::model::membership::{Membership, MembershipId, MembershipInput};
use crate::model::{RecordKind, ValidationError};
use crate::repo::entity_repo::require_record;
use crate::repo::{AlbumConnectionView, CatalogRepository, MembershipView, RepoError};
use log::info;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced to catalog callers.
#[derive(Debug)]
pub enum CatalogError {
    /// Input was rejected; nothing was written.
    Validation(ValidationError),
    /// The looked-up or referenced record does not exist.
    NotFound { kind: RecordKind, id: i64 },
    /// Storage failure.
    Repo(RepoError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// One band with everything attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandDetail {
    #[serde(flatten)]
    pub band: Band,
    pub memberships: Vec<MembershipView>,
    pub albums: Vec<AlbumConnectionView>,
}

/// Catalog store handle over a repository implementation.
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a band. Only the name is required.
    pub fn create_band(&self, band: &NewBand) -> CatalogResult<Band> {
        let band = self.repo.create_band(band)?;
        info!(
            "event=band_create module=catalog status=ok band_id={}",
            band.id
        );
        Ok(band)
    }

    /// Adds a member with no main position.
    pub fn create_member(&self, name: &str) -> CatalogResult<Member> {
        let member = self.repo.create_member(name)?;
        info!(
            "event=member_create module=catalog status=ok member_id={}",
            member.id
        );
        Ok(member)
    }

    /// Adds an album. A `None` release year stays unset.
    pub fn create_album(&self, album: &NewAlbum) -> CatalogResult<Album> {
        let album = self.repo.create_album(album)?;
        info!(
            "event=album_create module=catalog status=ok album_id={}",
            album.id
        );
        Ok(album)
    }

    /// Lists bands in insertion order.
    pub fn list_bands(&self) -> CatalogResult<Vec<Band>> {
        self.repo.list_bands().map_err(Into::into)
    }

    pub fn get_band(&self, id: BandId) -> CatalogResult<Band> {
        self.repo
            .get_band(id)?
            .ok_or(CatalogError::NotFound {
                kind: RecordKind::Band,
                id,
            })
    }

    pub fn list_members(&self) -> CatalogResult<Vec<Member>> {
        self.repo.list_members().map_err(Into::into)
    }

    pub fn get_member(&self, id: MemberId) -> CatalogResult<Member> {
        self.repo
            .get_member(id)?
            .ok_or(CatalogError::NotFound {
                kind: RecordKind::Member,
                id,
            })
    }

    pub fn list_albums(&self) -> CatalogResult<Vec<Album>> {
        self.repo.list_albums().map_err(Into::into)
    }

    pub fn get_album(&self, id: AlbumId) -> CatalogResult<Album> {
        self.repo
            .get_album(id)?
            .ok_or(CatalogError::NotFound {
                kind: RecordKind::Album,
                id,
            })
    }

    /// Records a member joining a band.
    ///
    /// # Errors
    /// - `NotFound` for the band, then the member, when either is absent.
    pub fn create_membership(&self, input: &MembershipInput) -> CatalogResult<Membership> {
        self.ensure_membership_refs(input)?;
        let membership = self.repo.create_membership(input)?;
        info!(
            "event=membership_create module=catalog status=ok membership_id={} band_id={} member_id={}",
            membership.id, membership.band_id, membership.member_id
        );
        Ok(membership)
    }

    /// Replaces every field of an existing membership.
    ///
    /// # Errors
    /// - `NotFound` for the membership, the band, or the member, checked in
    ///   that order.
    pub fn update_membership(
        &self,
        id: MembershipId,
        input: &MembershipInput,
    ) -> CatalogResult<Membership> {
        require_record(&self.repo, RecordKind::Membership, id)?;
        self.ensure_membership_refs(input)?;
        let membership = self.repo.update_membership(id, input)?;
        info!(
            "event=membership_update module=catalog status=ok membership_id={} band_id={} member_id={}",
            membership.id, membership.band_id, membership.member_id
        );
        Ok(membership)
    }

    pub fn delete_membership(&self, id: MembershipId) -> CatalogResult<()> {
        self.repo.delete_membership(id)?;
        info!("event=membership_delete module=catalog status=ok membership_id={id}");
        Ok(())
    }

    pub fn get_membership(&self, id: MembershipId) -> CatalogResult<Membership> {
        self.repo
            .get_membership(id)?
            .ok_or(CatalogError::NotFound {
                kind: RecordKind::Membership,
                id,
            })
    }

    /// Attaches a band to an album.
    ///
    /// # Errors
    /// - `NotFound` for the band, then the album, when either is absent.
    pub fn create_album_connection(
        &self,
        input: &AlbumConnectionInput,
    ) -> CatalogResult<AlbumConnection> {
        self.ensure_connection_refs(input)?;
        let connection = self.repo.create_album_connection(input)?;
        info!(
            "event=album_connection_create module=catalog status=ok connection_id={} band_id={} album_id={}",
            connection.id, connection.band_id, connection.album_id
        );
        Ok(connection)
    }

    /// Replaces every field of an existing album connection.
    pub fn update_album_connection(
        &self,
        id: AlbumConnectionId,
        input: &AlbumConnectionInput,
    ) -> CatalogResult<AlbumConnection> {
        require_record(&self.repo, RecordKind::AlbumConnection, id)?;
        self.ensure_connection_refs(input)?;
        let connection = self.repo.update_album_connection(id, input)?;
        info!(
            "event=album_connection_update module=catalog status=ok connection_id={} band_id={} album_id={}",
            connection.id, connection.band_id, connection.album_id
        );
        Ok(connection)
    }

    pub fn delete_album_connection(&self, id: AlbumConnectionId) -> CatalogResult<()> {
        self.repo.delete_album_connection(id)?;
        info!("event=album_connection_delete module=catalog status=ok connection_id={id}");
        Ok(())
    }

    pub fn get_album_connection(&self, id: AlbumConnectionId) -> CatalogResult<AlbumConnection> {
        self.repo
            .get_album_connection(id)?
            .ok_or(CatalogError::NotFound {
                kind: RecordKind::AlbumConnection,
                id,
            })
    }

    /// Returns one band with its memberships and album connections.
    pub fn band_detail(&self, id: BandId) -> CatalogResult<BandDetail> {
        let band = self.get_band(id)?;
        self.detail_for(band)
    }

    /// Returns every band with its memberships and album connections.
    pub fn band_overview(&self) -> CatalogResult<Vec<BandDetail>> {
        self.repo
            .list_bands()?
            .into_iter()
            .map(|band| self.detail_for(band))
            .collect()
    }

    fn detail_for(&self, band: Band) -> CatalogResult<BandDetail> {
        let memberships = self.repo.list_band_memberships(band.id)?;
        let albums = self.repo.list_band_album_connections(band.id)?;
        Ok(BandDetail {
            band,
            memberships,
            albums,
        })
    }

    fn ensure_membership_refs(&self, input: &MembershipInput) -> CatalogResult<()> {
        require_record(&self.repo, RecordKind::Band, input.band_id)?;
        require_record(&self.repo, RecordKind::Member, input.member_id)?;
        Ok(())
    }

    fn ensure_connection_refs(&self, input: &AlbumConnectionInput) -> CatalogResult<()> {
        require_record(&self.repo, RecordKind::Band, input.band_id)?;
        require_record(&self.repo, RecordKind::Album, input.album_id)?;
        Ok(())
    }
}
