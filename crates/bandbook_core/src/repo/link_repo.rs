//! Memberships and album connections: the catalog's relationship rows.
//!
//! # Responsibility
//! - Persist create/replace/delete for both link tables.
//! - Serve the per-band joined views used by band listings.
//!
//! # Invariants
//! - Update is a full replacement of every editable column.
//! - Delete is a hard delete and never touches bands, members or albums.
//! - Update/delete of an absent id reports `NotFound` and changes nothing.

use super::{RepoError, RepoResult, SqliteCatalogRepository};
use crate::model::album_connection::{AlbumConnection, AlbumConnectionId, AlbumConnectionInput};
use crate::model::band::BandId;
use crate::model::membership::{Membership, MembershipId, MembershipInput};
use crate::model::RecordKind;
use rusqlite::{params, OptionalExtension, Row};
use serde::Serialize;

const MEMBERSHIP_SELECT_SQL: &str =
    "SELECT id, band_id, member_id, start_year, end_year, role FROM memberships";
const CONNECTION_SELECT_SQL: &str =
    "SELECT id, band_id, album_id, connection_type, release_year FROM album_connections";

/// Membership joined with the member's name, for band listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipView {
    #[serde(flatten)]
    pub membership: Membership,
    pub member_name: String,
}

/// Album connection joined with the album it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumConnectionView {
    #[serde(flatten)]
    pub connection: AlbumConnection,
    pub album_title: String,
    /// The album's own release year, next to the connection's.
    pub album_release_year: Option<i32>,
}

/// Persistence contract for the two link tables.
///
/// Reference checks against bands/members/albums belong to the caller;
/// the schema's foreign keys still reject dangling ids as a last resort.
pub trait LinkRepository {
    fn create_membership(&self, input: &MembershipInput) -> RepoResult<Membership>;
    fn update_membership(
        &self,
        id: MembershipId,
        input: &MembershipInput,
    ) -> RepoResult<Membership>;
    fn delete_membership(&self, id: MembershipId) -> RepoResult<()>;
    fn get_membership(&self, id: MembershipId) -> RepoResult<Option<Membership>>;
    fn list_band_memberships(&self, band_id: BandId) -> RepoResult<Vec<MembershipView>>;

    fn create_album_connection(&self, input: &AlbumConnectionInput)
        -> RepoResult<AlbumConnection>;
    fn update_album_connection(
        &self,
        id: AlbumConnectionId,
        input: &AlbumConnectionInput,
    ) -> RepoResult<AlbumConnection>;
    fn delete_album_connection(&self, id: AlbumConnectionId) -> RepoResult<()>;
    fn get_album_connection(&self, id: AlbumConnectionId) -> RepoResult<Option<AlbumConnection>>;
    fn list_band_album_connections(&self, band_id: BandId)
        -> RepoResult<Vec<AlbumConnectionView>>;
}

impl LinkRepository for SqliteCatalogRepository<'_> {
    fn create_membership(&self, input: &MembershipInput) -> RepoResult<Membership> {
        self.conn().execute(
            "INSERT INTO memberships (band_id, member_id, start_year, end_year, role)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                input.band_id,
                input.member_id,
                input.start_year,
                input.end_year,
                input.role.as_deref(),
            ],
        )?;

        Ok(membership_from_input(self.conn().last_insert_rowid(), input))
    }

    fn update_membership(
        &self,
        id: MembershipId,
        input: &MembershipInput,
    ) -> RepoResult<Membership> {
        let changed = self.conn().execute(
            "UPDATE memberships
             SET
                band_id = ?1,
                member_id = ?2,
                start_year = ?3,
                end_year = ?4,
                role = ?5
             WHERE id = ?6;",
            params![
                input.band_id,
                input.member_id,
                input.start_year,
                input.end_year,
                input.role.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Membership,
                id,
            });
        }

        Ok(membership_from_input(id, input))
    }

    fn delete_membership(&self, id: MembershipId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM memberships WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Membership,
                id,
            });
        }
        Ok(())
    }

    fn get_membership(&self, id: MembershipId) -> RepoResult<Option<Membership>> {
        let membership = self
            .conn()
            .query_row(
                &format!("{MEMBERSHIP_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_membership_row,
            )
            .optional()?;
        Ok(membership)
    }

    fn list_band_memberships(&self, band_id: BandId) -> RepoResult<Vec<MembershipView>> {
        let mut stmt = self.conn().prepare(
            "SELECT
                ms.id AS id,
                ms.band_id AS band_id,
                ms.member_id AS member_id,
                ms.start_year AS start_year,
                ms.end_year AS end_year,
                ms.role AS role,
                m.name AS member_name
             FROM memberships ms
             INNER JOIN members m ON m.id = ms.member_id
             WHERE ms.band_id = ?1
             ORDER BY ms.id ASC;",
        )?;
        let views = stmt
            .query_map([band_id], |row| {
                Ok(MembershipView {
                    membership: parse_membership_row(row)?,
                    member_name: row.get("member_name")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }

    fn create_album_connection(
        &self,
        input: &AlbumConnectionInput,
    ) -> RepoResult<AlbumConnection> {
        self.conn().execute(
            "INSERT INTO album_connections (band_id, album_id, connection_type, release_year)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                input.band_id,
                input.album_id,
                input.connection_type.as_deref(),
                input.release_year,
            ],
        )?;

        Ok(connection_from_input(self.conn().last_insert_rowid(), input))
    }

    fn update_album_connection(
        &self,
        id: AlbumConnectionId,
        input: &AlbumConnectionInput,
    ) -> RepoResult<AlbumConnection> {
        let changed = self.conn().execute(
            "UPDATE album_connections
             SET
                band_id = ?1,
                album_id = ?2,
                connection_type = ?3,
                release_year = ?4
             WHERE id = ?5;",
            params![
                input.band_id,
                input.album_id,
                input.connection_type.as_deref(),
                input.release_year,
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::AlbumConnection,
                id,
            });
        }

        Ok(connection_from_input(id, input))
    }

    fn delete_album_connection(&self, id: AlbumConnectionId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM album_connections WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::AlbumConnection,
                id,
            });
        }
        Ok(())
    }

    fn get_album_connection(&self, id: AlbumConnectionId) -> RepoResult<Option<AlbumConnection>> {
        let connection = self
            .conn()
            .query_row(
                &format!("{CONNECTION_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_connection_row,
            )
            .optional()?;
        Ok(connection)
    }

    fn list_band_album_connections(
        &self,
        band_id: BandId,
    ) -> RepoResult<Vec<AlbumConnectionView>> {
        let mut stmt = self.conn().prepare(
            "SELECT
                ac.id AS id,
                ac.band_id AS band_id,
                ac.album_id AS album_id,
                ac.connection_type AS connection_type,
                ac.release_year AS release_year,
                a.title AS album_title,
                a.release_year AS album_release_year
             FROM album_connections ac
             INNER JOIN albums a ON a.id = ac.album_id
             WHERE ac.band_id = ?1
             ORDER BY ac.id ASC;",
        )?;
        let views = stmt
            .query_map([band_id], |row| {
                Ok(AlbumConnectionView {
                    connection: parse_connection_row(row)?,
                    album_title: row.get("album_title")?,
                    album_release_year: row.get("album_release_year")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(views)
    }
}

fn membership_from_input(id: MembershipId, input: &MembershipInput) -> Membership {
    Membership {
        id,
        band_id: input.band_id,
        member_id: input.member_id,
        start_year: input.start_year,
        end_year: input.end_year,
        role: input.role.clone(),
    }
}

fn connection_from_input(id: AlbumConnectionId, input: &AlbumConnectionInput) -> AlbumConnection {
    AlbumConnection {
        id,
        band_id: input.band_id,
        album_id: input.album_id,
        connection_type: input.connection_type.clone(),
        release_year: input.release_year,
    }
}

fn parse_membership_row(row: &Row<'_>) -> rusqlite::Result<Membership> {
    Ok(Membership {
        id: row.get("id")?,
        band_id: row.get("band_id")?,
        member_id: row.get("member_id")?,
        start_year: row.get("start_year")?,
        end_year: row.get("end_year")?,
        role: row.get("role")?,
    })
}

fn parse_connection_row(row: &Row<'_>) -> rusqlite::Result<AlbumConnection> {
    Ok(AlbumConnection {
        id: row.get("id")?,
        band_id: row.get("band_id")?,
        album_id: row.get("album_id")?,
        connection_type: row.get("connection_type")?,
        release_year: row.get("release_year")?,
    })
}
