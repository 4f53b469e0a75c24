//! Bands, members and albums: the catalog's independent records.
//!
//! # Invariants
//! - Callers pass already normalized inputs; this layer re-checks required
//!   names so a blank name never reaches a `NOT NULL` column as `""`.
//! - Lists are returned in id order, which is insertion order.

use super::{RepoError, RepoResult, SqliteCatalogRepository};
use crate::model::album::{Album, AlbumId, NewAlbum};
use crate::model::band::{Band, BandId, NewBand};
use crate::model::member::{Member, MemberId};
use crate::model::{normalize_required, RecordKind};
use rusqlite::{params, OptionalExtension, Row};

const BAND_SELECT_SQL: &str = "SELECT id, name, formed_year, home_location FROM bands";
const MEMBER_SELECT_SQL: &str = "SELECT id, name, main_position FROM members";
const ALBUM_SELECT_SQL: &str = "SELECT id, title, release_year FROM albums";

/// Create/read access to bands, members and albums.
pub trait EntityRepository {
    fn create_band(&self, band: &NewBand) -> RepoResult<Band>;
    fn get_band(&self, id: BandId) -> RepoResult<Option<Band>>;
    fn list_bands(&self) -> RepoResult<Vec<Band>>;

    fn create_member(&self, name: &str) -> RepoResult<Member>;
    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>>;
    fn list_members(&self) -> RepoResult<Vec<Member>>;

    fn create_album(&self, album: &NewAlbum) -> RepoResult<Album>;
    fn get_album(&self, id: AlbumId) -> RepoResult<Option<Album>>;
    fn list_albums(&self) -> RepoResult<Vec<Album>>;

    /// Returns whether a row with `id` exists in the collection for `kind`.
    fn record_exists(&self, kind: RecordKind, id: i64) -> RepoResult<bool>;
}

impl EntityRepository for SqliteCatalogRepository<'_> {
    fn create_band(&self, band: &NewBand) -> RepoResult<Band> {
        let band = band.normalized()?;
        self.conn().execute(
            "INSERT INTO bands (name, formed_year, home_location) VALUES (?1, ?2, ?3);",
            params![
                band.name.as_str(),
                band.formed_year,
                band.home_location.as_deref()
            ],
        )?;

        Ok(Band {
            id: self.conn().last_insert_rowid(),
            name: band.name,
            formed_year: band.formed_year,
            home_location: band.home_location,
        })
    }

    fn get_band(&self, id: BandId) -> RepoResult<Option<Band>> {
        let band = self
            .conn()
            .query_row(
                &format!("{BAND_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_band_row,
            )
            .optional()?;
        Ok(band)
    }

    fn list_bands(&self) -> RepoResult<Vec<Band>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{BAND_SELECT_SQL} ORDER BY id ASC;"))?;
        let bands = stmt
            .query_map([], parse_band_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(bands)
    }

    fn create_member(&self, name: &str) -> RepoResult<Member> {
        let name = normalize_required("member name", name)?;
        self.conn().execute(
            "INSERT INTO members (name, main_position) VALUES (?1, NULL);",
            [name.as_str()],
        )?;

        Ok(Member {
            id: self.conn().last_insert_rowid(),
            name,
            main_position: None,
        })
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let member = self
            .conn()
            .query_row(
                &format!("{MEMBER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_member_row,
            )
            .optional()?;
        Ok(member)
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{MEMBER_SELECT_SQL} ORDER BY id ASC;"))?;
        let members = stmt
            .query_map([], parse_member_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }

    fn create_album(&self, album: &NewAlbum) -> RepoResult<Album> {
        let album = album.normalized()?;
        self.conn().execute(
            "INSERT INTO albums (title, release_year) VALUES (?1, ?2);",
            params![album.title.as_str(), album.release_year],
        )?;

        Ok(Album {
            id: self.conn().last_insert_rowid(),
            title: album.title,
            release_year: album.release_year,
        })
    }

    fn get_album(&self, id: AlbumId) -> RepoResult<Option<Album>> {
        let album = self
            .conn()
            .query_row(
                &format!("{ALBUM_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_album_row,
            )
            .optional()?;
        Ok(album)
    }

    fn list_albums(&self) -> RepoResult<Vec<Album>> {
        let mut stmt = self
            .conn()
            .prepare(&format!("{ALBUM_SELECT_SQL} ORDER BY id ASC;"))?;
        let albums = stmt
            .query_map([], parse_album_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(albums)
    }

    fn record_exists(&self, kind: RecordKind, id: i64) -> RepoResult<bool> {
        let table = table_for(kind);
        let exists: i64 = self.conn().query_row(
            &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
            [id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }
}

/// Fails with `NotFound` unless `id` resolves in the collection for `kind`.
pub(crate) fn require_record<R: EntityRepository + ?Sized>(
    repo: &R,
    kind: RecordKind,
    id: i64,
) -> RepoResult<()> {
    if repo.record_exists(kind, id)? {
        Ok(())
    } else {
        Err(RepoError::NotFound { kind, id })
    }
}

fn table_for(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Band => "bands",
        RecordKind::Member => "members",
        RecordKind::Membership => "memberships",
        RecordKind::Album => "albums",
        RecordKind::AlbumConnection => "album_connections",
    }
}

fn parse_band_row(row: &Row<'_>) -> rusqlite::Result<Band> {
    Ok(Band {
        id: row.get("id")?,
        name: row.get("name")?,
        formed_year: row.get("formed_year")?,
        home_location: row.get("home_location")?,
    })
}

fn parse_member_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get("id")?,
        name: row.get("name")?,
        main_position: row.get("main_position")?,
    })
}

fn parse_album_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get("id")?,
        title: row.get("title")?,
        release_year: row.get("release_year")?,
    })
}
