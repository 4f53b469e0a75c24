//! Repository layer: catalog persistence behind use-case sized traits.
//!
//! # Responsibility
//! - Keep SQL inside `SqliteCatalogRepository`.
//! - Report missing rows as `RepoError::NotFound` rather than empty results
//!   on write paths.
//!
//! # Invariants
//! - A repository only wraps connections migrated to the latest schema.
//! - Writes are single statements in autocommit mode; nothing is buffered.

pub mod entity_repo;
pub mod link_repo;

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::{RecordKind, ValidationError};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use entity_repo::EntityRepository;
pub use link_repo::{AlbumConnectionView, LinkRepository, MembershipView};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure raised by catalog repositories.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        kind: RecordKind,
        id: i64,
    },
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Full catalog persistence contract.
pub trait CatalogRepository: EntityRepository + LinkRepository {}

impl<T: EntityRepository + LinkRepository> CatalogRepository for T {}

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("bands", &["id", "name", "formed_year", "home_location"]),
    ("members", &["id", "name", "main_position"]),
    (
        "memberships",
        &["id", "band_id", "member_id", "start_year", "end_year", "role"],
    ),
    ("albums", &["id", "title", "release_year"]),
    (
        "album_connections",
        &["id", "band_id", "album_id", "connection_type", "release_year"],
    ),
];

/// SQLite-backed catalog repository over a borrowed connection.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    /// Wraps a connection after checking it carries the catalog schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` for a damaged schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_catalog_connection_ready(conn)?;
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &'conn Connection {
        self.conn
    }
}

fn ensure_catalog_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        let present = table_columns(conn, table)?;
        let missing = columns
            .iter()
            .copied()
            .find(|column| !present.iter().any(|name| name == column));
        if let Some(column) = missing {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
