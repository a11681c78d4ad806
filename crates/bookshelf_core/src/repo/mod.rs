//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity.
//! - Isolate SQL details from service and HTTP orchestration.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Multi-statement writes run in one `IMMEDIATE` transaction; a failed
//!   statement rolls the whole unit back.
//! - Repository APIs return semantic errors (`NotFound`, `Validation`) in
//!   addition to storage errors. Constraint violations are never ignored.

pub mod author_repo;
pub mod book_repo;
pub mod genre_repo;
mod named;

use crate::db::migrations::CATALOG_TABLES;
use crate::db::DbError;
use crate::model::{EntityKind, ValidationError};
use rusqlite::Connection;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Submitted fields failed validation; nothing was written.
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// Target row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    /// Connection, schema or constraint failure.
    #[error("{0}")]
    Storage(#[from] DbError),
    /// Connection was handed over without the catalog schema.
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub(crate) fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

fn ensure_catalog_tables(conn: &Connection) -> RepoResult<()> {
    for table in CATALOG_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
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
