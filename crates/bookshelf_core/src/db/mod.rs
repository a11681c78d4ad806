//! SQLite storage bootstrap and schema entry points.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the catalog.
//! - Create the catalog schema before any data access.
//! - Hand out one scoped connection per unit of work via [`CatalogStore`].
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Every returned connection has `foreign_keys=ON`.

pub mod migrations;
mod open;
mod store;

pub use migrations::init_schema;
pub use open::{open_db, open_db_in_memory};
pub use store::CatalogStore;

pub type DbResult<T> = Result<T, DbError>;

/// Storage-level failure: connection, schema or constraint.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl DbError {
    /// Returns whether this error came from a violated SQLite constraint
    /// (foreign key, primary key, NOT NULL).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
