//! SQLite schema registry and executor.
//!
//! # Responsibility
//! - Register catalog schema steps in strictly increasing order.
//! - Apply pending steps atomically.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied version is mirrored to `PRAGMA user_version`.
//! - Every step is idempotent DDL (`IF NOT EXISTS`), so running it against a
//!   file that already holds the catalog tables (user_version 0) keeps data.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// Tables owned by the catalog schema.
pub const CATALOG_TABLES: [&str; 5] = ["books", "authors", "genres", "book_author", "book_genre"];

/// Returns the latest schema version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Ensures all catalog tables exist.
///
/// Safe to call on every process start and on a pre-populated file.
pub fn init_schema(conn: &mut Connection) -> DbResult<()> {
    apply_migrations(conn)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS {
        if migration.version <= current_version {
            continue;
        }

        log::debug!(
            "event=schema_migrate module=db status=apply version={}",
            migration.version
        );
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
