//! Explicit catalog store handle.
//!
//! # Responsibility
//! - Own the database location chosen at startup.
//! - Create the schema once, then hand out one connection per unit of work.
//!
//! # Invariants
//! - No process-wide connection exists; callers drop their connection when
//!   the request ends, on success and error paths alike.
//! - Shared in-memory stores stay alive as long as the store value does.

use super::open::{open_db, open_db_in_memory_shared};
use super::DbResult;
use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

static MEMORY_STORE_SEQ: AtomicU64 = AtomicU64::new(0);

enum Location {
    File(PathBuf),
    Memory {
        uri: String,
        // Keeps the shared-cache database alive between requests.
        _anchor: Mutex<Connection>,
    },
}

/// Store handle built once at startup and injected into request handlers.
pub struct CatalogStore {
    location: Location,
}

impl CatalogStore {
    /// Opens a file-backed store, creating the file and schema when needed.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        drop(open_db(&path)?);
        info!(
            "event=store_open module=db status=ok mode=file path={}",
            path.display()
        );
        Ok(Self {
            location: Location::File(path),
        })
    }

    /// Opens a private in-memory store shared by every connection it hands
    /// out. Intended for tests and throwaway runs.
    pub fn in_memory() -> DbResult<Self> {
        let seq = MEMORY_STORE_SEQ.fetch_add(1, Ordering::Relaxed);
        let uri = format!(
            "file:bookshelf-mem-{}-{seq}?mode=memory&cache=shared",
            std::process::id()
        );
        let anchor = open_db_in_memory_shared(&uri)?;
        info!("event=store_open module=db status=ok mode=memory");
        Ok(Self {
            location: Location::Memory {
                uri,
                _anchor: Mutex::new(anchor),
            },
        })
    }

    /// Opens a fresh connection scoped to one unit of work.
    pub fn connect(&self) -> DbResult<Connection> {
        match &self.location {
            Location::File(path) => open_db(path),
            Location::Memory { uri, .. } => open_db_in_memory_shared(uri),
        }
    }

    /// Returns the backing file path, or `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            Location::File(path) => Some(path.as_path()),
            Location::Memory { .. } => None,
        }
    }
}
