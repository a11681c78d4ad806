//! Catalog store for the Bookshelf library catalog.
//! This crate owns the schema and every read/write against it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{init_schema, open_db, open_db_in_memory, CatalogStore, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogSink, LoggingError};
pub use model::author::Author;
pub use model::book::{Book, BookDraft};
pub use model::genre::Genre;
pub use model::{AuthorId, BookId, EntityKind, GenreId, ValidationError};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::genre_repo::{GenreRepository, SqliteGenreRepository};
pub use repo::{RepoError, RepoResult};
pub use service::book_service::{BookDetail, BookService};

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
