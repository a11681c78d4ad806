//! Genre repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a genre removes its `book_genre` link rows in the same
//!   transaction; linked books are kept.
//! - Names are not unique; duplicates are stored as separate rows.

use super::named::GENRES;
use super::{ensure_catalog_tables, RepoResult};
use crate::model::genre::{validate_genre_name, Genre};
use crate::model::{BookId, GenreId};
use rusqlite::Connection;

/// Repository interface for genre operations.
pub trait GenreRepository {
    fn list_genres(&self) -> RepoResult<Vec<Genre>>;
    /// Lists genres linked to one book, ordered by id.
    fn list_genres_for_book(&self, book_id: BookId) -> RepoResult<Vec<Genre>>;
    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>>;
    fn count_genres(&self) -> RepoResult<i64>;
    fn create_genre(&mut self, name: &str) -> RepoResult<GenreId>;
    fn update_genre(&mut self, id: GenreId, name: &str) -> RepoResult<()>;
    fn delete_genre(&mut self, id: GenreId) -> RepoResult<()>;
}

/// SQLite-backed genre repository.
pub struct SqliteGenreRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteGenreRepository<'conn> {
    /// Constructs a repository from a connection with the catalog schema.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_catalog_tables(conn)?;
        Ok(Self { conn })
    }
}

impl GenreRepository for SqliteGenreRepository<'_> {
    fn list_genres(&self) -> RepoResult<Vec<Genre>> {
        GENRES.list(self.conn, |id, name| Genre { id, name })
    }

    fn list_genres_for_book(&self, book_id: BookId) -> RepoResult<Vec<Genre>> {
        GENRES.list_for_book(self.conn, book_id, |id, name| Genre { id, name })
    }

    fn get_genre(&self, id: GenreId) -> RepoResult<Option<Genre>> {
        GENRES.get(self.conn, id, |id, name| Genre { id, name })
    }

    fn count_genres(&self) -> RepoResult<i64> {
        GENRES.count(self.conn)
    }

    fn create_genre(&mut self, name: &str) -> RepoResult<GenreId> {
        validate_genre_name(name)?;
        GENRES.create(self.conn, name)
    }

    fn update_genre(&mut self, id: GenreId, name: &str) -> RepoResult<()> {
        validate_genre_name(name)?;
        GENRES.update(self.conn, id, name)
    }

    fn delete_genre(&mut self, id: GenreId) -> RepoResult<()> {
        GENRES.delete(self.conn, id)
    }
}
