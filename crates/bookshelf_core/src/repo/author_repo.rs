//! Author repository contract and SQLite implementation.
//!
//! # Invariants
//! - Deleting a author removes its `book_author` link rows in the same
//!   transaction; linked books are kept.
//! - Names are not unique; duplicates are stored as separate rows.

use super::named::AUTHORS;
use super::{ensure_catalog_tables, RepoResult};
use crate::model::author::{validate_author_name, Author};
use crate::model::{AuthorId, BookId};
use rusqlite::Connection;

/// Repository interface for author operations.
pub trait AuthorRepository {
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    /// Lists authors linked to one book, ordered by id.
    fn list_authors_for_book(&self, book_id: BookId) -> RepoResult<Vec<Author>>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn count_authors(&self) -> RepoResult<i64>;
    fn create_author(&mut self, name: &str) -> RepoResult<AuthorId>;
    fn update_author(&mut self, id: AuthorId, name: &str) -> RepoResult<()>;
    fn delete_author(&mut self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a connection with the catalog schema.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_catalog_tables(conn)?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        AUTHORS.list(self.conn, |id, name| Author { id, name })
    }

    fn list_authors_for_book(&self, book_id: BookId) -> RepoResult<Vec<Author>> {
        AUTHORS.list_for_book(self.conn, book_id, |id, name| Author { id, name })
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        AUTHORS.get(self.conn, id, |id, name| Author { id, name })
    }

    fn count_authors(&self) -> RepoResult<i64> {
        AUTHORS.count(self.conn)
    }

    fn create_author(&mut self, name: &str) -> RepoResult<AuthorId> {
        validate_author_name(name)?;
        AUTHORS.create(self.conn, name)
    }

    fn update_author(&mut self, id: AuthorId, name: &str) -> RepoResult<()> {
        validate_author_name(name)?;
        AUTHORS.update(self.conn, id, name)
    }

    fn delete_author(&mut self, id: AuthorId) -> RepoResult<()> {
        AUTHORS.delete(self.conn, id)
    }
}
