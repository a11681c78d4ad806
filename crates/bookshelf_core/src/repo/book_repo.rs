//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide book CRUD over the `books` table.
//! - Own author/genre link replacement for a book with atomic semantics.
//!
//! # Invariants
//! - `create_book` inserts the row and all links in one transaction.
//! - `update_book` replaces the whole author and genre sets (delete-all then
//!   insert) in the same transaction as the title change.
//! - `delete_book` removes link rows before the book row, in one transaction.
//!   Authors and genres are never touched.

use super::{ensure_catalog_tables, RepoError, RepoResult};
use crate::model::book::{Book, BookDraft};
use crate::model::{AuthorId, BookId, EntityKind, GenreId};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::collections::BTreeSet;

/// Repository interface for book operations.
pub trait BookRepository {
    /// Lists every book ordered by id.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Gets one book by id. Absence is `Ok(None)`.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Counts stored books.
    fn count_books(&self) -> RepoResult<i64>;
    /// Creates the book with its links and returns the new id.
    fn create_book(&mut self, draft: &BookDraft) -> RepoResult<BookId>;
    /// Replaces title and both link sets.
    fn update_book(&mut self, id: BookId, draft: &BookDraft) -> RepoResult<()>;
    /// Deletes the book and its link rows.
    fn delete_book(&mut self, id: BookId) -> RepoResult<()>;
    /// Returns the author ids currently linked to the book.
    fn get_book_author_ids(&self, id: BookId) -> RepoResult<BTreeSet<AuthorId>>;
    /// Returns the genre ids currently linked to the book.
    fn get_book_genre_ids(&self, id: BookId) -> RepoResult<BTreeSet<GenreId>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a connection with the catalog schema.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_catalog_tables(conn)?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM books ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }
        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM books WHERE id = ?1;")?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }
        Ok(None)
    }

    fn count_books(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| row.get(0))?;
        Ok(count)
    }

    fn create_book(&mut self, draft: &BookDraft) -> RepoResult<BookId> {
        draft.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            "INSERT INTO books (title) VALUES (?1);",
            [draft.title.as_str()],
        )?;
        let book_id = tx.last_insert_rowid();
        insert_links(&tx, book_id, draft)?;
        tx.commit()?;

        Ok(book_id)
    }

    fn update_book(&mut self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
        draft.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let changed = tx.execute(
            "UPDATE books SET title = ?1 WHERE id = ?2;",
            params![draft.title.as_str(), id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Book, id));
        }

        delete_links(&tx, id)?;
        insert_links(&tx, id, draft)?;
        tx.commit()?;

        Ok(())
    }

    fn delete_book(&mut self, id: BookId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        delete_links(&tx, id)?;
        let changed = tx.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::not_found(EntityKind::Book, id));
        }
        tx.commit()?;

        Ok(())
    }

    fn get_book_author_ids(&self, id: BookId) -> RepoResult<BTreeSet<AuthorId>> {
        load_link_ids(
            self.conn,
            "SELECT author_id FROM book_author WHERE book_id = ?1;",
            id,
        )
    }

    fn get_book_genre_ids(&self, id: BookId) -> RepoResult<BTreeSet<GenreId>> {
        load_link_ids(
            self.conn,
            "SELECT genre_id FROM book_genre WHERE book_id = ?1;",
            id,
        )
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
    })
}

fn insert_links(tx: &Transaction<'_>, book_id: BookId, draft: &BookDraft) -> RepoResult<()> {
    let mut author_stmt =
        tx.prepare("INSERT INTO book_author (book_id, author_id) VALUES (?1, ?2);")?;
    for author_id in &draft.author_ids {
        author_stmt.execute(params![book_id, author_id])?;
    }

    let mut genre_stmt =
        tx.prepare("INSERT INTO book_genre (book_id, genre_id) VALUES (?1, ?2);")?;
    for genre_id in &draft.genre_ids {
        genre_stmt.execute(params![book_id, genre_id])?;
    }

    Ok(())
}

fn delete_links(tx: &Transaction<'_>, book_id: BookId) -> RepoResult<()> {
    tx.execute("DELETE FROM book_author WHERE book_id = ?1;", [book_id])?;
    tx.execute("DELETE FROM book_genre WHERE book_id = ?1;", [book_id])?;
    Ok(())
}

fn load_link_ids(conn: &Connection, sql: &str, book_id: BookId) -> RepoResult<BTreeSet<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query([book_id])?;
    let mut ids = BTreeSet::new();
    while let Some(row) = rows.next()? {
        ids.insert(row.get(0)?);
    }
    Ok(ids)
}
