//! Shared SQL for single-name entities (authors, genres).
//!
//! Both tables have the same `(id, name)` shape and one link table back to
//! books, so the queries differ only by identifiers. Identifiers come from
//! the constants below, never from callers.

use super::{RepoError, RepoResult};
use crate::model::{BookId, EntityKind};
use rusqlite::{params, Connection, TransactionBehavior};

pub(super) struct NamedTable {
    pub entity: EntityKind,
    pub table: &'static str,
    pub link_table: &'static str,
    pub link_column: &'static str,
}

pub(super) const AUTHORS: NamedTable = NamedTable {
    entity: EntityKind::Author,
    table: "authors",
    link_table: "book_author",
    link_column: "author_id",
};

pub(super) const GENRES: NamedTable = NamedTable {
    entity: EntityKind::Genre,
    table: "genres",
    link_table: "book_genre",
    link_column: "genre_id",
};

impl NamedTable {
    pub fn list<T>(&self, conn: &Connection, map: impl Fn(i64, String) -> T) -> RepoResult<Vec<T>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY id ASC;",
            self.table
        ))?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(map(row.get("id")?, row.get("name")?));
        }
        Ok(items)
    }

    pub fn list_for_book<T>(
        &self,
        conn: &Connection,
        book_id: BookId,
        map: impl Fn(i64, String) -> T,
    ) -> RepoResult<Vec<T>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT e.id, e.name
             FROM {table} e
             INNER JOIN {link} l ON l.{column} = e.id
             WHERE l.book_id = ?1
             ORDER BY e.id ASC;",
            table = self.table,
            link = self.link_table,
            column = self.link_column,
        ))?;
        let mut rows = stmt.query([book_id])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(map(row.get("id")?, row.get("name")?));
        }
        Ok(items)
    }

    pub fn get<T>(
        &self,
        conn: &Connection,
        id: i64,
        map: impl Fn(i64, String) -> T,
    ) -> RepoResult<Option<T>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} WHERE id = ?1;",
            self.table
        ))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(map(row.get("id")?, row.get("name")?)));
        }
        Ok(None)
    }

    pub fn count(&self, conn: &Connection) -> RepoResult<i64> {
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {};", self.table), [], |row| {
            row.get(0)
        })?;
        Ok(count)
    }

    pub fn create(&self, conn: &Connection, name: &str) -> RepoResult<i64> {
        conn.execute(
            &format!("INSERT INTO {} (name) VALUES (?1);", self.table),
            [name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update(&self, conn: &Connection, id: i64, name: &str) -> RepoResult<()> {
        let changed = conn.execute(
            &format!("UPDATE {} SET name = ?1 WHERE id = ?2;", self.table),
            params![name, id],
        )?;
        if changed == 0 {
            return Err(RepoError::not_found(self.entity, id));
        }
        Ok(())
    }

    /// Deletes link rows naming `id`, then the entity row. Books stay.
    pub fn delete(&self, conn: &mut Connection, id: i64) -> RepoResult<()> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                self.link_table, self.link_column
            ),
            [id],
        )?;
        let changed = tx.execute(&format!("DELETE FROM {} WHERE id = ?1;", self.table), [id])?;
        if changed == 0 {
            return Err(RepoError::not_found(self.entity, id));
        }
        tx.commit()?;
        Ok(())
    }
}
