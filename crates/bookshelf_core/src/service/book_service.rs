//! Book use-case service.
//!
//! # Responsibility
//! - Provide book create/update/delete APIs with read-back of the stored state.
//! - Load the current author/genre selection for edit forms.
//!
//! # Invariants
//! - Updates use set-replacement: the stored selection equals the submitted
//!   one afterwards, never a union with the previous selection.
//! - Concurrent updates to one book are not coordinated; the last commit wins.

use crate::model::book::{Book, BookDraft};
use crate::model::{AuthorId, BookId, EntityKind, GenreId};
use crate::repo::book_repo::BookRepository;
use crate::repo::{RepoError, RepoResult};
use serde::Serialize;
use std::collections::BTreeSet;

/// Book row plus its current associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author_ids: BTreeSet<AuthorId>,
    pub genre_ids: BTreeSet<GenreId>,
}

/// Book service facade over repository implementations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Loads one book with its selections, or `None` when absent.
    pub fn book_detail(&self, id: BookId) -> RepoResult<Option<BookDetail>> {
        let Some(book) = self.repo.get_book(id)? else {
            return Ok(None);
        };
        Ok(Some(BookDetail {
            book,
            author_ids: self.repo.get_book_author_ids(id)?,
            genre_ids: self.repo.get_book_genre_ids(id)?,
        }))
    }

    /// Creates one book atomically and returns the stored state.
    pub fn create_book(&mut self, draft: &BookDraft) -> RepoResult<BookDetail> {
        let id = self.repo.create_book(draft)?;
        self.read_back(id)
    }

    /// Replaces title and selections atomically and returns the stored state.
    pub fn update_book(&mut self, id: BookId, draft: &BookDraft) -> RepoResult<BookDetail> {
        self.repo.update_book(id, draft)?;
        self.read_back(id)
    }

    pub fn delete_book(&mut self, id: BookId) -> RepoResult<()> {
        self.repo.delete_book(id)
    }

    fn read_back(&self, id: BookId) -> RepoResult<BookDetail> {
        self.book_detail(id)?
            .ok_or_else(|| RepoError::not_found(EntityKind::Book, id))
    }
}

#[cfg(test)]
mod tests {
    use super::BookService;
    use crate::model::book::{Book, BookDraft};
    use crate::model::{AuthorId, BookId, EntityKind, GenreId};
    use crate::repo::book_repo::BookRepository;
    use crate::repo::{RepoError, RepoResult};
    use std::collections::{BTreeMap, BTreeSet};

    /// Map-backed stand-in used to exercise the service without SQLite.
    #[derive(Default)]
    struct MemoryBooks {
        next_id: BookId,
        rows: BTreeMap<BookId, BookDraft>,
    }

    impl BookRepository for MemoryBooks {
        fn list_books(&self) -> RepoResult<Vec<Book>> {
            Ok(self
                .rows
                .iter()
                .map(|(id, draft)| Book {
                    id: *id,
                    title: draft.title.clone(),
                })
                .collect())
        }

        fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
            Ok(self.rows.get(&id).map(|draft| Book {
                id,
                title: draft.title.clone(),
            }))
        }

        fn count_books(&self) -> RepoResult<i64> {
            Ok(self.rows.len() as i64)
        }

        fn create_book(&mut self, draft: &BookDraft) -> RepoResult<BookId> {
            draft.validate()?;
            self.next_id += 1;
            self.rows.insert(self.next_id, draft.clone());
            Ok(self.next_id)
        }

        fn update_book(&mut self, id: BookId, draft: &BookDraft) -> RepoResult<()> {
            draft.validate()?;
            match self.rows.get_mut(&id) {
                Some(row) => {
                    *row = draft.clone();
                    Ok(())
                }
                None => Err(RepoError::NotFound {
                    entity: EntityKind::Book,
                    id,
                }),
            }
        }

        fn delete_book(&mut self, id: BookId) -> RepoResult<()> {
            self.rows
                .remove(&id)
                .map(|_| ())
                .ok_or(RepoError::NotFound {
                    entity: EntityKind::Book,
                    id,
                })
        }

        fn get_book_author_ids(&self, id: BookId) -> RepoResult<BTreeSet<AuthorId>> {
            Ok(self
                .rows
                .get(&id)
                .map(|draft| draft.author_ids.clone())
                .unwrap_or_default())
        }

        fn get_book_genre_ids(&self, id: BookId) -> RepoResult<BTreeSet<GenreId>> {
            Ok(self
                .rows
                .get(&id)
                .map(|draft| draft.genre_ids.clone())
                .unwrap_or_default())
        }
    }

    #[test]
    fn create_reads_back_submitted_state() {
        let mut service = BookService::new(MemoryBooks::default());
        let detail = service
            .create_book(&BookDraft::new("Middlemarch", [1, 2], [7]))
            .unwrap();

        assert_eq!(detail.book.title, "Middlemarch");
        assert_eq!(detail.author_ids, BTreeSet::from([1, 2]));
        assert_eq!(detail.genre_ids, BTreeSet::from([7]));
    }

    #[test]
    fn book_detail_for_missing_id_is_none() {
        let service = BookService::new(MemoryBooks::default());
        assert!(service.book_detail(42).unwrap().is_none());
    }

    #[test]
    fn update_of_missing_book_is_not_found() {
        let mut service = BookService::new(MemoryBooks::default());
        let err = service
            .update_book(9, &BookDraft::new("Ghost", [], []))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::NotFound {
                entity: EntityKind::Book,
                id: 9
            }
        ));
    }
}
