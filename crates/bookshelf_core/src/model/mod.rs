//! Catalog domain model.
//!
//! # Responsibility
//! - Define the Book/Author/Genre records and write drafts.
//! - Own field validation shared by every write path.
//!
//! # Invariants
//! - Ids are surrogate SQLite row ids, assigned on insert and never reused.
//! - Required text fields are rejected when blank after trimming.

pub mod author;
pub mod book;
pub mod genre;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type BookId = i64;
pub type AuthorId = i64;
pub type GenreId = i64;

/// Entity kinds stored by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Book,
    Author,
    Genre,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Author => "author",
            Self::Genre => "genre",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input rejected before any SQL runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{entity} {field} must not be blank")]
    BlankField {
        entity: EntityKind,
        field: &'static str,
    },
}

/// Rejects blank required text fields.
pub(crate) fn require_text(
    entity: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { entity, field });
    }
    Ok(())
}
