//! Book record and write draft.

use super::{require_text, AuthorId, BookId, EntityKind, GenreId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
}

/// Submitted book state: title plus the full author/genre selection.
///
/// Association ids are sets, so a selection never holds the same id twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author_ids: BTreeSet<AuthorId>,
    pub genre_ids: BTreeSet<GenreId>,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author_ids: impl IntoIterator<Item = AuthorId>,
        genre_ids: impl IntoIterator<Item = GenreId>,
    ) -> Self {
        Self {
            title: title.into(),
            author_ids: author_ids.into_iter().collect(),
            genre_ids: genre_ids.into_iter().collect(),
        }
    }

    /// Checks the title is not blank. Referenced ids are checked by the
    /// database's foreign keys on write.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(EntityKind::Book, "title", &self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::{Book, BookDraft};
    use crate::model::{EntityKind, ValidationError};
    use serde_json::json;

    #[test]
    fn draft_collapses_duplicate_ids() {
        let draft = BookDraft::new("Dune", [3, 1, 3], [2, 2]);
        assert_eq!(draft.author_ids.into_iter().collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(draft.genre_ids.len(), 1);
    }

    #[test]
    fn blank_title_is_rejected() {
        for title in ["", "   ", "\n\t"] {
            let err = BookDraft::new(title, [], []).validate().unwrap_err();
            assert_eq!(
                err,
                ValidationError::BlankField {
                    entity: EntityKind::Book,
                    field: "title"
                }
            );
        }
        assert!(BookDraft::new(" Emma ", [], []).validate().is_ok());
    }

    #[test]
    fn book_serializes_with_plain_field_names() {
        let book = Book {
            id: 7,
            title: "Ficciones".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({ "id": 7, "title": "Ficciones" })
        );
        assert_eq!(
            serde_json::to_value(EntityKind::Genre).unwrap(),
            json!("genre")
        );
    }
}
