//! Author record.

use super::{require_text, AuthorId, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
}

/// Checks a submitted author name is not blank.
pub fn validate_author_name(name: &str) -> Result<(), ValidationError> {
    require_text(EntityKind::Author, "name", name)
}
