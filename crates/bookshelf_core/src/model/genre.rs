//! Genre record.

use super::{require_text, GenreId, EntityKind, ValidationError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// Checks a submitted genre name is not blank.
pub fn validate_genre_name(name: &str) -> Result<(), ValidationError> {
    require_text(EntityKind::Genre, "name", name)
}
