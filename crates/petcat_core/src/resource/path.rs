//! Resource path matching for `pets` and `pets/{id}`.
//!
//! # Responsibility
//! - Parse authority-relative paths into a resource kind.
//! - Keep the pattern table immutable and built exactly once.
//!
//! # Invariants
//! - An unmatched path is a distinct outcome; callers must not default it
//!   to either matched kind.
//! - Item ids are extracted from the trailing segment and must fit `i64`.

use crate::model::pet::PetId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Collection segment of the path scheme.
pub const PATH_PETS: &str = "pets";

/// Single pattern covering both recognized shapes; the optional trailing
/// group captures the item id.
static PET_PATH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pets(?:/(\d+))?$").expect("pet path pattern is valid"));

/// Matched resource kind for a pet catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetPath {
    /// The full pet collection (`pets`).
    Collection,
    /// One pet addressed by id (`pets/{id}`).
    Item(PetId),
}

impl PetPath {
    /// Classifies an authority-relative path.
    ///
    /// A single leading `/` is tolerated. Returns `None` for anything that
    /// is not `pets` or `pets/{digits}`, including ids too large for `i64`.
    pub fn parse(raw: &str) -> Option<PetPath> {
        let trimmed = raw.strip_prefix('/').unwrap_or(raw);
        let captures = PET_PATH_PATTERN.captures(trimmed)?;

        match captures.get(1) {
            Some(id) => id.as_str().parse::<PetId>().ok().map(PetPath::Item),
            None => Some(PetPath::Collection),
        }
    }

    /// Returns the item id, if this path addresses a single pet.
    pub fn item_id(&self) -> Option<PetId> {
        match self {
            Self::Collection => None,
            Self::Item(id) => Some(*id),
        }
    }
}

impl Display for PetPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Collection => f.write_str(PATH_PETS),
            Self::Item(id) => write!(f, "{PATH_PETS}/{id}"),
        }
    }
}
