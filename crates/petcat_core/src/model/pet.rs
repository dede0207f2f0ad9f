//! Pet schema contract, payloads and validation.
//!
//! # Responsibility
//! - Name the `pets` table and its columns in one place.
//! - Define `Pet` (fully decoded row), `PetValues` (partial write payload)
//!   and `PetRow` (partial query result).
//! - Enforce field constraints before payloads reach storage.
//!
//! # Invariants
//! - `id` is assigned by the storage backend and never mutated here.
//! - `PetValues` carries gender and weight as raw integers so out-of-range
//!   input is representable and rejected by `validate`, not by the type
//!   system.
//! - Breed and gender are validated independently of each other.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable table name shared with the storage backend.
pub const TABLE_PETS: &str = "pets";

/// Storage-assigned row identifier, immutable once created.
pub type PetId = i64;

/// Pet gender enumeration, stored as an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Unknown,
    Male,
    Female,
}

impl Gender {
    /// Returns the integer form persisted in the `gender` column.
    pub fn as_db(self) -> i64 {
        match self {
            Self::Unknown => 0,
            Self::Male => 1,
            Self::Female => 2,
        }
    }

    /// Parses the persisted integer form, rejecting undefined codes.
    pub fn from_db(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Unknown),
            1 => Some(Self::Male),
            2 => Some(Self::Female),
            _ => None,
        }
    }
}

/// Column identifiers for the `pets` table, used to build projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetColumn {
    Id,
    Name,
    Breed,
    Gender,
    Weight,
}

impl PetColumn {
    /// All columns in declaration order; the default projection.
    pub const ALL: [PetColumn; 5] = [
        PetColumn::Id,
        PetColumn::Name,
        PetColumn::Breed,
        PetColumn::Gender,
        PetColumn::Weight,
    ];

    /// Returns the stable column-name string shared with the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Breed => "breed",
            Self::Gender => "gender",
            Self::Weight => "weight",
        }
    }
}

impl Display for PetColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical fully-decoded pet record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    pub breed: String,
    pub gender: Gender,
    pub weight: i64,
}

/// Raw partial row returned by queries, aligned with the requested
/// projection. Columns outside the projection stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetRow {
    pub id: Option<PetId>,
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<Gender>,
    pub weight: Option<i64>,
}

impl TryFrom<PetRow> for Pet {
    type Error = PetColumn;

    /// Converts a full-projection row into a `Pet`.
    ///
    /// Fails with the first missing column when the row was read through a
    /// narrower projection.
    fn try_from(row: PetRow) -> Result<Self, PetColumn> {
        Ok(Pet {
            id: row.id.ok_or(PetColumn::Id)?,
            name: row.name.ok_or(PetColumn::Name)?,
            breed: row.breed.ok_or(PetColumn::Breed)?,
            gender: row.gender.ok_or(PetColumn::Gender)?,
            weight: row.weight.ok_or(PetColumn::Weight)?,
        })
    }
}

/// Kind of write a payload is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// All required fields must be present.
    Insert,
    /// Any subset of fields is allowed; present fields must still be valid.
    Update,
}

/// Partial field-value payload for insert/update requests.
///
/// Gender and weight stay raw integers here: callers hand this layer
/// untyped field sets, and rejecting bad values is the validator's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetValues {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub gender: Option<i64>,
    pub weight: Option<i64>,
}

impl PetValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender.as_db());
        self
    }

    /// Sets a raw gender code, bypassing the enum. Used by callers relaying
    /// untrusted input; `validate` rejects undefined codes.
    pub fn raw_gender(mut self, code: i64) -> Self {
        self.gender = Some(code);
        self
    }

    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.breed.is_none()
            && self.gender.is_none()
            && self.weight.is_none()
    }

    /// Checks this payload against the schema constraints.
    ///
    /// # Contract
    /// - `WriteKind::Insert` requires name, breed and gender to be present;
    ///   weight defaults to 0 at the schema level when absent.
    /// - `WriteKind::Update` validates only the fields that are present.
    /// - Rules apply independently; the first violation rejects the payload.
    pub fn validate(&self, kind: WriteKind) -> Result<(), PetValidationError> {
        match (&self.name, kind) {
            (Some(name), _) if name.is_empty() => return Err(PetValidationError::EmptyName),
            (None, WriteKind::Insert) => return Err(PetValidationError::MissingName),
            _ => {}
        }

        match (&self.breed, kind) {
            (Some(breed), _) if breed.is_empty() => return Err(PetValidationError::EmptyBreed),
            (None, WriteKind::Insert) => return Err(PetValidationError::MissingBreed),
            _ => {}
        }

        match (self.gender, kind) {
            (Some(code), _) if Gender::from_db(code).is_none() => {
                return Err(PetValidationError::InvalidGender(code));
            }
            (None, WriteKind::Insert) => return Err(PetValidationError::MissingGender),
            _ => {}
        }

        if let Some(weight) = self.weight {
            if weight < 0 {
                return Err(PetValidationError::NegativeWeight(weight));
            }
        }

        Ok(())
    }
}

/// Schema constraint violation, naming the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetValidationError {
    MissingName,
    EmptyName,
    MissingBreed,
    EmptyBreed,
    MissingGender,
    InvalidGender(i64),
    NegativeWeight(i64),
}

impl PetValidationError {
    /// Returns the column the violated rule belongs to.
    pub fn field(&self) -> PetColumn {
        match self {
            Self::MissingName | Self::EmptyName => PetColumn::Name,
            Self::MissingBreed | Self::EmptyBreed => PetColumn::Breed,
            Self::MissingGender | Self::InvalidGender(_) => PetColumn::Gender,
            Self::NegativeWeight(_) => PetColumn::Weight,
        }
    }
}

impl Display for PetValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingName => write!(f, "pet requires a name"),
            Self::EmptyName => write!(f, "pet name must not be empty"),
            Self::MissingBreed => write!(f, "pet requires a breed"),
            Self::EmptyBreed => write!(f, "pet breed must not be empty"),
            Self::MissingGender => write!(f, "pet requires a gender"),
            Self::InvalidGender(code) => write!(f, "pet gender code {code} is not defined"),
            Self::NegativeWeight(weight) => {
                write!(f, "pet weight must not be negative, got {weight}")
            }
        }
    }
}

impl Error for PetValidationError {}
