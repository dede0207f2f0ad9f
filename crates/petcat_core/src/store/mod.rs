//! Storage backend contract for the pet catalog.
//!
//! # Responsibility
//! - Define table-scoped query/insert/delete/update primitives keyed by
//!   stable column names.
//! - Isolate SQL details from the provider dispatch layer.
//!
//! # Invariants
//! - Insert failure is reported through the `None` sentinel, not an `Err`;
//!   only transport/programming errors surface as `StoreError`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::pet::{PetColumn, PetId, PetRow, PetValues};
use rusqlite::types::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqlitePetStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend error for pet persistence and query operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted pet data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Selection predicate: a condition clause plus its bound arguments.
#[derive(Debug, Clone)]
pub struct Filter {
    /// `WHERE` body with `?` placeholders, e.g. `weight >= ?`.
    pub clause: String,
    /// Values bound to the placeholders in order.
    pub args: Vec<Value>,
}

impl Filter {
    pub fn new(clause: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    /// Filter matching exactly one row by id; used for item-path rewrites.
    pub fn by_id(id: PetId) -> Self {
        Self {
            clause: format!("{} = ?", PetColumn::Id),
            args: vec![Value::Integer(id)],
        }
    }
}

/// Table-scoped storage primitives the provider delegates to.
pub trait PetStore {
    /// Returns rows matching `filter`, restricted to `projection` columns
    /// (empty projection means all columns), ordered by the raw `order`
    /// clause when given.
    fn query(
        &self,
        projection: &[PetColumn],
        filter: Option<&Filter>,
        order: Option<&str>,
    ) -> StoreResult<Vec<PetRow>>;

    /// Inserts one row; `None` signals the backend rejected the write.
    fn insert(&self, values: &PetValues) -> StoreResult<Option<PetId>>;

    /// Updates rows matching `filter`, returning the affected count.
    fn update(&self, values: &PetValues, filter: Option<&Filter>) -> StoreResult<usize>;

    /// Deletes rows matching `filter`, returning the removed count.
    fn delete(&self, filter: Option<&Filter>) -> StoreResult<usize>;
}
