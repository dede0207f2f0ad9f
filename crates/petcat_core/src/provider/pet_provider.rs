//! URI-dispatched CRUD over the pet catalog.
//!
//! # Responsibility
//! - Match request paths, rewrite item-path filters to id equality, and
//!   delegate to the injected store.
//! - Emit one change notification per successful mutation.
//!
//! # Invariants
//! - Item-path requests discard any caller-supplied filter.
//! - Insert is legal on the collection path only and returns the item path
//!   of the new row.
//! - A failed insert (backend sentinel) emits no notification.

use crate::model::pet::{PetColumn, PetRow, PetValidationError, PetValues, WriteKind};
use crate::notify::ChangeNotifier;
use crate::resource::path::PetPath;
use crate::store::{Filter, PetStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Terminal error for one provider operation.
#[derive(Debug)]
pub enum ProviderError {
    /// The request path matches no known resource pattern.
    UnsupportedResource(String),
    /// The payload violates a schema constraint.
    Validation(PetValidationError),
    /// The backend rejected the write (insert sentinel).
    WriteFailed(String),
    /// Backend transport or data-integrity failure.
    Store(StoreError),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedResource(path) => write!(f, "unsupported resource path: {path}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::WriteFailed(path) => write!(f, "write failed for {path}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::UnsupportedResource(_) | Self::WriteFailed(_) => None,
        }
    }
}

impl From<PetValidationError> for ProviderError {
    fn from(value: PetValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ProviderError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Path-dispatched access layer over an injected store and notifier.
pub struct PetProvider<S: PetStore, N: ChangeNotifier> {
    store: S,
    notifier: N,
}

impl<S: PetStore, N: ChangeNotifier> PetProvider<S, N> {
    pub fn new(store: S, notifier: N) -> Self {
        Self { store, notifier }
    }

    /// Queries the collection or one item.
    ///
    /// # Contract
    /// - Collection path passes `filter` through unchanged.
    /// - Item path rewrites the filter to id equality, ignoring `filter`.
    /// - Empty `projection` selects all columns.
    pub fn query(
        &self,
        path: &str,
        projection: &[PetColumn],
        filter: Option<&Filter>,
        order: Option<&str>,
    ) -> ProviderResult<Vec<PetRow>> {
        let matched = self.match_path(path)?;

        let rows = match matched {
            PetPath::Collection => self.store.query(projection, filter, order)?,
            PetPath::Item(id) => self.store.query(projection, Some(&Filter::by_id(id)), order)?,
        };

        Ok(rows)
    }

    /// Inserts one pet through the collection path.
    ///
    /// # Contract
    /// - Only `pets` is a legal path; item paths are unsupported.
    /// - The payload is validated with insert rules before storage.
    /// - On success, returns `pets/{new_id}` and notifies the collection
    ///   path exactly once.
    pub fn insert(&self, path: &str, values: &PetValues) -> ProviderResult<PetPath> {
        match self.match_path(path)? {
            PetPath::Collection => {}
            PetPath::Item(_) => {
                return Err(ProviderError::UnsupportedResource(path.to_string()));
            }
        }

        values.validate(WriteKind::Insert)?;

        match self.store.insert(values)? {
            Some(id) => {
                info!("event=pet_insert module=provider status=ok id={id}");
                self.notifier.notify_change(&PetPath::Collection);
                Ok(PetPath::Item(id))
            }
            None => {
                error!("event=pet_insert module=provider status=error path={path} error_code=write_failed");
                Err(ProviderError::WriteFailed(path.to_string()))
            }
        }
    }

    /// Deletes rows addressed by the path.
    ///
    /// # Contract
    /// - Collection path uses the caller filter as-is; no filter removes
    ///   every row.
    /// - Item path rewrites to id equality, discarding the caller filter.
    /// - Notifies the request path only when at least one row was removed.
    pub fn delete(&self, path: &str, filter: Option<&Filter>) -> ProviderResult<usize> {
        let matched = self.match_path(path)?;

        let removed = match matched {
            PetPath::Collection => self.store.delete(filter)?,
            PetPath::Item(id) => self.store.delete(Some(&Filter::by_id(id)))?,
        };

        if removed > 0 {
            self.notifier.notify_change(&matched);
        }

        Ok(removed)
    }

    /// Updates rows addressed by the path with a partial payload.
    ///
    /// # Contract
    /// - Filter rewrite matches `delete`.
    /// - The payload is validated with update rules; an empty payload is a
    ///   no-op returning 0 without touching storage.
    /// - Notifies the request path only when at least one row changed.
    pub fn update(
        &self,
        path: &str,
        values: &PetValues,
        filter: Option<&Filter>,
    ) -> ProviderResult<usize> {
        let matched = self.match_path(path)?;

        values.validate(WriteKind::Update)?;
        if values.is_empty() {
            return Ok(0);
        }

        let changed = match matched {
            PetPath::Collection => self.store.update(values, filter)?,
            PetPath::Item(id) => self.store.update(values, Some(&Filter::by_id(id)))?,
        };

        if changed > 0 {
            self.notifier.notify_change(&matched);
        }

        Ok(changed)
    }

    fn match_path(&self, path: &str) -> ProviderResult<PetPath> {
        PetPath::parse(path).ok_or_else(|| ProviderError::UnsupportedResource(path.to_string()))
    }
}
