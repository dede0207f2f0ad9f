//! Core logic for the pet catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod provider;
pub mod resource;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::pet::{
    Gender, Pet, PetColumn, PetId, PetRow, PetValidationError, PetValues, WriteKind, TABLE_PETS,
};
pub use notify::{ChangeNotifier, LogNotifier};
pub use provider::pet_provider::{PetProvider, ProviderError, ProviderResult};
pub use resource::path::{PetPath, PATH_PETS};
pub use store::{Filter, PetStore, SqlitePetStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
