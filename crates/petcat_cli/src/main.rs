//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `petcat_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use petcat_core::{Gender, LogNotifier, PetProvider, PetValues, SqlitePetStore};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("petcat_core version={}", petcat_core::core_version());

    // Exercise the full dispatch path against a throwaway database.
    let provider = PetProvider::new(SqlitePetStore::in_memory(), LogNotifier);

    let values = PetValues::new()
        .name("Toto")
        .breed("Terrier")
        .gender(Gender::Male)
        .weight(7);
    let created = provider.insert("pets", &values)?;
    println!("inserted {created}");

    let rows = provider.query(&created.to_string(), &[], None, None)?;
    println!("queried rows={}", rows.len());

    Ok(())
}
