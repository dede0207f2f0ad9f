//! Resource access layer over the pet store.
//!
//! # Responsibility
//! - Dispatch requests by resource path to storage primitives.
//! - Enforce payload validation before any mutation.
//! - Publish change notifications after successful mutations.
//!
//! # Invariants
//! - Path and validation failures are reported before storage is touched;
//!   no partial writes.
//! - Notifications fire only for mutations that changed at least one row.

pub mod pet_provider;
