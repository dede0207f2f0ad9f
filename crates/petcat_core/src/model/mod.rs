//! Pet domain model and schema contract.
//!
//! # Responsibility
//! - Define the canonical pet record and its column names.
//! - Define write payloads, query rows and the validation rules guarding
//!   every mutation.
//!
//! # Invariants
//! - Every pet accepted for storage has a non-empty name, a non-empty
//!   breed, a known gender and a non-negative weight.
//! - Validation runs before any storage mutation is attempted.

pub mod pet;
