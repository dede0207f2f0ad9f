//! Resource path scheme for the pet catalog.
//!
//! # Responsibility
//! - Classify incoming paths as collection, single item, or unmatched.
//! - Render canonical paths for results and change notifications.

pub mod path;
