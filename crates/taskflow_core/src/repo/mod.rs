//! Repository layer over the persisted task collection.
//!
//! # Responsibility
//! - Define the whole-collection load/save contract used by the store.
//! - Isolate serialization and storage-key details from query logic.
//!
//! # Invariants
//! - The entire collection is the unit of persistence.
//! - Malformed persisted data surfaces as `RepoError::InvalidData`.

pub mod task_repo;
