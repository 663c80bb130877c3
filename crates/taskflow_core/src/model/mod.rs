//! Domain model for board/list/calendar projections.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep one task shape for every UI projection.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal from the collection; there are no tombstones.

pub mod task;
