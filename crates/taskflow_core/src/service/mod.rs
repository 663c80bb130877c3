//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep view and CLI layers decoupled from storage details.

pub mod fixtures;
pub mod preferences;
pub mod task_store;
