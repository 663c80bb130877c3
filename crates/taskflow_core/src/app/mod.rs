//! Application layer tying the store, preferences, UI state and charts.

pub mod controller;
pub mod form;

pub use controller::{BoardError, BoardResult, TaskBoard, Toast};
pub use form::{parse_due_date, parse_tags, FormError, TaskForm};
