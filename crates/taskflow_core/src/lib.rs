//! Core domain logic for TaskFlow.
//! This crate is the single source of truth for task invariants.

pub mod app;
pub mod chart;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;
pub mod view;

pub use app::{BoardError, BoardResult, FormError, TaskBoard, TaskForm, Toast};
pub use chart::{ChartAdapter, ChartConfig, ChartKind};
pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::task::{
    NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus, TaskValidationError,
};
pub use repo::task_repo::{
    KvTaskRepository, RepoError, RepoResult, TaskRepository, TASKS_STORAGE_KEY,
};
pub use service::preferences::{Preferences, Theme, THEME_STORAGE_KEY};
pub use service::task_store::{PriorityCounts, StatusCounts, StoreError, StoreResult, TaskStore};
pub use storage::{KeyValueStorage, MemoryKvStorage, SqliteKvStorage, StorageError};
pub use view::{AppState, RenderedView, ViewKind};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
