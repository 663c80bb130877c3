//! Task collection repository contract and key-value implementation.
//!
//! # Responsibility
//! - Load and save the complete task collection as one JSON document.
//! - Keep the storage key and JSON layout inside the persistence boundary.
//!
//! # Invariants
//! - `save_all` rewrites the whole collection; there is no partial write.
//! - An absent key reads as an empty collection.
//! - Storage order is preserved exactly across save/load.

use crate::model::task::Task;
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, error};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task collection.
pub const TASKS_STORAGE_KEY: &str = "taskflow_tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for collection load/save.
#[derive(Debug)]
pub enum RepoError {
    Storage(StorageError),
    /// Persisted text is not a valid task collection.
    InvalidData(String),
    Serialize(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::Serialize(err) => write!(f, "failed to serialize tasks: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Whole-collection persistence boundary.
///
/// Implementations may swap the backing store freely; the task store only
/// ever reads everything and writes everything.
pub trait TaskRepository {
    /// Reads the full collection in storage order.
    fn load_all(&self) -> RepoResult<Vec<Task>>;
    /// Replaces the full collection.
    fn save_all(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// Stores the collection as a JSON array under a single key.
pub struct KvTaskRepository<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> KvTaskRepository<S> {
    /// Uses the default `taskflow_tasks` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, TASKS_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }
}

impl<S: KeyValueStorage> TaskRepository for KvTaskRepository<S> {
    fn load_all(&self) -> RepoResult<Vec<Task>> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };

        let tasks = serde_json::from_str::<Vec<Task>>(&raw).map_err(|err| {
            error!(
                "event=tasks_load module=repo status=error key={} bytes={} error_code=invalid_json",
                self.key,
                raw.len()
            );
            RepoError::InvalidData(format!("key `{}`: {err}", self.key))
        })?;

        debug!(
            "event=tasks_load module=repo status=ok key={} count={}",
            self.key,
            tasks.len()
        );
        Ok(tasks)
    }

    fn save_all(&self, tasks: &[Task]) -> RepoResult<()> {
        let raw = serde_json::to_string(tasks).map_err(RepoError::Serialize)?;
        if let Err(err) = self.storage.set_item(&self.key, &raw) {
            error!(
                "event=tasks_save module=repo status=error key={} count={} bytes={} error={err}",
                self.key,
                tasks.len(),
                raw.len()
            );
            return Err(err.into());
        }

        debug!(
            "event=tasks_save module=repo status=ok key={} count={} bytes={}",
            self.key,
            tasks.len(),
            raw.len()
        );
        Ok(())
    }
}
