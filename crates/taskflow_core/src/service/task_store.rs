//! Task store: CRUD and query use-cases over the task collection.
//!
//! # Responsibility
//! - Provide list/add/update/delete/get entry points.
//! - Provide status/priority aggregates and free-text search.
//! - Seed demo data into an empty board.
//!
//! # Invariants
//! - Every operation reloads the full collection through the repository.
//!   Mutations rewrite it wholesale; nothing is cached between calls.
//! - Generated ids never collide with an id already in the collection.
//! - Storage order is insertion order; no query reorders tasks.
//! - Not-found on update/delete is not an error.

use crate::clock::{Clock, SystemClock};
use crate::model::task::{
    NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus, TaskValidationError,
};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::service::fixtures::sample_tasks;
use chrono::NaiveDate;
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error.
#[derive(Debug)]
pub enum StoreError {
    Validation(TaskValidationError),
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for StoreError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Task counts per board column plus the collection size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub todo: usize,
    pub progress: usize,
    pub review: usize,
    pub completed: usize,
    pub total: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::Progress => self.progress,
            TaskStatus::Review => self.review,
            TaskStatus::Completed => self.completed,
        }
    }

    fn bump(&mut self, status: TaskStatus) {
        let slot = match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::Progress => &mut self.progress,
            TaskStatus::Review => &mut self.review,
            TaskStatus::Completed => &mut self.completed,
        };
        *slot += 1;
    }
}

/// Task counts per priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
        }
    }
}

/// Store facade over a whole-collection repository.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    clock: Box<dyn Clock>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store using the system clock.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }

    pub fn with_clock(repo: R, clock: impl Clock + 'static) -> Self {
        Self {
            repo,
            clock: Box::new(clock),
        }
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Returns the full collection in storage order.
    pub fn list(&self) -> StoreResult<Vec<Task>> {
        Ok(self.repo.load_all()?)
    }

    /// Appends a new task with a fresh id and creation timestamp.
    ///
    /// # Errors
    /// - `Validation` when the title is blank.
    /// - `Repo` when the collection cannot be read or written. Write
    ///   failures are returned as-is and never retried.
    pub fn add(&self, input: NewTask) -> StoreResult<Task> {
        let mut tasks = self.repo.load_all()?;
        let id = fresh_id(&tasks);
        let task = Task::from_new(id, self.clock.now(), input);
        task.validate()?;

        tasks.push(task.clone());
        self.save(&tasks, "task_add")?;

        info!(
            "event=task_add module=store status=ok id={} task_status={} priority={} count={}",
            task.id,
            task.status,
            task.priority,
            tasks.len()
        );
        Ok(task)
    }

    /// Shallow-merges `patch` into the task with `id`.
    ///
    /// Returns `Ok(None)` without writing when no task has that id.
    pub fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<Option<Task>> {
        let mut tasks = self.repo.load_all()?;
        let Some(index) = tasks.iter().position(|task| &task.id == id) else {
            info!("event=task_update module=store status=not_found id={id}");
            return Ok(None);
        };

        let mut merged = tasks[index].clone();
        patch.apply_to(&mut merged);
        merged.validate()?;
        tasks[index] = merged.clone();
        self.save(&tasks, "task_update")?;

        info!(
            "event=task_update module=store status=ok id={} task_status={} priority={}",
            merged.id, merged.status, merged.priority
        );
        Ok(Some(merged))
    }

    /// Removes the task with `id` if present. Absent ids are a no-op.
    pub fn delete(&self, id: &TaskId) -> StoreResult<()> {
        let mut tasks = self.repo.load_all()?;
        let before = tasks.len();
        tasks.retain(|task| &task.id != id);
        self.save(&tasks, "task_delete")?;

        info!(
            "event=task_delete module=store status=ok id={id} removed={}",
            before != tasks.len()
        );
        Ok(())
    }

    pub fn get_by_id(&self, id: &TaskId) -> StoreResult<Option<Task>> {
        Ok(self.repo.load_all()?.into_iter().find(|task| &task.id == id))
    }

    /// Tasks in one column, in storage order.
    pub fn query_by_status(&self, status: TaskStatus) -> StoreResult<Vec<Task>> {
        Ok(self
            .repo
            .load_all()?
            .into_iter()
            .filter(|task| task.status == status)
            .collect())
    }

    pub fn counts_by_status(&self) -> StoreResult<StatusCounts> {
        let tasks = self.repo.load_all()?;
        let mut counts = StatusCounts {
            total: tasks.len(),
            ..StatusCounts::default()
        };
        for task in &tasks {
            counts.bump(task.status);
        }
        Ok(counts)
    }

    pub fn counts_by_priority(&self) -> StoreResult<PriorityCounts> {
        let tasks = self.repo.load_all()?;
        let count = |priority| tasks.iter().filter(|task| task.priority == priority).count();
        Ok(PriorityCounts {
            low: count(Priority::Low),
            medium: count(Priority::Medium),
            high: count(Priority::High),
        })
    }

    /// Case-insensitive substring search over title, description and tags.
    ///
    /// Callers short-circuit blank queries to [`TaskStore::list`]; a blank
    /// query here matches every task.
    pub fn search(&self, query: &str) -> StoreResult<Vec<Task>> {
        let lowered = query.to_lowercase();
        Ok(self
            .repo
            .load_all()?
            .into_iter()
            .filter(|task| task.matches_query(&lowered))
            .collect())
    }

    /// Seeds demo tasks relative to the clock's current date.
    pub fn seed_if_empty(&self) -> StoreResult<bool> {
        self.seed_if_empty_on(self.clock.today())
    }

    /// Writes the five demo tasks only when the collection is empty.
    ///
    /// Returns whether seeding happened.
    pub fn seed_if_empty_on(&self, today: NaiveDate) -> StoreResult<bool> {
        let mut tasks = self.repo.load_all()?;
        if !tasks.is_empty() {
            return Ok(false);
        }

        for input in sample_tasks(today) {
            let id = fresh_id(&tasks);
            tasks.push(Task::from_new(id, self.clock.now(), input));
        }
        self.save(&tasks, "tasks_seed")?;

        info!(
            "event=tasks_seed module=store status=ok count={}",
            tasks.len()
        );
        Ok(true)
    }

    fn save(&self, tasks: &[Task], event: &str) -> StoreResult<()> {
        self.repo.save_all(tasks).map_err(|err| {
            error!("event={event} module=store status=error error={err}");
            StoreError::from(err)
        })
    }
}

fn fresh_id(existing: &[Task]) -> TaskId {
    loop {
        let candidate = TaskId::generate();
        if existing.iter().all(|task| task.id != candidate) {
            return candidate;
        }
    }
}
