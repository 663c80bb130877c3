//! Board controller: user actions in, store mutations and views out.
//!
//! # Responsibility
//! - Route user actions (form submit, move, delete, search, navigation,
//!   theme) to the store and preferences.
//! - Keep transient UI state in an explicit `AppState`.
//! - Refresh chart data after every mutation.
//!
//! # Invariants
//! - Only the active view is rendered on a view switch; switching to
//!   analytics refreshes chart data first.
//! - Success toasts are returned only when a mutation actually happened.
//! - Deletion needs a request followed by a confirmation.

use super::form::{FormError, TaskForm};
use crate::chart::ChartAdapter;
use crate::model::task::{Task, TaskId, TaskPatch, TaskStatus};
use crate::repo::task_repo::TaskRepository;
use crate::service::preferences::{Preferences, Theme};
use crate::service::task_store::{StoreError, TaskStore};
use crate::storage::{KeyValueStorage, StorageError};
use crate::view::analytics::build_analytics;
use crate::view::board::build_board;
use crate::view::calendar::build_calendar;
use crate::view::list::build_list;
use crate::view::{
    AnalyticsView, AppState, BoardView, CalendarMonth, ListView, RenderedView, StatsView, ViewKind,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Controller-level error.
#[derive(Debug)]
pub enum BoardError {
    Store(StoreError),
    Storage(StorageError),
    Form(FormError),
    /// No task id equals or starts with the given text.
    UnknownTask(String),
    /// More than one task id starts with the given text.
    AmbiguousTask { prefix: String, matches: usize },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Form(err) => write!(f, "{err}"),
            Self::UnknownTask(text) => write!(f, "no task matches id `{text}`"),
            Self::AmbiguousTask { prefix, matches } => {
                write!(f, "id prefix `{prefix}` matches {matches} tasks")
            }
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Form(err) => Some(err),
            Self::UnknownTask(_) | Self::AmbiguousTask { .. } => None,
        }
    }
}

impl From<StoreError> for BoardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<StorageError> for BoardError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<FormError> for BoardError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

/// Transient confirmation shown after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toast {
    Created,
    Updated,
    Deleted,
    Moved,
}

impl Toast {
    pub fn message(self) -> &'static str {
        match self {
            Self::Created => "Task created successfully!",
            Self::Updated => "Task updated successfully!",
            Self::Deleted => "Task deleted successfully!",
            Self::Moved => "Task moved successfully!",
        }
    }
}

impl Display for Toast {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Task board application over a task repository and a preference store.
pub struct TaskBoard<R: TaskRepository, S: KeyValueStorage> {
    store: TaskStore<R>,
    preferences: Preferences<S>,
    state: AppState,
    charts: ChartAdapter,
}

impl<R: TaskRepository, S: KeyValueStorage> TaskBoard<R, S> {
    /// Builds the controller with board view active and charts initialized.
    pub fn open(store: TaskStore<R>, preferences: Preferences<S>) -> BoardResult<Self> {
        let state = AppState::new(store.clock().today());
        let charts = ChartAdapter::init(&store)?;
        Ok(Self {
            store,
            preferences,
            state,
            charts,
        })
    }

    pub fn store(&self) -> &TaskStore<R> {
        &self.store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn charts(&self) -> &ChartAdapter {
        &self.charts
    }

    /// Seeds demo tasks into an empty board and refreshes charts.
    pub fn seed_if_empty(&mut self) -> BoardResult<bool> {
        let seeded = self.store.seed_if_empty()?;
        if seeded {
            self.charts.refresh(&self.store)?;
        }
        Ok(seeded)
    }

    pub fn theme(&self) -> BoardResult<Theme> {
        Ok(self.preferences.theme()?)
    }

    pub fn set_theme(&mut self, theme: Theme) -> BoardResult<()> {
        Ok(self.preferences.set_theme(theme)?)
    }

    pub fn toggle_theme(&mut self) -> BoardResult<Theme> {
        Ok(self.preferences.toggle_theme()?)
    }

    /// Activates `view` and renders it.
    pub fn switch_view(&mut self, view: ViewKind) -> BoardResult<RenderedView> {
        self.state.switch_view(view);
        info!("event=view_switch module=app status=ok view={view}");
        if view == ViewKind::Analytics {
            self.charts.refresh(&self.store)?;
        }
        self.render()
    }

    /// Renders the active view.
    pub fn render(&self) -> BoardResult<RenderedView> {
        Ok(match self.state.current_view {
            ViewKind::Board => RenderedView::Board(self.render_board()?),
            ViewKind::List => RenderedView::List(self.render_list()?),
            ViewKind::Calendar => RenderedView::Calendar(self.render_calendar()?),
            ViewKind::Analytics => RenderedView::Analytics(self.render_analytics()?),
        })
    }

    /// Board columns; only search results while a search is active.
    pub fn render_board(&self) -> BoardResult<BoardView> {
        let query = self.state.search_query.as_deref();
        let tasks = match query {
            Some(query) => self.store.search(query)?,
            None => self.store.list()?,
        };
        Ok(build_board(&tasks, self.store.clock().today(), query))
    }

    pub fn render_list(&self) -> BoardResult<ListView> {
        Ok(build_list(&self.store.list()?))
    }

    pub fn render_calendar(&self) -> BoardResult<CalendarMonth> {
        Ok(build_calendar(
            self.state.month_cursor,
            &self.store.list()?,
            self.store.clock().today(),
        ))
    }

    pub fn render_analytics(&self) -> BoardResult<AnalyticsView> {
        Ok(build_analytics(
            self.store.counts_by_status()?,
            self.store.counts_by_priority()?,
            &self.charts,
        ))
    }

    pub fn stats(&self) -> BoardResult<StatsView> {
        Ok(StatsView {
            counts: self.store.counts_by_status()?,
        })
    }

    /// Creates a task, or edits `editing` when set.
    ///
    /// Returns the stored task and its toast; `None` when the edited task
    /// no longer exists.
    pub fn submit(
        &mut self,
        editing: Option<&TaskId>,
        form: &TaskForm,
    ) -> BoardResult<Option<(Task, Toast)>> {
        let outcome = match editing {
            Some(id) => {
                let patch = form.to_patch()?;
                self.store
                    .update(id, &patch)?
                    .map(|task| (task, Toast::Updated))
            }
            None => Some((self.store.add(form.to_new_task()?)?, Toast::Created)),
        };

        if outcome.is_some() {
            self.charts.refresh(&self.store)?;
        }
        Ok(outcome)
    }

    /// Form prefilled from the stored task, `None` for unknown ids.
    pub fn edit_form(&self, id: &TaskId) -> BoardResult<Option<TaskForm>> {
        Ok(self.store.get_by_id(id)?.as_ref().map(TaskForm::from_task))
    }

    /// Drops a card into another column.
    pub fn move_task(&mut self, id: &TaskId, status: TaskStatus) -> BoardResult<Option<Toast>> {
        let moved = self.store.update(id, &TaskPatch::status(status))?;
        if moved.is_none() {
            return Ok(None);
        }
        self.charts.refresh(&self.store)?;
        Ok(Some(Toast::Moved))
    }

    /// Marks a task for deletion and returns it for the confirmation prompt.
    ///
    /// Unknown ids leave nothing pending.
    pub fn request_delete(&mut self, id: &TaskId) -> BoardResult<Option<Task>> {
        let task = self.store.get_by_id(id)?;
        match &task {
            Some(found) => self.state.request_delete(found.id.clone()),
            None => self.state.cancel_delete(),
        }
        Ok(task)
    }

    /// Deletes the pending task. No-op when nothing is pending.
    pub fn confirm_delete(&mut self) -> BoardResult<Option<Toast>> {
        let Some(id) = self.state.take_pending_delete() else {
            return Ok(None);
        };
        self.store.delete(&id)?;
        self.charts.refresh(&self.store)?;
        Ok(Some(Toast::Deleted))
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    /// Filters the board in place. Blank text restores the full board.
    pub fn search(&mut self, query: &str) -> BoardResult<BoardView> {
        self.state.set_search(query);
        self.render_board()
    }

    pub fn previous_month(&mut self) -> BoardResult<CalendarMonth> {
        self.state.previous_month();
        self.render_calendar()
    }

    pub fn next_month(&mut self) -> BoardResult<CalendarMonth> {
        self.state.next_month();
        self.render_calendar()
    }

    /// Jumps the calendar to the month containing `date`.
    pub fn show_month(&mut self, date: chrono::NaiveDate) -> BoardResult<CalendarMonth> {
        self.state.show_month(date);
        self.render_calendar()
    }

    /// Resolves a full id or a unique id prefix to a task id.
    pub fn resolve_id(&self, text: &str) -> BoardResult<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::UnknownTask(text.to_string()));
        }

        let tasks = self.store.list()?;
        if let Some(exact) = tasks.iter().find(|task| task.id.as_str() == text) {
            return Ok(exact.id.clone());
        }

        let mut matches = tasks
            .into_iter()
            .filter(|task| task.id.as_str().starts_with(text))
            .map(|task| task.id);
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(BoardError::UnknownTask(text.to_string())),
            (Some(_), Some(_)) => Err(BoardError::AmbiguousTask {
                prefix: text.to_string(),
                matches: 2 + matches.count(),
            }),
        }
    }
}
