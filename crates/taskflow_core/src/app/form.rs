//! Task create/edit form input.
//!
//! # Responsibility
//! - Parse raw form text (priority, status, due date, comma-separated tags)
//!   into typed `NewTask` / `TaskPatch` values.
//!
//! # Invariants
//! - Tags are trimmed and empty entries dropped; order is preserved.
//! - A blank due date or description clears the field on edit.

use crate::model::task::{NewTask, Task, TaskPatch, UnknownVariantError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid tag separator regex"));
static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Form input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingTitle,
    InvalidPriority(UnknownVariantError),
    InvalidStatus(UnknownVariantError),
    InvalidDate(String),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTitle => write!(f, "title is required"),
            Self::InvalidPriority(err) | Self::InvalidStatus(err) => write!(f, "{err}"),
            Self::InvalidDate(value) => {
                write!(f, "invalid due date `{value}`; expected YYYY-MM-DD")
            }
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidPriority(err) | Self::InvalidStatus(err) => Some(err),
            Self::MissingTitle | Self::InvalidDate(_) => None,
        }
    }
}

/// Raw field values as typed by the user. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
    pub tags: Option<String>,
}

impl TaskForm {
    /// Prefills the form from an existing task for editing.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone().unwrap_or_default()),
            priority: Some(task.priority.to_string()),
            status: Some(task.status.to_string()),
            due_date: Some(
                task.due_date
                    .map(|date| date.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            ),
            tags: Some(task.tags.join(", ")),
        }
    }

    /// Replaces fields with those supplied in `overrides`.
    pub fn with_overrides(self, overrides: TaskForm) -> Self {
        Self {
            title: overrides.title.or(self.title),
            description: overrides.description.or(self.description),
            priority: overrides.priority.or(self.priority),
            status: overrides.status.or(self.status),
            due_date: overrides.due_date.or(self.due_date),
            tags: overrides.tags.or(self.tags),
        }
    }

    /// Builds creation input. Missing priority/status fall back to
    /// `medium`/`todo`.
    pub fn to_new_task(&self) -> Result<NewTask, FormError> {
        let title = self
            .title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .ok_or(FormError::MissingTitle)?;

        let mut task = NewTask::new(title);
        task.description = self.description.as_deref().and_then(non_blank);
        if let Some(priority) = &self.priority {
            task.priority = priority.parse().map_err(FormError::InvalidPriority)?;
        }
        if let Some(status) = &self.status {
            task.status = status.parse().map_err(FormError::InvalidStatus)?;
        }
        if let Some(due_date) = &self.due_date {
            task.due_date = parse_due_date(due_date)?;
        }
        if let Some(tags) = &self.tags {
            task.tags = parse_tags(tags);
        }
        Ok(task)
    }

    /// Builds a patch containing only the supplied fields.
    pub fn to_patch(&self) -> Result<TaskPatch, FormError> {
        let title = match self.title.as_deref().map(str::trim) {
            Some("") => return Err(FormError::MissingTitle),
            other => other.map(str::to_string),
        };

        Ok(TaskPatch {
            title,
            description: self.description.as_deref().map(non_blank),
            priority: self
                .priority
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(FormError::InvalidPriority)?,
            status: self
                .status
                .as_deref()
                .map(str::parse)
                .transpose()
                .map_err(FormError::InvalidStatus)?,
            due_date: self.due_date.as_deref().map(parse_due_date).transpose()?,
            tags: self.tags.as_deref().map(parse_tags),
        })
    }
}

/// Splits comma-separated tag text, trimming and dropping empty entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    TAG_SEPARATOR_RE
        .split(raw.trim())
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `YYYY-MM-DD`. Blank input means "no due date".
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if !ISO_DATE_RE.is_match(trimmed) {
        return Err(FormError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidDate(trimmed.to_string()))
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_due_date, parse_tags, FormError, TaskForm};
    use crate::model::task::{NewTask, Priority, Task, TaskId, TaskStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn stored(input: NewTask) -> Task {
        let created_at = Utc.with_ymd_and_hms(2026, 5, 4, 12, 0, 0).unwrap();
        Task::from_new(TaskId::from("t-7"), created_at, input)
    }

    #[test]
    fn prefilled_form_submits_back_unchanged() {
        let full = stored(
            NewTask::new("Write Documentation")
                .description("Create README and API documentation")
                .priority(Priority::Low)
                .status(TaskStatus::Review)
                .due_date(NaiveDate::from_ymd_opt(2026, 5, 11).unwrap())
                .tags(["docs", "api"]),
        );
        let bare = stored(NewTask::new("Bare"));

        for task in [full, bare] {
            let patch = TaskForm::from_task(&task).to_patch().unwrap();
            let mut merged = task.clone();
            patch.apply_to(&mut merged);
            assert_eq!(merged, task);
        }
    }

    #[test]
    fn overrides_replace_only_supplied_fields() {
        let task = stored(NewTask::new("Plan").tags(["team"]));
        let form = TaskForm::from_task(&task).with_overrides(TaskForm {
            status: Some("completed".to_string()),
            ..TaskForm::default()
        });

        assert_eq!(form.title.as_deref(), Some("Plan"));
        assert_eq!(form.status.as_deref(), Some("completed"));
        assert_eq!(form.tags.as_deref(), Some("team"));
    }

    #[test]
    fn tags_are_split_trimmed_and_filtered() {
        assert_eq!(parse_tags(" backend,  security ,, api "), vec!["backend", "security", "api"]);
        assert!(parse_tags("  ").is_empty());
        assert!(parse_tags(",,").is_empty());
    }

    #[test]
    fn due_date_accepts_iso_or_blank_only() {
        assert_eq!(
            parse_due_date("2026-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28)
        );
        assert_eq!(parse_due_date("").unwrap(), None);
        assert!(matches!(parse_due_date("2026-02-30"), Err(FormError::InvalidDate(_))));
        assert!(matches!(parse_due_date("28/02/2026"), Err(FormError::InvalidDate(_))));
    }

    #[test]
    fn new_task_requires_title_and_applies_defaults() {
        let empty = TaskForm::default();
        assert_eq!(empty.to_new_task().unwrap_err(), FormError::MissingTitle);

        let form = TaskForm {
            title: Some("  Plan sprint ".to_string()),
            description: Some("   ".to_string()),
            tags: Some("planning, team".to_string()),
            ..TaskForm::default()
        };
        let task = form.to_new_task().unwrap();
        assert_eq!(task.title, "Plan sprint");
        assert_eq!(task.description, None);
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.tags, vec!["planning", "team"]);
    }

    #[test]
    fn patch_only_carries_supplied_fields() {
        let form = TaskForm {
            status: Some("review".to_string()),
            due_date: Some(String::new()),
            ..TaskForm::default()
        };
        let patch = form.to_patch().unwrap();
        assert_eq!(patch.status, Some(TaskStatus::Review));
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.title, None);
        assert_eq!(patch.tags, None);

        let bad = TaskForm {
            priority: Some("urgent".to_string()),
            ..TaskForm::default()
        };
        assert!(matches!(bad.to_patch(), Err(FormError::InvalidPriority(_))));
    }
}
