//! Transient UI state.
//!
//! Held by the caller and passed into rendering explicitly. Nothing here is
//! persisted.

use crate::model::task::TaskId;
use chrono::{Datelike, Months, NaiveDate};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The four switchable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewKind {
    #[default]
    Board,
    List,
    Calendar,
    Analytics,
}

impl ViewKind {
    pub const ALL: [ViewKind; 4] = [
        ViewKind::Board,
        ViewKind::List,
        ViewKind::Calendar,
        ViewKind::Analytics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
            Self::Calendar => "calendar",
            Self::Analytics => "analytics",
        }
    }
}

impl Display for ViewKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "board" => Ok(Self::Board),
            "list" => Ok(Self::List),
            "calendar" => Ok(Self::Calendar),
            "analytics" => Ok(Self::Analytics),
            other => Err(format!(
                "unknown view `{other}`; expected board|list|calendar|analytics"
            )),
        }
    }
}

/// Current view, calendar month cursor, pending delete and search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub current_view: ViewKind,
    /// Always the first day of the displayed month.
    pub month_cursor: NaiveDate,
    pub pending_delete: Option<TaskId>,
    /// Trimmed, non-empty search text filtering the board.
    pub search_query: Option<String>,
}

impl AppState {
    /// Board view, calendar on the month containing `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_view: ViewKind::Board,
            month_cursor: first_of_month(today),
            pending_delete: None,
            search_query: None,
        }
    }

    pub fn switch_view(&mut self, view: ViewKind) {
        self.current_view = view;
    }

    /// Moves the calendar to the month containing `date`.
    pub fn show_month(&mut self, date: NaiveDate) {
        self.month_cursor = first_of_month(date);
    }

    pub fn previous_month(&mut self) {
        if let Some(previous) = self.month_cursor.checked_sub_months(Months::new(1)) {
            self.month_cursor = previous;
        }
    }

    pub fn next_month(&mut self) {
        if let Some(next) = self.month_cursor.checked_add_months(Months::new(1)) {
            self.month_cursor = next;
        }
    }

    /// Sets the board filter. Blank text clears it.
    pub fn set_search(&mut self, query: &str) {
        let trimmed = query.trim();
        self.search_query = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }

    pub fn request_delete(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    /// Clears and returns the pending delete target.
    pub fn take_pending_delete(&mut self) -> Option<TaskId> {
        self.pending_delete.take()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::{AppState, ViewKind};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_navigation_crosses_year_boundaries() {
        let mut state = AppState::new(date(2026, 1, 31));
        assert_eq!(state.month_cursor, date(2026, 1, 1));

        state.previous_month();
        assert_eq!(state.month_cursor, date(2025, 12, 1));
        state.next_month();
        state.next_month();
        assert_eq!(state.month_cursor, date(2026, 2, 1));
    }

    #[test]
    fn blank_search_clears_filter() {
        let mut state = AppState::new(date(2026, 5, 5));
        state.set_search("  auth ");
        assert_eq!(state.search_query.as_deref(), Some("auth"));
        state.set_search("   ");
        assert_eq!(state.search_query, None);
    }

    #[test]
    fn view_names_parse() {
        for kind in ViewKind::ALL {
            assert_eq!(kind.as_str().parse::<ViewKind>().unwrap(), kind);
        }
        assert!("kanban".parse::<ViewKind>().is_err());
    }
}
