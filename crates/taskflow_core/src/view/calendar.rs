//! Month calendar view.
//!
//! # Invariants
//! - The grid always has 42 cells (six weeks).
//! - The first cell is the Sunday on or before the first of the month.

use super::format::month_title;
use crate::model::task::Task;
use chrono::{Datelike, Days, NaiveDate};
use std::fmt::{Display, Formatter};

pub const GRID_CELLS: usize = 42;
const MAX_DOTS: usize = 3;
const WEEKDAY_HEADER: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    /// Number of tasks due on `date`.
    pub task_count: usize,
}

impl CalendarCell {
    /// Dots drawn in the cell, capped at three.
    pub fn dots(&self) -> usize {
        self.task_count.min(MAX_DOTS)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    /// First day of the displayed month.
    pub month: NaiveDate,
    pub title: String,
    pub cells: Vec<CalendarCell>,
}

impl CalendarMonth {
    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells.iter().find(|cell| cell.date == date)
    }
}

/// Builds the six-week grid for the month containing `cursor`.
pub fn build_calendar(cursor: NaiveDate, tasks: &[Task], today: NaiveDate) -> CalendarMonth {
    let month = cursor.with_day(1).unwrap_or(cursor);
    let lead_days = u64::from(month.weekday().num_days_from_sunday());
    let grid_start = month.checked_sub_days(Days::new(lead_days)).unwrap_or(month);

    let cells = grid_start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarCell {
            date,
            in_current_month: date.month() == month.month() && date.year() == month.year(),
            is_today: date == today,
            task_count: tasks
                .iter()
                .filter(|task| task.due_date == Some(date))
                .count(),
        })
        .collect();

    CalendarMonth {
        month,
        title: month_title(month),
        cells,
    }
}

impl Display for CalendarMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:^49}", self.title)?;
        for name in WEEKDAY_HEADER {
            write!(f, "{name:<7}")?;
        }
        writeln!(f)?;

        for week in self.cells.chunks(7) {
            for cell in week {
                let day = if cell.in_current_month {
                    format!("{:>2}", cell.date.day())
                } else {
                    " .".to_string()
                };
                let marker = if cell.is_today { '*' } else { ' ' };
                let dots = "o".repeat(cell.dots());
                write!(f, "{day}{marker}{dots:<4}")?;
            }
            writeln!(f)?;
        }
        write!(f, "* today   o task due")
    }
}
