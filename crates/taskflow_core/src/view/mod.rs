//! View models and plain-text renderers for the four board views.
//!
//! # Responsibility
//! - Turn store query results plus explicit `AppState` into view models.
//! - Render view models as terminal text via `Display`.
//!
//! # Invariants
//! - Builders are pure: same tasks, state and date give the same view.
//! - Views never read or write storage themselves.

pub mod analytics;
pub mod board;
pub mod calendar;
pub mod format;
pub mod list;
pub mod state;

pub use analytics::AnalyticsView;
pub use board::{BoardColumn, BoardView, StatsView, TaskCard};
pub use calendar::{CalendarCell, CalendarMonth};
pub use list::{ListRow, ListView};
pub use state::{AppState, ViewKind};

/// Output of rendering the active view.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedView {
    Board(BoardView),
    List(ListView),
    Calendar(CalendarMonth),
    Analytics(AnalyticsView),
}

impl RenderedView {
    pub fn kind(&self) -> ViewKind {
        match self {
            Self::Board(_) => ViewKind::Board,
            Self::List(_) => ViewKind::List,
            Self::Calendar(_) => ViewKind::Calendar,
            Self::Analytics(_) => ViewKind::Analytics,
        }
    }
}

impl std::fmt::Display for RenderedView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(view) => view.fmt(f),
            Self::List(view) => view.fmt(f),
            Self::Calendar(view) => view.fmt(f),
            Self::Analytics(view) => view.fmt(f),
        }
    }
}
