//! Display formatting shared by the views.

use crate::model::task::TaskId;
use chrono::NaiveDate;

/// Length of the id prefix shown in text views.
pub const SHORT_ID_LEN: usize = 8;

/// `Mar 5` style date label.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// `October 2026` style month heading.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// First characters of an id, enough to address a task from the CLI.
pub fn short_id(id: &TaskId) -> &str {
    let text = id.as_str();
    match text.char_indices().nth(SHORT_ID_LEN) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Cuts `text` to `max_chars`, marking the cut with `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut = text
        .chars()
        .take(max_chars.saturating_sub(3))
        .collect::<String>();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::{month_title, short_date, short_id, truncate};
    use crate::model::task::TaskId;
    use chrono::NaiveDate;

    #[test]
    fn dates_format_like_the_board() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        assert_eq!(short_date(date), "Mar 5");
        assert_eq!(month_title(date), "March 2026");
    }

    #[test]
    fn short_id_handles_short_ids() {
        assert_eq!(short_id(&TaskId::from("abc")), "abc");
        assert_eq!(short_id(&TaskId::from("0123456789")), "01234567");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a long description", 9), "a long...");
    }
}
