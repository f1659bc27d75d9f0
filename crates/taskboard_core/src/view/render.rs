//! Display model construction.
//!
//! # Invariants
//! - `DisplayModel::Empty` is produced exactly for an empty sequence.
//! - Preview truncation counts characters, never bytes.
//! - Truncation happens before escaping, so entities are never cut.

use super::escape::escape_html;
use crate::model::task::{Task, TaskId};

/// Description preview length used by the list view.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

const PREVIEW_ELLIPSIS: &str = "...";
const EMPTY_DESCRIPTION_PREVIEW: &str = "No description";
const EMPTY_DESCRIPTION_DETAIL: &str = "No description provided";
const LIST_DATE_FORMAT: &str = "%b %-d, %Y";
const DETAIL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Renderer output for the whole list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayModel {
    /// Show the empty-state indicator and no rows.
    Empty,
    /// Rows in repository order.
    Tasks(Vec<TaskListItem>),
}

impl DisplayModel {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Rows to draw; empty slice for the empty state.
    pub fn items(&self) -> &[TaskListItem] {
        match self {
            Self::Empty => &[],
            Self::Tasks(items) => items.as_slice(),
        }
    }
}

/// One list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListItem {
    /// Raw id for binding row actions; not meant for display.
    pub id: TaskId,
    /// Escaped title.
    pub title: String,
    /// Escaped, possibly truncated description or the empty placeholder.
    pub description_preview: String,
    /// Creation date, e.g. `Mar 5, 2024`.
    pub created_date: String,
    /// Drives the completed/pending styling.
    pub completed: bool,
}

/// Detail view for a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetailView {
    pub id: TaskId,
    pub title: String,
    /// Escaped full description or the empty placeholder.
    pub description: String,
    /// `Completed` or `Pending`.
    pub status_label: &'static str,
    pub completed: bool,
    pub created_at: String,
}

/// Renders the list with the default preview length.
pub fn render(tasks: &[Task]) -> DisplayModel {
    render_with_limit(tasks, DEFAULT_PREVIEW_CHARS)
}

/// Renders the list with a caller-chosen preview length.
pub fn render_with_limit(tasks: &[Task], preview_chars: usize) -> DisplayModel {
    if tasks.is_empty() {
        return DisplayModel::Empty;
    }

    DisplayModel::Tasks(
        tasks
            .iter()
            .map(|task| TaskListItem {
                id: task.id.clone(),
                title: escape_html(&task.title),
                description_preview: escape_html(&description_preview(
                    &task.description,
                    preview_chars,
                )),
                created_date: task.created_at.format(LIST_DATE_FORMAT).to_string(),
                completed: task.completed,
            })
            .collect(),
    )
}

/// Renders the detail view for one task.
pub fn render_detail(task: &Task) -> TaskDetailView {
    let description = if task.description.is_empty() {
        EMPTY_DESCRIPTION_DETAIL.to_string()
    } else {
        escape_html(&task.description)
    };

    TaskDetailView {
        id: task.id.clone(),
        title: escape_html(&task.title),
        description,
        status_label: if task.completed { "Completed" } else { "Pending" },
        completed: task.completed,
        created_at: task.created_at.format(DETAIL_DATE_FORMAT).to_string(),
    }
}

/// Unescaped description preview.
///
/// Returns the placeholder for an empty description, the full text when it
/// fits in `limit` characters, otherwise the first `limit` characters
/// followed by `...`.
pub fn description_preview(description: &str, limit: usize) -> String {
    if description.is_empty() {
        return EMPTY_DESCRIPTION_PREVIEW.to_string();
    }

    let mut chars = description.chars();
    let head: String = chars.by_ref().take(limit).collect();
    if chars.next().is_none() {
        return head;
    }
    head + PREVIEW_ELLIPSIS
}

#[cfg(test)]
mod tests {
    use super::{description_preview, render, render_detail, DisplayModel};
    use crate::model::task::{Task, TaskId};
    use chrono::{TimeZone, Utc};

    fn fixed_task(title: &str, description: &str, completed: bool) -> Task {
        Task::with_id(
            TaskId::parse("task_1_abc").expect("valid id"),
            title,
            description,
            completed,
            Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9)
                .single()
                .expect("valid timestamp"),
        )
        .expect("valid task")
    }

    #[test]
    fn empty_sequence_renders_empty_state() {
        assert_eq!(render(&[]), DisplayModel::Empty);
        assert!(render(&[]).items().is_empty());
    }

    #[test]
    fn preview_boundary_is_inclusive_at_limit() {
        let exact = "a".repeat(100);
        assert_eq!(description_preview(&exact, 100), exact);

        let long = "b".repeat(150);
        let preview = description_preview(&long, 100);
        assert_eq!(preview, format!("{}...", "b".repeat(100)));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let text = "é".repeat(101);
        let preview = description_preview(&text, 100);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.starts_with(&"é".repeat(100)));
    }

    #[test]
    fn empty_description_uses_placeholder() {
        assert_eq!(description_preview("", 100), "No description");
    }

    #[test]
    fn list_items_escape_and_format() {
        let task = fixed_task("<script>alert('x')</script>", "a & b", true);
        let model = render(std::slice::from_ref(&task));
        let item = &model.items()[0];

        assert!(!item.title.contains('<'));
        assert!(!item.title.contains('>'));
        assert_eq!(item.description_preview, "a &amp; b");
        assert_eq!(item.created_date, "Mar 5, 2024");
        assert!(item.completed);
        assert_eq!(item.id, task.id);
    }

    #[test]
    fn detail_view_shows_full_description_and_status() {
        let long = "x".repeat(150);
        let detail = render_detail(&fixed_task("t", &long, false));
        assert_eq!(detail.description, long);
        assert_eq!(detail.status_label, "Pending");
        assert_eq!(detail.created_at, "2024-03-05 14:07:09 UTC");

        let empty = render_detail(&fixed_task("t", "", true));
        assert_eq!(empty.description, "No description provided");
        assert_eq!(empty.status_label, "Completed");
    }
}
