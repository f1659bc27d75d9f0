//! View rendering for the task list.
//!
//! # Responsibility
//! - Turn the task sequence into a toolkit-independent display model.
//! - Escape every piece of user text before it reaches a display model.
//!
//! # Invariants
//! - Rendering is pure; it holds no state between calls.
//! - Display strings never carry raw `&`, `<`, `>`, `"` or `'` from user text.

pub mod escape;
pub mod render;

pub use escape::escape_html;
pub use render::{
    description_preview, render, render_detail, render_with_limit, DisplayModel, TaskDetailView,
    TaskListItem, DEFAULT_PREVIEW_CHARS,
};
