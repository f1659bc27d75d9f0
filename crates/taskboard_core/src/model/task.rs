//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by repository, storage and views.
//! - Normalize user text (trim) and enforce the non-empty title rule.
//!
//! # Invariants
//! - `id` is non-empty, stable and never reused for another task.
//! - `title` is trimmed and never empty.
//! - `created_at` is captured once at creation with millisecond precision.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_ID_PREFIX: &str = "task_";
const TASK_ID_RANDOM_CHARS: usize = 9;

/// Validation failures for task identity and text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only after trimming.
    EmptyTitle,
    /// Identifier is empty or whitespace-only.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be blank"),
            Self::EmptyId => write!(f, "task id must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// Opaque task identifier.
///
/// Generated ids look like `task_<unix-millis>_<9 alphanumerics>`; ids read
/// back from storage are accepted as any non-blank string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh id from wall-clock millis plus a random suffix.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{TASK_ID_PREFIX}{millis}_{}",
            &random[..TASK_ID_RANDOM_CHARS]
        ))
    }

    /// Wraps an existing identifier.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyId` for blank input.
    pub fn parse(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

/// Canonical task record.
///
/// Serialized with camelCase field names (`createdAt`) to stay compatible
/// with slots written by earlier browser builds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaskRecord")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Display-only; list order is insertion order, not this timestamp.
    pub created_at: DateTime<Utc>,
}

/// Unvalidated wire shape used during deserialization.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: TaskId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        Self::with_id(
            record.id,
            &record.title,
            &record.description,
            record.completed,
            record.created_at,
        )
    }
}

impl Task {
    /// Creates a task with a generated id and the current timestamp.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyTitle` when `title` trims to "".
    pub fn new(
        title: &str,
        description: &str,
        completed: bool,
    ) -> Result<Self, TaskValidationError> {
        Self::with_id(
            TaskId::generate(),
            title,
            description,
            completed,
            Utc::now().trunc_subsecs(3),
        )
    }

    /// Creates a task with caller-provided identity and timestamp.
    ///
    /// Text fields are trimmed the same way as in [`Task::new`].
    pub fn with_id(
        id: TaskId,
        title: &str,
        description: &str,
        completed: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            id,
            title: normalize_title(title)?,
            description: normalize_description(description),
            completed,
            created_at,
        })
    }

    /// Checks the record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

/// Trims a title and rejects blank values.
pub fn normalize_title(title: &str) -> Result<String, TaskValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Trims a description; empty is allowed.
pub fn normalize_description(description: &str) -> String {
    description.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::{normalize_title, Task, TaskId, TaskValidationError};

    #[test]
    fn generated_ids_follow_prefix_shape() {
        let id = TaskId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_ids_are_distinct() {
        let first = TaskId::generate();
        let second = TaskId::generate();
        assert_ne!(first, second);
    }

    #[test]
    fn parse_rejects_blank_id() {
        assert_eq!(TaskId::parse("  "), Err(TaskValidationError::EmptyId));
    }

    #[test]
    fn new_trims_text_fields() {
        let task = Task::new("  Buy milk ", "  2% ", false).expect("valid task");
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "2%");
        assert!(!task.completed);
    }

    #[test]
    fn new_rejects_whitespace_title() {
        let err = Task::new(" \t\n", "", false).expect_err("blank title must fail");
        assert_eq!(err, TaskValidationError::EmptyTitle);
    }

    #[test]
    fn normalize_title_keeps_inner_whitespace() {
        assert_eq!(normalize_title(" a  b ").expect("valid"), "a  b");
    }

    #[test]
    fn deserialized_records_are_trimmed_and_validated() {
        let task: Task = serde_json::from_str(
            r#"{"id":"task_1_a","title":"  padded  ","description":"  d ","completed":true,"createdAt":"2024-01-02T03:04:05.000Z"}"#,
        )
        .expect("padded record should load");
        assert_eq!(task.title, "padded");
        assert_eq!(task.description, "d");
        assert_eq!(task.validate(), Ok(()));

        let blank = serde_json::from_str::<Task>(
            r#"{"id":"task_1_a","title":"  ","createdAt":"2024-01-02T03:04:05.000Z"}"#,
        );
        assert!(blank.is_err());
    }

    #[test]
    fn toggle_flips_only_completion() {
        let mut task = Task::new("x", "y", false).expect("valid task");
        let before = task.clone();
        task.toggle_completed();
        assert!(task.completed);
        assert_eq!(task.id, before.id);
        assert_eq!(task.created_at, before.created_at);
    }
}
