//! Task repository over the storage adapter.
//!
//! # Responsibility
//! - Own the authoritative, ordered in-memory task sequence.
//! - Mirror every successful mutation to the storage slot.
//!
//! # Invariants
//! - Ids are unique across the sequence.
//! - Titles are trimmed and non-empty on both create and update.
//! - A mutation is committed in memory only after `save` succeeds, so a
//!   failed persist leaves memory and storage on the previous sequence.
//! - New tasks are prepended; edits and toggles keep relative order.

use crate::model::task::{
    normalize_description, normalize_title, Task, TaskId, TaskValidationError,
};
use crate::storage::{SlotStore, StorageError, TaskStorage};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error taxonomy surfaced to the controller.
#[derive(Debug)]
pub enum RepoError {
    /// Input violated a task invariant (blank title).
    Validation(TaskValidationError),
    /// No task with this id exists.
    NotFound(TaskId),
    /// Writing the slot failed; nothing was committed.
    Persistence(StorageError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Persistence(err) => write!(f, "failed to persist tasks: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StorageError> for RepoError {
    fn from(value: StorageError) -> Self {
        Self::Persistence(value)
    }
}

/// In-memory task sequence mirrored to one storage slot.
pub struct TaskRepository<S: SlotStore> {
    storage: TaskStorage<S>,
    tasks: Vec<Task>,
}

impl<S: SlotStore> TaskRepository<S> {
    /// Builds the repository from whatever the slot currently holds.
    pub fn open(storage: TaskStorage<S>) -> Self {
        let tasks = storage.load();
        info!(
            "event=repo_open module=repo status=ok slot={} count={}",
            storage.key(),
            tasks.len()
        );
        Self { storage, tasks }
    }

    /// Creates a task and prepends it.
    ///
    /// # Errors
    /// - `Validation` for a blank title; the sequence is unchanged.
    /// - `Persistence` when the slot write fails; the sequence is unchanged.
    pub fn create(&mut self, title: &str, description: &str, completed: bool) -> RepoResult<Task> {
        let mut task = Task::new(title, description, completed)?;
        while self.position(&task.id).is_some() {
            task.id = TaskId::generate();
        }

        let mut next = Vec::with_capacity(self.tasks.len() + 1);
        next.push(task.clone());
        next.extend(self.tasks.iter().cloned());
        self.commit(next, "task_create", &task.id)?;
        Ok(task)
    }

    /// Replaces title, description and completion of an existing task.
    ///
    /// `id` and `created_at` never change.
    pub fn update(
        &mut self,
        id: &TaskId,
        title: &str,
        description: &str,
        completed: bool,
    ) -> RepoResult<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| RepoError::NotFound(id.clone()))?;
        let title = normalize_title(title)?;

        let mut next = self.tasks.clone();
        let task = &mut next[index];
        task.title = title;
        task.description = normalize_description(description);
        task.completed = completed;
        let updated = task.clone();

        self.commit(next, "task_update", id)?;
        Ok(updated)
    }

    /// Removes a task if present.
    ///
    /// Returns `Ok(false)` without touching storage when `id` is unknown.
    pub fn remove(&mut self, id: &TaskId) -> RepoResult<bool> {
        if self.position(id).is_none() {
            return Ok(false);
        }

        let next = self
            .tasks
            .iter()
            .filter(|task| &task.id != id)
            .cloned()
            .collect();
        self.commit(next, "task_remove", id)?;
        Ok(true)
    }

    /// Flips the completion flag of one task.
    pub fn toggle_completion(&mut self, id: &TaskId) -> RepoResult<Task> {
        let index = self
            .position(id)
            .ok_or_else(|| RepoError::NotFound(id.clone()))?;

        let mut next = self.tasks.clone();
        next[index].toggle_completed();
        let toggled = next[index].clone();

        self.commit(next, "task_toggle", id)?;
        Ok(toggled)
    }

    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    /// Current sequence, most recently created first.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn storage(&self) -> &TaskStorage<S> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut TaskStorage<S> {
        &mut self.storage
    }

    fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| &task.id == id)
    }

    fn commit(&mut self, next: Vec<Task>, event: &'static str, id: &TaskId) -> RepoResult<()> {
        if let Err(err) = self.storage.save(&next) {
            warn!(
                "event={} module=repo status=error error_code=persist_failed task_id={} error={}",
                event, id, err
            );
            return Err(err.into());
        }
        self.tasks = next;
        info!(
            "event={} module=repo status=ok task_id={} count={}",
            event,
            id,
            self.tasks.len()
        );
        Ok(())
    }
}
