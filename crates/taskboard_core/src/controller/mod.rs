//! Form and notification controller.
//!
//! # Responsibility
//! - Translate user events (submit, edit, delete, toggle, view) into
//!   repository calls.
//! - Re-render the full list onto the host surface after every mutation.
//! - Convert repository errors into notifications and the error banner.
//!
//! # Invariants
//! - Repository errors never propagate past this boundary.
//! - Blank titles are rejected before the repository is called.
//! - Deletion runs only after the confirmation prompt returns `true`.
//! - A failed save keeps the form contents so user input is not lost.

pub mod form;
pub mod notification;

use crate::config::AppConfig;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::storage::{SlotStore, TaskStorage};
use crate::view::{render_detail, render_with_limit, DisplayModel, TaskDetailView};
use form::FormState;
use log::{debug, info, warn};
use notification::{
    ErrorBanner, Notification, NotificationCenter, NotificationId, NotificationKind,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this task?";

const MSG_TITLE_REQUIRED: &str = "Please enter a task title!";
const MSG_TASK_ADDED: &str = "Task added successfully!";
const MSG_TASK_UPDATED: &str = "Task updated successfully!";
const MSG_TASK_DELETED: &str = "Task deleted successfully!";
const MSG_TASK_MISSING: &str = "Task not found!";
const MSG_SAVE_FAILED: &str = "Failed to save tasks";
const BANNER_SAVE_FAILED: &str = "Failed to save tasks. Please reload the application.";

/// The host's list region was not available for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTargetMissing {
    pub region: &'static str,
}

impl Display for RenderTargetMissing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "render target missing: {}", self.region)
    }
}

impl Error for RenderTargetMissing {}

/// Host presentation target for the list display model.
pub trait Surface {
    /// Replaces the whole list region (rows plus empty-state indicator).
    fn replace_list(&mut self, model: &DisplayModel) -> Result<(), RenderTargetMissing>;
}

/// Event handler entry points bound to one repository instance.
pub struct TaskController<S: SlotStore, V: Surface> {
    repo: TaskRepository<S>,
    surface: V,
    form: FormState,
    notifications: NotificationCenter,
    banner: ErrorBanner,
    detail: Option<TaskDetailView>,
    preview_chars: usize,
}

impl<S: SlotStore, V: Surface> TaskController<S, V> {
    /// Wraps an opened repository and draws the initial list.
    pub fn new(repo: TaskRepository<S>, surface: V, config: &AppConfig) -> Self {
        let mut controller = Self {
            repo,
            surface,
            form: FormState::new(),
            notifications: NotificationCenter::new(config.notification_ttl()),
            banner: ErrorBanner::default(),
            detail: None,
            preview_chars: config.preview_chars,
        };
        controller.rerender();
        info!(
            "event=controller_start module=controller status=ok count={}",
            controller.repo.len()
        );
        controller
    }

    /// Opens the configured slot on `store` and starts a controller.
    pub fn start(store: S, surface: V, config: &AppConfig) -> Self {
        let storage = TaskStorage::new(store, config.storage_key.clone());
        Self::new(TaskRepository::open(storage), surface, config)
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    pub fn surface(&self) -> &V {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut V {
        &mut self.surface
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Mutable access for binding host input fields.
    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    /// Called by the host's auto-dismiss timer.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.notifications.dismiss(id)
    }

    /// Drops the notification if its TTL has elapsed.
    pub fn tick(&mut self) -> bool {
        self.notifications.dismiss_expired()
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn dismiss_banner(&mut self) {
        self.banner.hide();
    }

    pub fn detail(&self) -> Option<&TaskDetailView> {
        self.detail.as_ref()
    }

    /// Handles the form submit event.
    ///
    /// Returns the created or updated task on success.
    pub fn submit(&mut self) -> Option<Task> {
        if !self.form.has_title() {
            self.notify(NotificationKind::Error, MSG_TITLE_REQUIRED);
            return None;
        }

        let title = self.form.title.clone();
        let description = self.form.description.clone();
        let completed = self.form.completed;

        match self.form.edit_id().cloned() {
            Some(id) => match self.repo.update(&id, &title, &description, completed) {
                Ok(task) => {
                    self.form.reset();
                    self.refresh_detail(&task);
                    self.after_mutation(MSG_TASK_UPDATED, NotificationKind::Success);
                    Some(task)
                }
                Err(err) => {
                    // The edited task is gone; leave edit mode.
                    if matches!(err, RepoError::NotFound(_)) {
                        self.form.reset();
                    }
                    self.report(err);
                    None
                }
            },
            None => match self.repo.create(&title, &description, completed) {
                Ok(task) => {
                    self.form.reset();
                    self.after_mutation(MSG_TASK_ADDED, NotificationKind::Success);
                    Some(task)
                }
                Err(err) => {
                    self.report(err);
                    None
                }
            },
        }
    }

    /// Enters edit mode for `id`, populating the form.
    pub fn begin_edit(&mut self, id: &TaskId) -> bool {
        match self.repo.find(id) {
            Some(task) => {
                self.form.load_task(task);
                true
            }
            None => {
                self.report(RepoError::NotFound(id.clone()));
                false
            }
        }
    }

    /// Leaves edit mode without saving.
    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.form.edit_id() {
            debug!("event=task_edit module=controller status=cancelled task_id={id}");
        }
        self.reset_form();
    }

    /// Clears all fields and returns to create mode.
    pub fn reset_form(&mut self) {
        self.form.reset();
    }

    /// Deletes `id` after `confirm` approves [`DELETE_CONFIRMATION_PROMPT`].
    pub fn delete(&mut self, id: &TaskId, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(DELETE_CONFIRMATION_PROMPT) {
            info!("event=task_delete module=controller status=cancelled task_id={id}");
            return false;
        }

        match self.repo.remove(id) {
            Ok(true) => {
                if self.form.edit_id() == Some(id) {
                    self.form.reset();
                }
                if self.detail.as_ref().map(|detail| &detail.id) == Some(id) {
                    self.detail = None;
                }
                self.after_mutation(MSG_TASK_DELETED, NotificationKind::Success);
                true
            }
            Ok(false) => {
                self.report(RepoError::NotFound(id.clone()));
                false
            }
            Err(err) => {
                self.report(err);
                false
            }
        }
    }

    /// Flips completion for `id`.
    pub fn toggle(&mut self, id: &TaskId) -> Option<Task> {
        match self.repo.toggle_completion(id) {
            Ok(task) => {
                let status = if task.completed {
                    "completed"
                } else {
                    "pending"
                };
                self.refresh_detail(&task);
                self.after_mutation(format!("Task marked as {status}!"), NotificationKind::Info);
                Some(task)
            }
            Err(err) => {
                self.report(err);
                None
            }
        }
    }

    /// Opens the detail view for `id`.
    pub fn view(&mut self, id: &TaskId) -> Option<&TaskDetailView> {
        match self.repo.find(id).map(render_detail) {
            Some(detail) => {
                self.detail = Some(detail);
                self.detail.as_ref()
            }
            None => {
                self.report(RepoError::NotFound(id.clone()));
                None
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Redraws the open detail view if it shows `task`.
    fn refresh_detail(&mut self, task: &Task) {
        if self.detail.as_ref().map(|detail| &detail.id) == Some(&task.id) {
            self.detail = Some(render_detail(task));
        }
    }

    fn after_mutation(&mut self, message: impl Into<String>, kind: NotificationKind) {
        self.banner.hide();
        self.rerender();
        self.notify(kind, message);
    }

    fn rerender(&mut self) {
        let model = render_with_limit(self.repo.list(), self.preview_chars);
        if let Err(err) = self.surface.replace_list(&model) {
            warn!(
                "event=render module=controller status=skipped region={} error={}",
                err.region, err
            );
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.notifications.show(kind, message)
    }

    fn report(&mut self, err: RepoError) {
        match &err {
            RepoError::Validation(_) => {
                self.notify(NotificationKind::Error, MSG_TITLE_REQUIRED);
            }
            RepoError::NotFound(id) => {
                warn!("event=task_lookup module=controller status=not_found task_id={id}");
                self.notify(NotificationKind::Error, MSG_TASK_MISSING);
            }
            RepoError::Persistence(_) => {
                self.banner.show(BANNER_SAVE_FAILED);
                self.notify(NotificationKind::Error, MSG_SAVE_FAILED);
            }
        }
        info!(
            "event=controller_error module=controller status=handled error={}",
            err
        );
    }
}
