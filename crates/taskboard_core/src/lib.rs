//! Core logic for Taskboard.
//! This crate is the single source of truth for task invariants; UI hosts
//! only draw the display model and forward events to the controller.

pub mod config;
pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod storage;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use controller::form::{FormMode, FormState};
pub use controller::notification::{
    ErrorBanner, Notification, NotificationCenter, NotificationId, NotificationKind,
};
pub use controller::{RenderTargetMissing, Surface, TaskController, DELETE_CONFIRMATION_PROMPT};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, TaskRepository};
pub use storage::{
    MemorySlotStore, SlotStore, SqliteSlotStore, StorageError, StorageResult, TaskStorage,
    DEFAULT_STORAGE_KEY,
};
pub use view::{
    description_preview, escape_html, render, render_detail, render_with_limit, DisplayModel,
    TaskDetailView, TaskListItem,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
