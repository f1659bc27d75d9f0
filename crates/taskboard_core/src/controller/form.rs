//! Create/edit form state.

use crate::model::task::{Task, TaskId};

const CREATE_LABEL: &str = "Add Task";
const EDIT_LABEL: &str = "Update Task";

/// Whether submit creates a new task or updates `currentEditId`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(TaskId),
}

/// Field values bound to the host's form inputs.
///
/// Field values are public so the host can mirror user input; the mode only
/// changes through [`FormState::load_task`] and [`FormState::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub title: String,
    pub description: String,
    pub completed: bool,
    mode: FormMode,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Id of the task being edited, if any.
    pub fn edit_id(&self) -> Option<&TaskId> {
        match &self.mode {
            FormMode::Create => None,
            FormMode::Edit(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_id().is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            EDIT_LABEL
        } else {
            CREATE_LABEL
        }
    }

    /// Whether the title field would pass validation.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Copies `task` into the fields and switches to edit mode.
    pub fn load_task(&mut self, task: &Task) {
        self.title = task.title.clone();
        self.description = task.description.clone();
        self.completed = task.completed;
        self.mode = FormMode::Edit(task.id.clone());
    }

    /// Clears the fields and returns to create mode.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::{FormMode, FormState};
    use crate::model::task::Task;

    #[test]
    fn load_then_reset_switches_modes() {
        let task = Task::new("Pay rent", "march", true).expect("valid task");
        let mut form = FormState::new();
        assert_eq!(form.submit_label(), "Add Task");

        form.load_task(&task);
        assert_eq!(form.mode(), &FormMode::Edit(task.id.clone()));
        assert_eq!(form.title, "Pay rent");
        assert_eq!(form.description, "march");
        assert!(form.completed);
        assert_eq!(form.submit_label(), "Update Task");

        form.reset();
        assert_eq!(form, FormState::new());
    }

    #[test]
    fn whitespace_title_is_not_a_title() {
        let mut form = FormState::new();
        form.title = " \t ".to_string();
        assert!(!form.has_title());
    }
}
