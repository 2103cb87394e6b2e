use super::*;
use crate::types::TaskFields;

impl App {
    pub fn is_in_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_editing(&self, task_id: &str) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|edit| edit.task_id == task_id)
    }

    /// Put a row into edit mode, snapshotting its current values. Any other
    /// row that was being edited is dropped without saving.
    pub fn begin_edit(&mut self, task_id: &str) {
        let Some(task) = self.store.get(task_id) else {
            return;
        };
        let form = TaskForm::from_task(task);
        if let Some(idx) = self.tasks().iter().position(|t| t.id == task_id) {
            self.focused_task_index = Some(idx);
        }
        self.editing = Some(RowEdit {
            task_id: task_id.to_string(),
            form,
        });
        self.clear_status();
    }

    /// Enter edit mode for the focused row
    pub fn enter_edit_mode(&mut self) {
        if let Some(id) = self.focused_task().map(|t| t.id.clone()) {
            self.begin_edit(&id);
        }
    }

    /// Discard the edit buffer. Never touches the network or the cache.
    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.set_status("Editing cancelled.");
        }
    }

    pub fn exit_edit_mode(&mut self) {
        self.editing = None;
    }

    /// Validated payload for the row being edited.
    pub fn edit_submission(&self) -> Option<Result<(String, TaskFields), String>> {
        self.editing.as_ref().map(|edit| {
            edit.form
                .to_fields()
                .map(|fields| (edit.task_id.clone(), fields))
        })
    }
}
