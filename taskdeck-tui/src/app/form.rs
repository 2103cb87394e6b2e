use super::*;
use crate::types::TaskFields;

impl App {
    /// The form keys are routed to: the edit buffer on the list, the draft on
    /// the creation view.
    pub fn active_form_mut(&mut self) -> Option<&mut TaskForm> {
        match self.current_view {
            View::TaskList => self.editing.as_mut().map(|edit| &mut edit.form),
            View::CreateTask => Some(&mut self.draft),
            View::Auth => None,
        }
    }

    pub fn form_next_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focused_field = form.focused_field.next();
        }
    }

    pub fn form_prev_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.focused_field = form.focused_field.previous();
        }
    }

    pub fn form_input_char(&mut self, c: char) {
        if let Some(form) = self.active_form_mut() {
            match form.focused_input_mut() {
                Some(input) => input.insert(c),
                None if c == ' ' => form.status = form.status.next(),
                None => {}
            }
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(input) = self.active_form_mut().and_then(|f| f.focused_input_mut()) {
            input.backspace();
        }
    }

    /// Left/Right move the cursor in text fields and cycle the status selector.
    pub fn form_move_cursor(&mut self, left: bool) {
        if let Some(form) = self.active_form_mut() {
            match form.focused_input_mut() {
                Some(input) if left => input.move_left(),
                Some(input) => input.move_right(),
                None if left => form.status = form.status.previous(),
                None => form.status = form.status.next(),
            }
        }
    }

    pub fn form_cursor_home_end(&mut self, home: bool) {
        if let Some(input) = self.active_form_mut().and_then(|f| f.focused_input_mut()) {
            if home {
                input.home();
            } else {
                input.end();
            }
        }
    }

    pub fn form_clear_field(&mut self) {
        if let Some(input) = self.active_form_mut().and_then(|f| f.focused_input_mut()) {
            input.clear();
        }
    }

    /// Validated payload for the creation draft. Description is required here,
    /// matching the creation form's required fields.
    pub fn draft_submission(&self) -> Result<TaskFields, String> {
        let fields = self.draft.to_fields()?;
        if fields.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        Ok(fields)
    }

    pub fn reset_draft(&mut self) {
        self.draft = TaskForm::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TaskStatus;

    fn typed(app: &mut App, text: &str) {
        for c in text.chars() {
            app.form_input_char(c);
        }
    }

    #[test]
    fn typing_fills_draft_fields_in_order() {
        let mut app = App::new();
        app.current_view = View::CreateTask;

        typed(&mut app, "A");
        app.form_next_field();
        typed(&mut app, "d");
        app.form_next_field();
        app.form_move_cursor(false);
        app.form_next_field();
        typed(&mut app, "2024-01-01");

        let fields = app.draft_submission().unwrap();
        assert_eq!(fields.title, "A");
        assert_eq!(fields.description, "d");
        assert_eq!(fields.status, TaskStatus::InProgress);
    }

    #[test]
    fn space_on_status_cycles_instead_of_typing() {
        let mut app = App::new();
        app.current_view = View::CreateTask;
        app.draft.focused_field = FormField::Status;

        app.form_input_char(' ');
        app.form_input_char('x');
        assert_eq!(app.draft.status, TaskStatus::InProgress);
        app.form_move_cursor(true);
        app.form_move_cursor(true);
        assert_eq!(app.draft.status, TaskStatus::Completed);
    }

    #[test]
    fn draft_requires_description() {
        let mut app = App::new();
        app.draft.title = TextInput::from_str("A");
        app.draft.due_date = TextInput::from_str("2024-01-01");
        assert_eq!(
            app.draft_submission().unwrap_err(),
            "Description is required"
        );
    }

    #[test]
    fn list_view_without_edit_has_no_active_form() {
        let mut app = App::new();
        app.current_view = View::TaskList;
        assert!(app.active_form_mut().is_none());
        app.form_input_char('x');
        assert_eq!(app.draft, TaskForm::new());
    }
}
