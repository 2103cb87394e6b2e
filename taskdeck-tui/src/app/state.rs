use crate::time_utils::{format_date_input, parse_date_input};
use crate::types::{Credentials, Task, TaskFields, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Auth,
    TaskList,
    CreateTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// Email/password form shown while signed out.
#[derive(Debug, Clone)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub email: TextInput,
    pub password: TextInput,
    pub focused_field: AuthField,
    pub error: Option<String>,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            email: TextInput::new(),
            password: TextInput::new(),
            focused_field: AuthField::Email,
            error: None,
        }
    }

    pub fn focused_input_mut(&mut self) -> &mut TextInput {
        match self.focused_field {
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    /// Both fields are required; the email is sent trimmed.
    pub fn credentials(&self) -> Result<Credentials, String> {
        let email = self.email.value.trim();
        if email.is_empty() {
            return Err("Email is required".to_string());
        }
        if self.password.value.is_empty() {
            return Err("Password is required".to_string());
        }
        Ok(Credentials::new(email, self.password.value.clone()))
    }
}

impl Default for AuthForm {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Status,
    DueDate,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Status,
            FormField::Status => FormField::DueDate,
            FormField::DueDate => FormField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::DueDate,
            FormField::Description => FormField::Title,
            FormField::Status => FormField::Description,
            FormField::DueDate => FormField::Status,
        }
    }
}

/// Editable task fields, used both for the creation draft and for the
/// buffer of a row in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: TextInput,
    pub description: TextInput,
    pub status: TaskStatus,
    /// Always `YYYY-MM-DD`, whatever shape the server sent.
    pub due_date: TextInput,
    pub focused_field: FormField,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            title: TextInput::new(),
            description: TextInput::new(),
            status: TaskStatus::Pending,
            due_date: TextInput::new(),
            focused_field: FormField::Title,
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: TextInput::from_str(&task.title),
            description: TextInput::from_str(&task.description),
            status: task.status,
            due_date: TextInput::from_str(&format_date_input(task.due_date)),
            focused_field: FormField::Title,
        }
    }

    /// The text input under focus; `None` on the status selector.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Status => None,
        }
    }

    pub fn to_fields(&self) -> Result<TaskFields, String> {
        let title = self.title.value.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if self.due_date.value.trim().is_empty() {
            return Err("Due date is required".to_string());
        }
        let due_date = parse_date_input(&self.due_date.value)
            .ok_or_else(|| "Due date must be a valid date (YYYY-MM-DD)".to_string())?;

        Ok(TaskFields {
            title: title.to_string(),
            description: self.description.value.clone(),
            status: self.status,
            due_date,
        })
    }
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::new()
    }
}

/// The single row currently in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RowEdit {
    pub task_id: String,
    pub form: TaskForm,
}

/// A text input with mid-string cursor support.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_str(s: &str) -> Self {
        Self {
            value: s.to_string(),
            cursor: s.len(),
        }
    }

    /// Insert a character at the cursor position.
    pub fn insert(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character immediately before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let new_cursor = self.prev_boundary(self.cursor);
        self.value.drain(new_cursor..self.cursor);
        self.cursor = new_cursor;
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_boundary(self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.len() {
            self.cursor = self.next_boundary(self.cursor);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Returns the string split at the cursor: (before, after).
    pub fn split_at_cursor(&self) -> (&str, &str) {
        (&self.value[..self.cursor], &self.value[self.cursor..])
    }

    fn prev_boundary(&self, pos: usize) -> usize {
        debug_assert!(pos > 0, "prev_boundary called with pos == 0");
        let mut p = pos;
        loop {
            p -= 1;
            if self.value.is_char_boundary(p) {
                return p;
            }
        }
    }
    fn next_boundary(&self, pos: usize) -> usize {
        debug_assert!(
            pos < self.value.len(),
            "next_boundary called at end of string"
        );
        let mut p = pos + 1;
        while p <= self.value.len() && !self.value.is_char_boundary(p) {
            p += 1;
        }
        p
    }
}
