use crate::session::Branch;
use crate::store::{SyncState, TaskStore};
use crate::types::Task;

mod auth;
mod edit;
mod form;
mod navigation;
mod state;
pub use state::{
    AuthField, AuthForm, AuthMode, FormField, RowEdit, TaskForm, TextInput, View,
};

pub struct App {
    pub running: bool,
    pub status_message: Option<String>,
    pub current_view: View,

    // Task cache for the signed-in session
    pub store: TaskStore,

    // Task list navigation and per-row editing
    pub focused_task_index: Option<usize>,
    pub list_scroll: usize,
    pub list_view_height: usize, // Last-rendered inner height (updated by renderer each frame)
    pub editing: Option<RowEdit>,

    // Creation view draft
    pub draft: TaskForm,

    // Sign-in / sign-up form
    pub auth: AuthForm,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new() -> Self {
        Self {
            running: true,
            status_message: None,
            current_view: View::Auth,
            store: TaskStore::new(),
            focused_task_index: None,
            list_scroll: 0,
            list_view_height: 0,
            editing: None,
            draft: TaskForm::new(),
            auth: AuthForm::new(),
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn is_busy(&self) -> bool {
        self.is_loading || self.store.is_loading()
    }

    /// Navigate to a different view
    pub fn navigate_to(&mut self, view: View) {
        self.current_view = view;
        self.clear_status();

        match view {
            View::Auth => {
                self.auth.error = None;
                self.auth.focused_field = AuthField::Email;
            }
            View::TaskList => {
                self.clamp_focus();
            }
            View::CreateTask => {
                self.editing = None;
            }
        }
    }

    /// Route according to the session guard. Losing the credential while an
    /// authenticated view is up resets everything derived from the session.
    pub fn apply_guard(&mut self, branch: Branch) {
        match (branch, self.current_view) {
            (Branch::Unauthenticated, View::Auth) | (Branch::Authenticated, View::TaskList) => {}
            (Branch::Unauthenticated, _) => {
                self.reset_session_state();
                self.current_view = View::Auth;
            }
            (Branch::Authenticated, View::Auth) => {
                self.current_view = View::TaskList;
                self.clamp_focus();
            }
            (Branch::Authenticated, View::CreateTask) => {}
        }
    }

    /// Explicit replacement for a full reload on sign-in / sign-out.
    pub fn reset_session_state(&mut self) {
        self.store.reset();
        self.editing = None;
        self.draft = TaskForm::new();
        self.focused_task_index = None;
        self.list_scroll = 0;
        self.auth.password.clear();
        self.auth.error = None;
        self.auth.focused_field = AuthField::Email;
    }

    /// Status-line text when no explicit message is set.
    pub fn get_contextual_status(&self) -> String {
        match self.current_view {
            View::Auth => match self.auth.mode {
                AuthMode::SignIn => "Sign in to see your tasks".to_string(),
                AuthMode::SignUp => "Create an account to start tracking tasks".to_string(),
            },
            View::TaskList if self.editing.is_some() => {
                "Editing task (Enter to save, Esc to cancel)".to_string()
            }
            View::TaskList if self.store.state() == SyncState::Loading => {
                "Loading tasks...".to_string()
            }
            View::TaskList => match self.tasks().len() {
                0 => "No tasks yet".to_string(),
                1 => "1 task".to_string(),
                n => format!("{} tasks", n),
            },
            View::CreateTask => "Fill in the fields and press Enter to add the task".to_string(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
