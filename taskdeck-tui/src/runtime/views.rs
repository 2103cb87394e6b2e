use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod auth;
mod create_task;
mod task_list;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.quit();
        return;
    }

    match app.current_view {
        View::Auth => auth::handle_auth_key(key, app, action_tx),
        View::TaskList => task_list::handle_task_list_key(key, app, action_tx),
        View::CreateTask => create_task::handle_create_task_key(key, app, action_tx),
    }
}

/// Keys shared by every task form: the row edit buffer and the creation draft.
/// Returns false when the key was not a form key.
fn handle_form_key(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.form_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.form_prev_field(),
        KeyCode::Left => app.form_move_cursor(true),
        KeyCode::Right => app.form_move_cursor(false),
        KeyCode::Home => app.form_cursor_home_end(true),
        KeyCode::End => app.form_cursor_home_end(false),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_clear_field()
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_input_char(c)
        }
        _ => return false,
    }
    true
}
