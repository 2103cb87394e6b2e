use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_form_key};

pub(super) fn handle_task_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.is_in_edit_mode() {
        handle_edit_row_key(key, app, action_tx);
        return;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.focus_next_task(),
        KeyCode::Up | KeyCode::Char('k') => app.focus_previous_task(),
        KeyCode::PageDown => app.focus_page(true),
        KeyCode::PageUp => app.focus_page(false),
        KeyCode::Enter | KeyCode::Char('e') => app.enter_edit_mode(),
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.focused_task().map(|t| t.id.clone()) {
                enqueue_action(action_tx, Action::DeleteTask { id });
            }
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.navigate_to(View::CreateTask),
        KeyCode::Tab | KeyCode::BackTab => app.toggle_tab(),
        KeyCode::Char('r') => enqueue_action(action_tx, Action::LoadTasks),
        KeyCode::Char('L') => enqueue_action(action_tx, Action::Logout),
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_edit_row_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter => match app.edit_submission() {
            Some(Ok((id, fields))) => enqueue_action(action_tx, Action::SaveEdit { id, fields }),
            // Validation failures keep the row in edit mode.
            Some(Err(msg)) => app.set_status(msg),
            None => {}
        },
        KeyCode::Esc => app.cancel_edit(),
        _ => {
            handle_form_key(key, app);
        }
    }
}
