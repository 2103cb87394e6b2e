use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_auth_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.auth_next_field();
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_auth_mode();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.auth_input_char(c);
        }
        KeyCode::Backspace => {
            app.auth_backspace();
        }
        KeyCode::Left => app.auth_move_cursor(true),
        KeyCode::Right => app.auth_move_cursor(false),
        KeyCode::Enter => match app.auth.credentials() {
            Ok(credentials) => enqueue_action(
                action_tx,
                Action::SubmitAuth {
                    mode: app.auth.mode,
                    credentials,
                },
            ),
            Err(msg) => app.auth_set_error(msg),
        },
        KeyCode::Esc => {
            app.quit();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{AuthMode, TextInput};
    use crate::types::Credentials;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_auth_key(KeyEvent::new(code, modifiers), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn enter_queues_submit_with_current_mode() {
        let mut app = App::new();
        app.auth.email = TextInput::from_str(" me@example.com ");
        app.auth.password = TextInput::from_str("pw");
        press(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL);

        match press(&mut app, KeyCode::Enter, KeyModifiers::NONE) {
            Some(Action::SubmitAuth { mode, credentials }) => {
                assert_eq!(mode, AuthMode::SignUp);
                assert_eq!(credentials, Credentials::new("me@example.com", "pw"));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn enter_with_missing_password_shows_error_without_request() {
        let mut app = App::new();
        app.auth.email = TextInput::from_str("me@example.com");

        let action = press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

        assert!(action.is_none(), "expected no queued action");
        assert_eq!(app.auth.error.as_deref(), Some("Password is required"));
    }

    #[test]
    fn ctrl_r_does_not_type() {
        let mut app = App::new();
        press(&mut app, KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert!(app.auth.email.value.is_empty());
        assert_eq!(app.auth.mode, AuthMode::SignUp);
    }
}
