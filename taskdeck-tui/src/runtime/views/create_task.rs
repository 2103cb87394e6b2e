use crate::app::{App, View};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, handle_form_key};

pub(super) fn handle_create_task_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter => match app.draft_submission() {
            Ok(fields) => enqueue_action(action_tx, Action::CreateTask { fields }),
            Err(msg) => app.set_status(msg),
        },
        // The draft survives switching tabs.
        KeyCode::Esc => app.navigate_to(View::TaskList),
        _ => {
            handle_form_key(key, app);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TextInput;
    use crate::types::TaskStatus;
    use crossterm::event::KeyModifiers;

    use super::super::super::action_queue::channel;

    fn draft_app() -> App {
        let mut app = App::new();
        app.current_view = View::CreateTask;
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_create_task_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn enter_queues_validated_draft() {
        let mut app = draft_app();
        app.draft.title = TextInput::from_str("Write report");
        app.draft.description = TextInput::from_str("Q1 numbers");
        app.draft.due_date = TextInput::from_str("2024-03-05");

        match press(&mut app, KeyCode::Enter) {
            Some(Action::CreateTask { fields }) => {
                assert_eq!(fields.title, "Write report");
                assert_eq!(fields.status, TaskStatus::Pending);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn invalid_draft_shows_message_and_sends_nothing() {
        let mut app = draft_app();
        app.draft.title = TextInput::from_str("Write report");
        app.draft.description = TextInput::from_str("Q1 numbers");
        app.draft.due_date = TextInput::from_str("next week");

        assert!(press(&mut app, KeyCode::Enter).is_none());
        assert_eq!(
            app.status_message.as_deref(),
            Some("Due date must be a valid date (YYYY-MM-DD)")
        );
    }

    #[test]
    fn esc_returns_to_list_keeping_draft() {
        let mut app = draft_app();
        press(&mut app, KeyCode::Char('h'));
        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.current_view, View::TaskList);
        assert_eq!(app.draft.title.value, "hi");
    }
}
